use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::course::{Course, CourseUpdate};

/// A row of the `student` table. The password column is stored and returned
/// in plaintext, matching the upstream contract.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i64,
    #[serde(rename = "NID")]
    pub nid: String,
    pub password: String,
    pub name: Option<String>,
    pub surname: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StudentWithCourses {
    #[serde(flatten)]
    pub student: Student,
    pub courses: Vec<Course>,
}

/// Envelope for the paginated list endpoint. The detail and edit endpoints
/// return a bare student object instead.
#[derive(Debug, Serialize)]
pub struct StudentPage {
    pub students: Vec<StudentWithCourses>,
    pub total: i64,
    pub page: i64,
    #[serde(rename = "pageSize")]
    pub page_size: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

/// Required fields are `Option` so that a missing field surfaces as a 400
/// with the documented message rather than a body-deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(rename = "NID")]
    pub nid: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub surname: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SigninRequest {
    #[serde(rename = "NID")]
    pub nid: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditStudentRequest {
    #[serde(rename = "NID")]
    pub nid: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub courses: Option<Vec<CourseUpdate>>,
}
