use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `course` table. `subscribed` is persisted as a 0/1 integer
/// and must always cross the wire as a literal boolean.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: i64,
    pub student_id: i64,
    pub name: String,
    pub subscribed: bool,
    #[serde(rename = "otherInfo")]
    pub other_info: Option<String>,
    #[serde(rename = "subscribeDate")]
    pub subscribe_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCourseRequest {
    pub name: String,
    #[serde(default)]
    pub subscribed: bool,
    #[serde(rename = "otherInfo")]
    pub other_info: Option<String>,
    #[serde(rename = "subscribeDate")]
    pub subscribe_date: Option<String>,
}

/// One entry of the `courses` array accepted by the edit endpoint. Matches
/// on course `id`; absent fields leave the stored value untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseUpdate {
    pub id: i64,
    pub subscribed: Option<bool>,
    #[serde(rename = "otherInfo")]
    pub other_info: Option<String>,
    #[serde(rename = "subscribeDate")]
    pub subscribe_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddCoursesRequest {
    pub courses: Vec<NewCourseRequest>,
}
