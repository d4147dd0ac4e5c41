use axum::Json;
use axum::extract::{Path, Query};
use axum::routing::{post, put};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::{Deserialize, Serialize};

use crate::db::repository;
use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_PAGE_SIZE: i64 = 5;

const MSG_STUDENT_NOT_FOUND: &str = "Student not found";
// Albanian messages verbatim, leading space included
const MSG_ALREADY_REGISTERED: &str = "Ju ekzistoni i rregjistruar ne rregjistrin e studenteve!";
const MSG_REGISTERED: &str = " Ju u rregjistruat me sukses!";
const MSG_BAD_CREDENTIALS: &str = "Nuk ekziston perdorues me te njejtat kredenciale te studenteve!";

#[derive(Deserialize)]
struct PageParams {
    page: Option<String>,
    #[serde(rename = "pageSize")]
    page_size: Option<String>,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self { message: message.to_string() }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/students", get(list_students))
        .route("/students/{key}", get(get_student).delete(delete_student))
        .route("/students/{key}/courses", post(add_courses))
        .route("/register", post(register))
        .route("/signin", post(signin))
        .route("/edit", put(edit_student))
        .with_state(state)
}

/// Invalid, missing, or non-positive values silently fall back to the
/// default instead of being rejected.
fn page_param(raw: Option<&String>, default: i64) -> i64 {
    raw.and_then(|v| v.parse::<i64>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(default)
}

async fn attach_courses(
    state: &AppState,
    student: Student,
) -> Result<StudentWithCourses, AppError> {
    let courses = repository::fetch_courses_for_student(&state.db, student.id).await?;
    Ok(StudentWithCourses { student, courses })
}

async fn list_students(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<StudentPage>, AppError> {
    let page = page_param(params.page.as_ref(), DEFAULT_PAGE);
    let page_size = page_param(params.page_size.as_ref(), DEFAULT_PAGE_SIZE);
    // page and page_size are caller-controlled; saturate instead of overflowing
    let offset = (page - 1).saturating_mul(page_size);

    let rows = repository::fetch_students_page(&state.db, page_size, offset).await?;

    // one course query per student; fine at this scale
    let mut students = Vec::with_capacity(rows.len());
    for student in rows {
        students.push(attach_courses(&state, student).await?);
    }

    let total = repository::count_students(&state.db).await?;
    let total_pages = if total == 0 {
        0
    } else {
        1 + (total - 1) / page_size
    };

    Ok(Json(StudentPage {
        students,
        total,
        page,
        page_size,
        total_pages,
    }))
}

async fn get_student(
    State(state): State<AppState>,
    Path(nid): Path<String>,
) -> Result<Json<StudentWithCourses>, AppError> {
    let student = repository::find_student_by_nid(&state.db, &nid)
        .await?
        .ok_or(AppError::NotFound(MSG_STUDENT_NOT_FOUND))?;

    Ok(Json(attach_courses(&state, student).await?))
}

async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::NotFound(MSG_STUDENT_NOT_FOUND))?;
    repository::find_student_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound(MSG_STUDENT_NOT_FOUND))?;

    repository::delete_student(&state.db, id).await?;

    Ok(Json(MessageResponse::new(
        "Student and associated courses deleted successfully",
    )))
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let (Some(nid), Some(password)) = (req.nid, req.password) else {
        return Err(AppError::BadRequest(
            "NID and password are required".to_string(),
        ));
    };

    if repository::find_student_by_nid(&state.db, &nid)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(MSG_ALREADY_REGISTERED.to_string()));
    }

    // the unique nid column backstops the pre-check
    match repository::register_student(
        &state.db,
        &nid,
        &password,
        req.name.as_deref(),
        req.surname.as_deref(),
    )
    .await
    {
        Ok(_) => Ok((
            StatusCode::CREATED,
            Json(MessageResponse::new(MSG_REGISTERED)),
        )),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(AppError::Conflict(MSG_ALREADY_REGISTERED.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SigninRequest>,
) -> Result<Json<Student>, AppError> {
    let (Some(nid), Some(password)) = (req.nid, req.password) else {
        return Err(AppError::BadRequest(
            "NID and password are required".to_string(),
        ));
    };

    let student = repository::find_student_by_credentials(&state.db, &nid, &password)
        .await?
        .ok_or_else(|| AppError::Unauthorized(MSG_BAD_CREDENTIALS.to_string()))?;

    Ok(Json(student))
}

async fn edit_student(
    State(state): State<AppState>,
    Json(req): Json<EditStudentRequest>,
) -> Result<Json<Student>, AppError> {
    let Some(nid) = req.nid.clone() else {
        return Err(AppError::BadRequest("NID is required".to_string()));
    };

    let student = repository::update_student(&state.db, &nid, req)
        .await?
        .ok_or(AppError::NotFound(MSG_STUDENT_NOT_FOUND))?;

    Ok(Json(student))
}

async fn add_courses(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AddCoursesRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::NotFound(MSG_STUDENT_NOT_FOUND))?;
    repository::find_student_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound(MSG_STUDENT_NOT_FOUND))?;

    repository::add_courses(&state.db, id, &req.courses).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Courses added successfully")),
    ))
}
