use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{Course, EditStudentRequest, NewCourseRequest, Student};

/// Course set created for every new registration.
const DEFAULT_COURSES: [(&str, &str); 5] = [
    ("Mathematics", "Introduction to Calculus"),
    ("Physics", "Mechanics and Thermodynamics"),
    ("Literature", "World Literature"),
    ("History", "Modern World History"),
    ("Computer Science", "Introduction to Programming"),
];

/// Current UTC date in the `YYYY-MM-DD` form used by `subscribe_date`.
pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

pub async fn fetch_students_page(
    db: &SqlitePool,
    limit: i64,
    offset: i64,
) -> Result<Vec<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        "SELECT id, nid, password, name, surname FROM student ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
}

pub async fn count_students(db: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM student")
        .fetch_one(db)
        .await
}

pub async fn find_student_by_nid(
    db: &SqlitePool,
    nid: &str,
) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        "SELECT id, nid, password, name, surname FROM student WHERE nid = ?",
    )
    .bind(nid)
    .fetch_optional(db)
    .await
}

pub async fn find_student_by_id(
    db: &SqlitePool,
    id: i64,
) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        "SELECT id, nid, password, name, surname FROM student WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Exact credential match, both fields compared as stored.
pub async fn find_student_by_credentials(
    db: &SqlitePool,
    nid: &str,
    password: &str,
) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        "SELECT id, nid, password, name, surname FROM student WHERE nid = ? AND password = ?",
    )
    .bind(nid)
    .bind(password)
    .fetch_optional(db)
    .await
}

pub async fn fetch_courses_for_student(
    db: &SqlitePool,
    student_id: i64,
) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, student_id, name, subscribed, other_info, subscribe_date \
         FROM course WHERE student_id = ? ORDER BY id",
    )
    .bind(student_id)
    .fetch_all(db)
    .await
}

/// Inserts the student and its five default courses in one transaction.
/// A duplicate NID surfaces as a unique-constraint violation from the
/// student insert, rolling back the whole batch.
pub async fn register_student(
    db: &SqlitePool,
    nid: &str,
    password: &str,
    name: Option<&str>,
    surname: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let mut tx = db.begin().await?;

    let student_id =
        sqlx::query("INSERT INTO student (nid, password, name, surname) VALUES (?, ?, ?, ?)")
            .bind(nid)
            .bind(password)
            .bind(name)
            .bind(surname)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

    let date = today();
    for (course_name, info) in DEFAULT_COURSES {
        sqlx::query(
            "INSERT INTO course (student_id, name, subscribed, other_info, subscribe_date) \
             VALUES (?, ?, 0, ?, ?)",
        )
        .bind(student_id)
        .bind(course_name)
        .bind(info)
        .bind(&date)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(student_id)
}

/// Deletes the student's courses and the student row atomically, so a
/// failure cannot leave orphan course rows behind.
pub async fn delete_student(db: &SqlitePool, id: i64) -> Result<(), sqlx::Error> {
    let mut tx = db.begin().await?;

    sqlx::query("DELETE FROM course WHERE student_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM student WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Applies the provided student fields and any per-course updates in one
/// transaction, then returns the refreshed student row. `Ok(None)` means no
/// student with that NID exists. Course entries whose `id` matches no row
/// are skipped, and the `NID` field itself is never updated.
pub async fn update_student(
    db: &SqlitePool,
    nid: &str,
    req: EditStudentRequest,
) -> Result<Option<Student>, sqlx::Error> {
    let mut tx = db.begin().await?;

    let mut current = match sqlx::query_as::<_, Student>(
        "SELECT id, nid, password, name, surname FROM student WHERE nid = ?",
    )
    .bind(nid)
    .fetch_optional(&mut *tx)
    .await?
    {
        Some(s) => s,
        None => return Ok(None),
    };

    if let Some(password) = req.password {
        current.password = password;
    }
    if let Some(name) = req.name {
        current.name = Some(name);
    }
    if let Some(surname) = req.surname {
        current.surname = Some(surname);
    }

    sqlx::query("UPDATE student SET password = ?, name = ?, surname = ? WHERE nid = ?")
        .bind(&current.password)
        .bind(&current.name)
        .bind(&current.surname)
        .bind(nid)
        .execute(&mut *tx)
        .await?;

    if let Some(courses) = req.courses {
        for update in courses {
            let existing = sqlx::query_as::<_, Course>(
                "SELECT id, student_id, name, subscribed, other_info, subscribe_date \
                 FROM course WHERE id = ?",
            )
            .bind(update.id)
            .fetch_optional(&mut *tx)
            .await?;

            let Some(mut course) = existing else {
                continue;
            };
            if let Some(subscribed) = update.subscribed {
                course.subscribed = subscribed;
            }
            if let Some(info) = update.other_info {
                course.other_info = Some(info);
            }
            if let Some(date) = update.subscribe_date {
                course.subscribe_date = Some(date);
            }

            sqlx::query(
                "UPDATE course SET subscribed = ?, other_info = ?, subscribe_date = ? WHERE id = ?",
            )
            .bind(course.subscribed)
            .bind(&course.other_info)
            .bind(&course.subscribe_date)
            .bind(course.id)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    find_student_by_nid(db, nid).await
}

/// Appends courses to an existing student, all rows in one transaction.
pub async fn add_courses(
    db: &SqlitePool,
    student_id: i64,
    courses: &[NewCourseRequest],
) -> Result<(), sqlx::Error> {
    let mut tx = db.begin().await?;

    for course in courses {
        sqlx::query(
            "INSERT INTO course (student_id, name, subscribed, other_info, subscribe_date) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(student_id)
        .bind(&course.name)
        .bind(course.subscribed)
        .bind(&course.other_info)
        .bind(&course.subscribe_date)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}
