//! Lesson request repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist open lesson requests until an administrator fulfils or discards
//!   them.
//!
//! # Invariants
//! - Listing order is deterministic: `uuid ASC`.
//! - Scheduling vocabulary columns (day, interval, duration, count) must
//!   parse back to their closed enums; anything else is `InvalidData`.

use crate::db::DbError;
use crate::model::request::{
    DayOfWeek, LessonCount, LessonDuration, LessonInterval, LessonRequest, RequestId, StudentId,
};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const REQUEST_SELECT_SQL: &str = "SELECT
    uuid,
    student_uuid,
    day,
    lesson_count,
    interval_weeks,
    duration_minutes,
    notes
FROM lesson_requests";

pub type RequestRepoResult<T> = Result<T, RequestRepoError>;

/// Errors from lesson request persistence operations.
#[derive(Debug)]
pub enum RequestRepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Target request does not exist.
    NotFound(RequestId),
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for RequestRepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "lesson request not found: {id}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted lesson request data: {message}")
            }
        }
    }
}

impl Error for RequestRepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RequestRepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RequestRepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for lesson request operations.
pub trait RequestRepository {
    fn create_request(&self, request: &LessonRequest) -> RequestRepoResult<RequestId>;
    fn get_request(&self, id: RequestId) -> RequestRepoResult<Option<LessonRequest>>;
    fn list_requests(&self) -> RequestRepoResult<Vec<LessonRequest>>;
    fn list_requests_for_student(&self, student: StudentId)
        -> RequestRepoResult<Vec<LessonRequest>>;
    fn delete_request(&self, id: RequestId) -> RequestRepoResult<()>;
}

/// SQLite-backed lesson request repository.
pub struct SqliteRequestRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRequestRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RequestRepository for SqliteRequestRepository<'_> {
    fn create_request(&self, request: &LessonRequest) -> RequestRepoResult<RequestId> {
        self.conn.execute(
            "INSERT INTO lesson_requests (
                uuid,
                student_uuid,
                day,
                lesson_count,
                interval_weeks,
                duration_minutes,
                notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                request.uuid.to_string(),
                request.student_uuid.to_string(),
                request.day.as_str(),
                request.lesson_count.get(),
                request.interval.as_weeks(),
                request.duration.as_minutes(),
                request.notes.as_deref(),
            ],
        )?;

        Ok(request.uuid)
    }

    fn get_request(&self, id: RequestId) -> RequestRepoResult<Option<LessonRequest>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REQUEST_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_request_row(row)?));
        }

        Ok(None)
    }

    fn list_requests(&self) -> RequestRepoResult<Vec<LessonRequest>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REQUEST_SELECT_SQL} ORDER BY uuid ASC;"))?;

        let mut rows = stmt.query([])?;
        collect_request_rows(&mut rows)
    }

    fn list_requests_for_student(
        &self,
        student: StudentId,
    ) -> RequestRepoResult<Vec<LessonRequest>> {
        let mut stmt = self.conn.prepare(&format!(
            "{REQUEST_SELECT_SQL} WHERE student_uuid = ?1 ORDER BY uuid ASC;"
        ))?;

        let mut rows = stmt.query([student.to_string()])?;
        collect_request_rows(&mut rows)
    }

    fn delete_request(&self, id: RequestId) -> RequestRepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM lesson_requests WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RequestRepoError::NotFound(id));
        }

        Ok(())
    }
}

fn collect_request_rows(rows: &mut rusqlite::Rows<'_>) -> RequestRepoResult<Vec<LessonRequest>> {
    let mut requests = Vec::new();
    while let Some(row) = rows.next()? {
        requests.push(parse_request_row(row)?);
    }
    Ok(requests)
}

fn parse_request_row(row: &Row<'_>) -> RequestRepoResult<LessonRequest> {
    let uuid = parse_uuid_column(row, "uuid")?;
    let student_uuid = parse_uuid_column(row, "student_uuid")?;

    let day_text: String = row.get("day")?;
    let day = DayOfWeek::parse(&day_text).ok_or_else(|| {
        RequestRepoError::InvalidData(format!("invalid day `{day_text}` in lesson_requests.day"))
    })?;

    let count_value: i64 = row.get("lesson_count")?;
    let lesson_count = u8::try_from(count_value)
        .ok()
        .and_then(|value| LessonCount::new(value).ok())
        .ok_or_else(|| {
            RequestRepoError::InvalidData(format!(
                "invalid lesson count `{count_value}` in lesson_requests.lesson_count"
            ))
        })?;

    let interval_value: i64 = row.get("interval_weeks")?;
    let interval = u8::try_from(interval_value)
        .ok()
        .and_then(LessonInterval::from_weeks)
        .ok_or_else(|| {
            RequestRepoError::InvalidData(format!(
                "invalid interval `{interval_value}` in lesson_requests.interval_weeks"
            ))
        })?;

    let duration_value: i64 = row.get("duration_minutes")?;
    let duration = u8::try_from(duration_value)
        .ok()
        .and_then(LessonDuration::from_minutes)
        .ok_or_else(|| {
            RequestRepoError::InvalidData(format!(
                "invalid duration `{duration_value}` in lesson_requests.duration_minutes"
            ))
        })?;

    Ok(LessonRequest {
        uuid,
        student_uuid,
        day,
        lesson_count,
        interval,
        duration,
        notes: row.get("notes")?,
    })
}

fn parse_uuid_column(row: &Row<'_>, column: &'static str) -> RequestRepoResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text).map_err(|_| {
        RequestRepoError::InvalidData(format!(
            "invalid uuid value `{text}` in lesson_requests.{column}"
        ))
    })
}
