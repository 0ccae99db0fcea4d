//! Booking repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist scheduled bookings created from fulfilled lesson requests.
//!
//! # Invariants
//! - Listing order is deterministic: `start_date ASC, uuid ASC`.
//! - `full_price` is stored as written; it is never recomputed on read.

use crate::db::DbError;
use crate::model::booking::{Booking, BookingId};
use crate::model::request::{DayOfWeek, LessonCount, LessonDuration, LessonInterval, StudentId};
use crate::repo::{date_to_db, parse_date, parse_time, time_to_db};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const BOOKING_SELECT_SQL: &str = "SELECT
    uuid,
    student_uuid,
    day,
    lesson_time,
    teacher,
    start_date,
    duration_minutes,
    interval_weeks,
    lesson_count,
    price_per_lesson,
    full_price
FROM bookings";

pub type BookingRepoResult<T> = Result<T, BookingRepoError>;

/// Errors from booking persistence operations.
#[derive(Debug)]
pub enum BookingRepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Target booking does not exist.
    NotFound(BookingId),
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for BookingRepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "booking not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted booking data: {message}"),
        }
    }
}

impl Error for BookingRepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for BookingRepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for BookingRepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for booking operations.
pub trait BookingRepository {
    fn create_booking(&self, booking: &Booking) -> BookingRepoResult<BookingId>;
    fn get_booking(&self, id: BookingId) -> BookingRepoResult<Option<Booking>>;
    fn list_bookings(&self) -> BookingRepoResult<Vec<Booking>>;
    fn list_bookings_for_student(&self, student: StudentId) -> BookingRepoResult<Vec<Booking>>;
    fn delete_booking(&self, id: BookingId) -> BookingRepoResult<()>;
}

/// SQLite-backed booking repository.
pub struct SqliteBookingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookingRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BookingRepository for SqliteBookingRepository<'_> {
    fn create_booking(&self, booking: &Booking) -> BookingRepoResult<BookingId> {
        self.conn.execute(
            "INSERT INTO bookings (
                uuid,
                student_uuid,
                day,
                lesson_time,
                teacher,
                start_date,
                duration_minutes,
                interval_weeks,
                lesson_count,
                price_per_lesson,
                full_price
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
            params![
                booking.uuid.to_string(),
                booking.student_uuid.to_string(),
                booking.day.as_str(),
                time_to_db(booking.time),
                booking.teacher.as_str(),
                date_to_db(booking.start_date),
                booking.duration.as_minutes(),
                booking.interval.as_weeks(),
                booking.lesson_count.get(),
                booking.price_per_lesson,
                booking.full_price,
            ],
        )?;

        Ok(booking.uuid)
    }

    fn get_booking(&self, id: BookingId) -> BookingRepoResult<Option<Booking>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOKING_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_booking_row(row)?));
        }

        Ok(None)
    }

    fn list_bookings(&self) -> BookingRepoResult<Vec<Booking>> {
        let mut stmt = self.conn.prepare(&format!(
            "{BOOKING_SELECT_SQL} ORDER BY start_date ASC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        collect_booking_rows(&mut rows)
    }

    fn list_bookings_for_student(&self, student: StudentId) -> BookingRepoResult<Vec<Booking>> {
        let mut stmt = self.conn.prepare(&format!(
            "{BOOKING_SELECT_SQL} WHERE student_uuid = ?1 ORDER BY start_date ASC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([student.to_string()])?;
        collect_booking_rows(&mut rows)
    }

    fn delete_booking(&self, id: BookingId) -> BookingRepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM bookings WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(BookingRepoError::NotFound(id));
        }

        Ok(())
    }
}

fn collect_booking_rows(rows: &mut rusqlite::Rows<'_>) -> BookingRepoResult<Vec<Booking>> {
    let mut bookings = Vec::new();
    while let Some(row) = rows.next()? {
        bookings.push(parse_booking_row(row)?);
    }
    Ok(bookings)
}

fn parse_booking_row(row: &Row<'_>) -> BookingRepoResult<Booking> {
    let uuid = parse_uuid_column(row, "uuid")?;
    let student_uuid = parse_uuid_column(row, "student_uuid")?;

    let day_text: String = row.get("day")?;
    let day = DayOfWeek::parse(&day_text).ok_or_else(|| {
        BookingRepoError::InvalidData(format!("invalid day `{day_text}` in bookings.day"))
    })?;

    let time_text: String = row.get("lesson_time")?;
    let time = parse_time(&time_text).ok_or_else(|| {
        BookingRepoError::InvalidData(format!("invalid time `{time_text}` in bookings.lesson_time"))
    })?;

    let start_text: String = row.get("start_date")?;
    let start_date = parse_date(&start_text).ok_or_else(|| {
        BookingRepoError::InvalidData(format!("invalid date `{start_text}` in bookings.start_date"))
    })?;

    let duration_value: i64 = row.get("duration_minutes")?;
    let duration = u8::try_from(duration_value)
        .ok()
        .and_then(LessonDuration::from_minutes)
        .ok_or_else(|| {
            BookingRepoError::InvalidData(format!(
                "invalid duration `{duration_value}` in bookings.duration_minutes"
            ))
        })?;

    let interval_value: i64 = row.get("interval_weeks")?;
    let interval = u8::try_from(interval_value)
        .ok()
        .and_then(LessonInterval::from_weeks)
        .ok_or_else(|| {
            BookingRepoError::InvalidData(format!(
                "invalid interval `{interval_value}` in bookings.interval_weeks"
            ))
        })?;

    let count_value: i64 = row.get("lesson_count")?;
    let lesson_count = u8::try_from(count_value)
        .ok()
        .and_then(|value| LessonCount::new(value).ok())
        .ok_or_else(|| {
            BookingRepoError::InvalidData(format!(
                "invalid lesson count `{count_value}` in bookings.lesson_count"
            ))
        })?;

    Ok(Booking {
        uuid,
        student_uuid,
        day,
        time,
        teacher: row.get("teacher")?,
        start_date,
        duration,
        interval,
        lesson_count,
        price_per_lesson: row.get("price_per_lesson")?,
        full_price: row.get("full_price")?,
    })
}

fn parse_uuid_column(row: &Row<'_>, column: &'static str) -> BookingRepoResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text).map_err(|_| {
        BookingRepoError::InvalidData(format!("invalid uuid value `{text}` in bookings.{column}"))
    })
}
