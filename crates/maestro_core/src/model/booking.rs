//! Booking domain model.
//!
//! # Responsibility
//! - Define the record an administrator creates when fulfilling a lesson
//!   request.
//!
//! # Invariants
//! - `full_price` is fixed at creation as `lesson_count * price_per_lesson`
//!   and never recomputed afterwards.
//! - Monetary amounts are whole pounds; payment tracking lives outside this
//!   crate.

use crate::model::request::{DayOfWeek, LessonCount, LessonDuration, LessonInterval, StudentId};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a booking.
pub type BookingId = Uuid;

/// A scheduled series of lessons for one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Stable global ID.
    pub uuid: BookingId,
    /// Student the lessons are for.
    pub student_uuid: StudentId,
    /// Weekly lesson day.
    pub day: DayOfWeek,
    /// Time of day each lesson starts.
    pub time: NaiveTime,
    /// Teacher delivering the lessons.
    pub teacher: String,
    /// Date of the first lesson.
    pub start_date: NaiveDate,
    /// Length of each lesson.
    pub duration: LessonDuration,
    /// Gap between consecutive lessons.
    pub interval: LessonInterval,
    /// Number of lessons in the series.
    pub lesson_count: LessonCount,
    /// Price of a single lesson in whole pounds.
    pub price_per_lesson: i64,
    /// Total series price, fixed at creation.
    pub full_price: i64,
}

impl Booking {
    /// Creates a booking with a generated stable ID.
    ///
    /// `full_price` is derived here and nowhere else.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        student_uuid: StudentId,
        day: DayOfWeek,
        time: NaiveTime,
        teacher: impl Into<String>,
        start_date: NaiveDate,
        duration: LessonDuration,
        interval: LessonInterval,
        lesson_count: LessonCount,
        price_per_lesson: i64,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            student_uuid,
            day,
            time,
            teacher: teacher.into(),
            start_date,
            duration,
            interval,
            lesson_count,
            price_per_lesson,
            full_price: i64::from(lesson_count.get()) * price_per_lesson,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Booking;
    use crate::model::request::{DayOfWeek, LessonCount, LessonDuration, LessonInterval};
    use chrono::{NaiveDate, NaiveTime};
    use uuid::Uuid;

    #[test]
    fn full_price_is_count_times_unit_price() {
        let booking = Booking::new(
            Uuid::new_v4(),
            DayOfWeek::Friday,
            NaiveTime::from_hms_opt(16, 30, 0).unwrap(),
            "Mrs Allegro",
            NaiveDate::from_ymd_opt(2022, 9, 5).unwrap(),
            LessonDuration::SixtyMinutes,
            LessonInterval::OneWeek,
            LessonCount::new(6).unwrap(),
            50,
        );

        assert_eq!(booking.full_price, 300);
        assert_eq!(booking.price_per_lesson, 50);
        assert!(!booking.uuid.is_nil());
    }
}
