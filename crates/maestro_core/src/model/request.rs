//! Lesson request domain model.
//!
//! # Responsibility
//! - Define the record a student files to ask for lessons.
//! - Define the closed scheduling vocabularies (day, interval, duration,
//!   lesson count) shared with bookings.
//!
//! # Invariants
//! - `lesson_count` stays within 1..=7, including across deserialization.
//! - A request carries availability and preferences only; schedule, teacher
//!   and pricing are decided at booking time.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a lesson request.
pub type RequestId = Uuid;

/// Opaque reference to a student account managed outside this crate.
pub type StudentId = Uuid;

/// Day of the week a student is available for lessons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Stable lowercase label used for storage and wire formats.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    /// Parses a stored label back to a day.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "monday" => Some(Self::Monday),
            "tuesday" => Some(Self::Tuesday),
            "wednesday" => Some(Self::Wednesday),
            "thursday" => Some(Self::Thursday),
            "friday" => Some(Self::Friday),
            "saturday" => Some(Self::Saturday),
            "sunday" => Some(Self::Sunday),
            _ => None,
        }
    }
}

impl Display for DayOfWeek {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gap between consecutive lessons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonInterval {
    OneWeek,
    TwoWeeks,
}

impl LessonInterval {
    /// Interval length in whole weeks.
    pub fn as_weeks(self) -> u8 {
        match self {
            Self::OneWeek => 1,
            Self::TwoWeeks => 2,
        }
    }

    /// Converts a stored week count back to an interval.
    pub fn from_weeks(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::OneWeek),
            2 => Some(Self::TwoWeeks),
            _ => None,
        }
    }
}

/// Length of a single lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonDuration {
    ThirtyMinutes,
    FortyFiveMinutes,
    SixtyMinutes,
}

impl LessonDuration {
    /// Duration in minutes.
    pub fn as_minutes(self) -> u8 {
        match self {
            Self::ThirtyMinutes => 30,
            Self::FortyFiveMinutes => 45,
            Self::SixtyMinutes => 60,
        }
    }

    /// Converts a stored minute count back to a duration.
    pub fn from_minutes(value: u8) -> Option<Self> {
        match value {
            30 => Some(Self::ThirtyMinutes),
            45 => Some(Self::FortyFiveMinutes),
            60 => Some(Self::SixtyMinutes),
            _ => None,
        }
    }
}

/// Number of lessons requested or booked, restricted to 1..=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LessonCount(u8);

impl LessonCount {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 7;

    /// Builds a lesson count, rejecting values outside 1..=7.
    pub fn new(value: u8) -> Result<Self, LessonCountError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(LessonCountError { value })
        }
    }

    /// Raw count.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for LessonCount {
    type Error = LessonCountError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LessonCount> for u8 {
    fn from(value: LessonCount) -> Self {
        value.0
    }
}

impl Display for LessonCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lesson count outside the supported 1..=7 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonCountError {
    pub value: u8,
}

impl Display for LessonCountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "lesson count must be between {} and {}, got {}",
            LessonCount::MIN,
            LessonCount::MAX,
            self.value
        )
    }
}

impl Error for LessonCountError {}

/// A student's open request for lessons, awaiting an administrator booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonRequest {
    /// Stable global ID.
    pub uuid: RequestId,
    /// Student the lessons are for.
    pub student_uuid: StudentId,
    /// Day of the week the student is available.
    pub day: DayOfWeek,
    /// How many lessons are wanted.
    pub lesson_count: LessonCount,
    /// Gap between consecutive lessons.
    pub interval: LessonInterval,
    /// Length of each lesson.
    pub duration: LessonDuration,
    /// Optional free-text information for the administrator.
    pub notes: Option<String>,
}

impl LessonRequest {
    /// Creates a request with a generated stable ID and no notes.
    pub fn new(
        student_uuid: StudentId,
        day: DayOfWeek,
        lesson_count: LessonCount,
        interval: LessonInterval,
        duration: LessonDuration,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            student_uuid,
            day,
            lesson_count,
            interval,
            duration,
            notes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DayOfWeek, LessonCount, LessonDuration, LessonInterval};

    #[test]
    fn lesson_count_enforces_range() {
        assert_eq!(LessonCount::new(1).map(LessonCount::get), Ok(1));
        assert_eq!(LessonCount::new(7).map(LessonCount::get), Ok(7));
        assert!(LessonCount::new(0).is_err());
        assert!(LessonCount::new(8).is_err());
    }

    #[test]
    fn scheduling_vocabulary_round_trips() {
        assert_eq!(DayOfWeek::parse("wednesday"), Some(DayOfWeek::Wednesday));
        assert_eq!(DayOfWeek::parse("someday"), None);
        assert_eq!(LessonInterval::from_weeks(2), Some(LessonInterval::TwoWeeks));
        assert_eq!(LessonInterval::from_weeks(3), None);
        assert_eq!(
            LessonDuration::from_minutes(45),
            Some(LessonDuration::FortyFiveMinutes)
        );
        assert_eq!(LessonDuration::from_minutes(50), None);
    }
}
