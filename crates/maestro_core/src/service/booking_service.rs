//! Lesson request and booking use-case service.
//!
//! # Responsibility
//! - Accept student lesson requests.
//! - Let administrators fulfil a request into a scheduled booking.
//!
//! # Invariants
//! - A fulfilled request is deleted; a request rejected for invalid details
//!   is left untouched.
//! - Booking price fields are fixed at fulfilment time.

use crate::model::booking::{Booking, BookingId};
use crate::model::request::{DayOfWeek, LessonRequest, RequestId, StudentId};
use crate::repo::booking_repo::{BookingRepoError, BookingRepository};
use crate::repo::request_repo::{RequestRepoError, RequestRepository};
use chrono::{NaiveDate, NaiveTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Scheduling details an administrator supplies when fulfilling a request.
///
/// Day, interval, duration and lesson count come from the request itself;
/// `day` here optionally overrides the student's stated availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDetails {
    pub day: Option<DayOfWeek>,
    pub time: NaiveTime,
    pub teacher: String,
    pub start_date: NaiveDate,
    pub price_per_lesson: i64,
}

/// Errors from request/booking service operations.
#[derive(Debug)]
pub enum BookingServiceError {
    /// Teacher name is blank after trim.
    BlankTeacher,
    /// Price per lesson must be positive.
    NonPositivePrice(i64),
    /// Target lesson request does not exist.
    RequestNotFound(RequestId),
    /// Target booking does not exist.
    BookingNotFound(BookingId),
    /// Request repository failure.
    RequestRepo(RequestRepoError),
    /// Booking repository failure.
    BookingRepo(BookingRepoError),
}

impl Display for BookingServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTeacher => write!(f, "teacher name must not be blank"),
            Self::NonPositivePrice(price) => {
                write!(f, "price per lesson must be positive, got {price}")
            }
            Self::RequestNotFound(id) => write!(f, "lesson request not found: {id}"),
            Self::BookingNotFound(id) => write!(f, "booking not found: {id}"),
            Self::RequestRepo(err) => write!(f, "{err}"),
            Self::BookingRepo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BookingServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::RequestRepo(err) => Some(err),
            Self::BookingRepo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RequestRepoError> for BookingServiceError {
    fn from(value: RequestRepoError) -> Self {
        match value {
            RequestRepoError::NotFound(id) => Self::RequestNotFound(id),
            other => Self::RequestRepo(other),
        }
    }
}

impl From<BookingRepoError> for BookingServiceError {
    fn from(value: BookingRepoError) -> Self {
        match value {
            BookingRepoError::NotFound(id) => Self::BookingNotFound(id),
            other => Self::BookingRepo(other),
        }
    }
}

/// Request intake and booking fulfilment facade.
pub struct BookingService<RR: RequestRepository, BR: BookingRepository> {
    requests: RR,
    bookings: BR,
}

impl<RR: RequestRepository, BR: BookingRepository> BookingService<RR, BR> {
    /// Creates a service from repository implementations.
    pub fn new(requests: RR, bookings: BR) -> Self {
        Self {
            requests,
            bookings,
        }
    }

    /// Files a student's lesson request.
    pub fn submit_request(&self, request: &LessonRequest) -> Result<RequestId, BookingServiceError> {
        self.requests.create_request(request).map_err(Into::into)
    }

    /// Lists every open request, oldest identity first.
    pub fn list_open_requests(&self) -> Result<Vec<LessonRequest>, BookingServiceError> {
        self.requests.list_requests().map_err(Into::into)
    }

    /// Lists a student's open requests.
    pub fn list_requests_for_student(
        &self,
        student: StudentId,
    ) -> Result<Vec<LessonRequest>, BookingServiceError> {
        self.requests
            .list_requests_for_student(student)
            .map_err(Into::into)
    }

    /// Discards an open request without booking it.
    pub fn discard_request(&self, id: RequestId) -> Result<(), BookingServiceError> {
        self.requests.delete_request(id).map_err(Into::into)
    }

    /// Converts an open request into a scheduled booking.
    ///
    /// The request's preferences (interval, duration, lesson count, and day
    /// unless overridden) are carried onto the booking; the full price is
    /// fixed here from the supplied per-lesson price. The request is deleted
    /// once the booking is persisted.
    pub fn fulfil_request(
        &self,
        request_id: RequestId,
        details: &BookingDetails,
    ) -> Result<Booking, BookingServiceError> {
        if details.teacher.trim().is_empty() {
            return Err(BookingServiceError::BlankTeacher);
        }
        if details.price_per_lesson <= 0 {
            return Err(BookingServiceError::NonPositivePrice(
                details.price_per_lesson,
            ));
        }

        let request = self
            .requests
            .get_request(request_id)?
            .ok_or(BookingServiceError::RequestNotFound(request_id))?;

        let booking = Booking::new(
            request.student_uuid,
            details.day.unwrap_or(request.day),
            details.time,
            details.teacher.trim(),
            details.start_date,
            request.duration,
            request.interval,
            request.lesson_count,
            details.price_per_lesson,
        );

        self.bookings.create_booking(&booking)?;
        self.requests.delete_request(request_id)?;
        Ok(booking)
    }

    /// Gets one booking by ID.
    pub fn get_booking(&self, id: BookingId) -> Result<Option<Booking>, BookingServiceError> {
        self.bookings.get_booking(id).map_err(Into::into)
    }

    /// Lists every booking ordered by start date.
    pub fn list_bookings(&self) -> Result<Vec<Booking>, BookingServiceError> {
        self.bookings.list_bookings().map_err(Into::into)
    }

    /// Lists a student's bookings ordered by start date.
    pub fn list_bookings_for_student(
        &self,
        student: StudentId,
    ) -> Result<Vec<Booking>, BookingServiceError> {
        self.bookings
            .list_bookings_for_student(student)
            .map_err(Into::into)
    }

    /// Cancels a booking by ID.
    pub fn cancel_booking(&self, id: BookingId) -> Result<(), BookingServiceError> {
        self.bookings.delete_booking(id).map_err(Into::into)
    }
}
