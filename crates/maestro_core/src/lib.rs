//! Core domain logic for Maestro, a music-school management system.
//! This crate is the single source of truth for scheduling invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::booking::{Booking, BookingId};
pub use model::request::{
    DayOfWeek, LessonCount, LessonCountError, LessonDuration, LessonInterval, LessonRequest,
    RequestId, StudentId,
};
pub use model::term::{Term, TermDraft, TermId, TermNumber};
pub use repo::booking_repo::{
    BookingRepoError, BookingRepoResult, BookingRepository, SqliteBookingRepository,
};
pub use repo::request_repo::{
    RequestRepoError, RequestRepoResult, RequestRepository, SqliteRequestRepository,
};
pub use repo::term_repo::{SqliteTermRepository, TermRepoError, TermRepoResult, TermRepository};
pub use service::booking_service::{BookingDetails, BookingService, BookingServiceError};
pub use service::term_service::{TermService, TermServiceError};
pub use service::term_validator::{validate_term, AcceptedTerm, TermField, TermViolation};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
