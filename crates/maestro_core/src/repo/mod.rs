//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per aggregate.
//! - Keep SQL and column mapping details out of the service layer.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `InvalidData`) in
//!   addition to DB transport errors.
//! - Dates are persisted as ISO-8601 text (`YYYY-MM-DD`), times as `HH:MM`.

use chrono::{NaiveDate, NaiveTime};

pub mod booking_repo;
pub mod request_repo;
pub mod term_repo;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

pub(crate) fn date_to_db(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

pub(crate) fn time_to_db(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub(crate) fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::{date_to_db, parse_date, parse_time, time_to_db};
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn dates_round_trip_through_iso_text() {
        let date = NaiveDate::from_ymd_opt(2022, 9, 1).unwrap();
        assert_eq!(date_to_db(date), "2022-09-01");
        assert_eq!(parse_date("2022-09-01"), Some(date));
        assert_eq!(parse_date("01/09/2022"), None);
    }

    #[test]
    fn times_round_trip_through_hh_mm_text() {
        let time = NaiveTime::from_hms_opt(16, 30, 0).unwrap();
        assert_eq!(time_to_db(time), "16:30");
        assert_eq!(parse_time("16:30"), Some(time));
        assert_eq!(parse_time("late"), None);
    }
}
