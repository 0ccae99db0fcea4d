//! School term scheduling validator.
//!
//! # Responsibility
//! - Decide whether a proposed term may join the existing term set.
//! - Report every independent violation at once, tagged with the form field
//!   it belongs to.
//!
//! # Invariants
//! - Pure: reads only its inputs, never storage, never global state.
//! - A candidate is never compared against the term identified by `exclude`.
//! - The August blackout makes the academic-year classification moot, so the
//!   duplicate-number check is skipped when the blackout fires.

use crate::model::term::{Term, TermDraft, TermId, TermNumber};
use chrono::{Datelike, NaiveDate};
use std::fmt::{Display, Formatter};

/// Form field a violation is reported against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermField {
    Number,
    StartDate,
    EndDate,
}

impl TermField {
    /// Stable field name matching the submission form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
        }
    }
}

/// One reason a proposed term was rejected.
///
/// The `Display` strings are part of the contract with the presentation
/// layer and are asserted verbatim by tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermViolation {
    /// `number` was not supplied.
    MissingNumber,
    /// `start_date` was not supplied.
    MissingStartDate,
    /// `end_date` was not supplied.
    MissingEndDate,
    /// `end_date` is on or before `start_date`.
    EndNotAfterStart,
    /// The candidate interval overlaps at least one existing term.
    OverlapsExistingTerm,
    /// The candidate interval satisfies the August blackout predicate.
    AugustBlackout,
    /// Another term in the same academic year already holds this number.
    DuplicateNumber(TermNumber),
}

impl TermViolation {
    /// Field this violation is reported against.
    pub fn field(&self) -> TermField {
        match self {
            Self::MissingNumber | Self::DuplicateNumber(_) => TermField::Number,
            Self::MissingStartDate | Self::OverlapsExistingTerm | Self::AugustBlackout => {
                TermField::StartDate
            }
            Self::MissingEndDate | Self::EndNotAfterStart => TermField::EndDate,
        }
    }
}

impl Display for TermViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingNumber | Self::MissingStartDate | Self::MissingEndDate => {
                write!(f, "This field is required.")
            }
            Self::EndNotAfterStart => {
                write!(f, "End date should be greater than the start date.")
            }
            Self::OverlapsExistingTerm => write!(f, "Term dates cannot overlap."),
            Self::AugustBlackout => write!(
                f,
                "There should not be a school term in August. The academic school year starts in September and ends in July."
            ),
            Self::DuplicateNumber(number) => {
                write!(f, "Term {number} already exists for this academic year.")
            }
        }
    }
}

/// Field values of a candidate that passed every check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptedTerm {
    pub number: TermNumber,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Validates a proposed term against the existing term set.
///
/// `exclude` names the term being edited, if any; it is filtered out of the
/// comparison set so a term is never rejected against its own prior values.
///
/// Missing required fields are reported alone; with all fields present, the
/// rule checks run in order and their violations aggregate, except that the
/// August blackout suppresses the duplicate-number check.
pub fn validate_term(
    draft: &TermDraft,
    existing_terms: &[Term],
    exclude: Option<TermId>,
) -> Result<AcceptedTerm, Vec<TermViolation>> {
    let (number, start_date, end_date) =
        match (draft.number, draft.start_date, draft.end_date) {
            (Some(number), Some(start_date), Some(end_date)) => (number, start_date, end_date),
            (number, start_date, end_date) => {
                let mut violations = Vec::new();
                if number.is_none() {
                    violations.push(TermViolation::MissingNumber);
                }
                if start_date.is_none() {
                    violations.push(TermViolation::MissingStartDate);
                }
                if end_date.is_none() {
                    violations.push(TermViolation::MissingEndDate);
                }
                return Err(violations);
            }
        };

    let others: Vec<&Term> = existing_terms
        .iter()
        .filter(|term| exclude != Some(term.uuid))
        .collect();

    let mut violations = Vec::new();

    if end_date <= start_date {
        violations.push(TermViolation::EndNotAfterStart);
    }

    let overlaps = others
        .iter()
        .any(|term| term.end_date >= start_date && term.start_date <= end_date);
    if overlaps {
        violations.push(TermViolation::OverlapsExistingTerm);
    }

    if start_date.month() <= 8 && end_date.month() >= 8 {
        violations.push(TermViolation::AugustBlackout);
    } else {
        let duplicate = others.iter().any(|term| {
            term.number == number && same_academic_year(term.start_date, start_date)
        });
        if duplicate {
            violations.push(TermViolation::DuplicateNumber(number));
        }
    }

    if violations.is_empty() {
        Ok(AcceptedTerm {
            number,
            start_date,
            end_date,
        })
    } else {
        Err(violations)
    }
}

/// Whether a term starting on this date opens in the autumn half of the
/// academic year (September through December).
fn starts_in_autumn(start_date: NaiveDate) -> bool {
    start_date.month() >= 9
}

/// Whether two term start dates fall in the same academic year.
///
/// The academic year runs September through the following July: an autumn
/// start belongs to its own calendar year, a January-through-July start to
/// the year before it.
fn same_academic_year(existing_start: NaiveDate, candidate_start: NaiveDate) -> bool {
    match (starts_in_autumn(existing_start), starts_in_autumn(candidate_start)) {
        (true, true) | (false, false) => existing_start.year() == candidate_start.year(),
        (true, false) => existing_start.year() + 1 == candidate_start.year(),
        (false, true) => existing_start.year() - 1 == candidate_start.year(),
    }
}

#[cfg(test)]
mod tests {
    use super::{same_academic_year, starts_in_autumn};
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn autumn_classification_splits_at_september() {
        assert!(starts_in_autumn(date(2022, 9, 1)));
        assert!(starts_in_autumn(date(2022, 12, 31)));
        assert!(!starts_in_autumn(date(2023, 1, 1)));
        assert!(!starts_in_autumn(date(2023, 7, 15)));
    }

    #[test]
    fn autumn_and_spring_halves_of_one_academic_year_match() {
        // 2022/23 academic year: Sept 2022 start vs Jan 2023 start.
        assert!(same_academic_year(date(2022, 9, 1), date(2023, 1, 4)));
        assert!(same_academic_year(date(2023, 1, 4), date(2022, 9, 1)));
    }

    #[test]
    fn same_half_requires_same_calendar_year() {
        assert!(same_academic_year(date(2022, 9, 1), date(2022, 10, 31)));
        assert!(same_academic_year(date(2023, 1, 4), date(2023, 4, 17)));
        assert!(!same_academic_year(date(2022, 9, 1), date(2023, 9, 1)));
        assert!(!same_academic_year(date(2023, 1, 4), date(2024, 1, 4)));
    }

    #[test]
    fn adjacent_academic_years_do_not_match() {
        // Jan 2023 (year 2022/23) vs Sept 2023 (year 2023/24).
        assert!(!same_academic_year(date(2023, 1, 4), date(2023, 9, 1)));
        assert!(!same_academic_year(date(2023, 9, 1), date(2023, 1, 4)));
    }
}
