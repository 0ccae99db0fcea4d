//! School term domain model.
//!
//! # Responsibility
//! - Define the canonical term record framing the academic calendar.
//! - Map term ordinals between their integer meaning and word-label storage
//!   form.
//!
//! # Invariants
//! - `uuid` is stable across edits and never reused for another term.
//! - `start_date < end_date` for every persisted term; cross-term invariants
//!   (no overlap, August blackout, number uniqueness per academic year) are
//!   enforced by the term validator before any write.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a school term.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TermId = Uuid;

/// Ordinal of a term within one academic year.
///
/// The school year holds at most six terms. The word label (`"one"`..`"six"`)
/// is the storage and wire form; ordering and uniqueness comparisons use the
/// integer meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermNumber {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
}

impl TermNumber {
    /// All term numbers in ascending order.
    pub const ALL: [TermNumber; 6] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
    ];

    /// Integer position 1..=6 of this term within the academic year.
    pub fn as_ordinal(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
        }
    }

    /// Converts an integer position 1..=6 back to a term number.
    pub fn from_ordinal(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            4 => Some(Self::Four),
            5 => Some(Self::Five),
            6 => Some(Self::Six),
            _ => None,
        }
    }

    /// Stable word label used for storage and wire formats.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::One => "one",
            Self::Two => "two",
            Self::Three => "three",
            Self::Four => "four",
            Self::Five => "five",
            Self::Six => "six",
        }
    }

    /// Parses a word label back to a term number.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "one" => Some(Self::One),
            "two" => Some(Self::Two),
            "three" => Some(Self::Three),
            "four" => Some(Self::Four),
            "five" => Some(Self::Five),
            "six" => Some(Self::Six),
            _ => None,
        }
    }
}

impl Display for TermNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical persisted record for one school term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Stable global ID, assigned at creation and unchanged by edits.
    pub uuid: TermId,
    /// Position of this term within its academic year.
    pub number: TermNumber,
    /// First day of the term (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the term (inclusive). Strictly after `start_date`.
    pub end_date: NaiveDate,
}

impl Term {
    /// Creates a term with a generated stable ID.
    pub fn new(number: TermNumber, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self::with_id(Uuid::new_v4(), number, start_date, end_date)
    }

    /// Creates a term with a caller-provided stable ID.
    ///
    /// Used by edit paths where identity already exists.
    pub fn with_id(
        uuid: TermId,
        number: TermNumber,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            uuid,
            number,
            start_date,
            end_date,
        }
    }
}

/// Unvalidated term submission, shaped like the form it arrives on.
///
/// Every field is optional; the validator reports one `required` violation
/// per missing field before any scheduling rule is evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermDraft {
    pub number: Option<TermNumber>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl TermDraft {
    /// Builds a draft with all three fields present.
    pub fn filled(number: TermNumber, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            number: Some(number),
            start_date: Some(start_date),
            end_date: Some(end_date),
        }
    }
}

impl From<&Term> for TermDraft {
    fn from(term: &Term) -> Self {
        Self::filled(term.number, term.start_date, term.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::TermNumber;

    #[test]
    fn ordinals_and_labels_are_consistent() {
        for (index, number) in TermNumber::ALL.iter().enumerate() {
            assert_eq!(number.as_ordinal() as usize, index + 1);
            assert_eq!(TermNumber::from_ordinal(number.as_ordinal()), Some(*number));
            assert_eq!(TermNumber::parse(number.as_str()), Some(*number));
        }
    }

    #[test]
    fn out_of_range_ordinals_are_rejected() {
        assert_eq!(TermNumber::from_ordinal(0), None);
        assert_eq!(TermNumber::from_ordinal(7), None);
        assert_eq!(TermNumber::parse("seven"), None);
    }
}
