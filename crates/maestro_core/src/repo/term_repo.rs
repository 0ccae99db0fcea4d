//! School term repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD persistence for school terms.
//! - Map term numbers between enum values and stored word labels.
//!
//! # Invariants
//! - Listing order is deterministic: `start_date ASC, uuid ASC`.
//! - Scheduling rules are NOT enforced here; writes are gated by the term
//!   validator in the service layer.

use crate::db::DbError;
use crate::model::term::{Term, TermId, TermNumber};
use crate::repo::{date_to_db, parse_date};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TERM_SELECT_SQL: &str = "SELECT
    uuid,
    term_number,
    start_date,
    end_date
FROM school_terms";

pub type TermRepoResult<T> = Result<T, TermRepoError>;

/// Errors from school term persistence operations.
#[derive(Debug)]
pub enum TermRepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Target term does not exist.
    NotFound(TermId),
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for TermRepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "school term not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted term data: {message}"),
        }
    }
}

impl Error for TermRepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for TermRepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for TermRepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for school term CRUD operations.
///
/// This is the store boundary the term service validates against: callers
/// snapshot `list_terms()` before deciding whether a write may proceed.
pub trait TermRepository {
    fn create_term(&self, term: &Term) -> TermRepoResult<TermId>;
    fn update_term(&self, term: &Term) -> TermRepoResult<()>;
    fn get_term(&self, id: TermId) -> TermRepoResult<Option<Term>>;
    fn list_terms(&self) -> TermRepoResult<Vec<Term>>;
    fn delete_term(&self, id: TermId) -> TermRepoResult<()>;
}

/// SQLite-backed school term repository.
pub struct SqliteTermRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTermRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TermRepository for SqliteTermRepository<'_> {
    fn create_term(&self, term: &Term) -> TermRepoResult<TermId> {
        self.conn.execute(
            "INSERT INTO school_terms (uuid, term_number, start_date, end_date)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                term.uuid.to_string(),
                term.number.as_str(),
                date_to_db(term.start_date),
                date_to_db(term.end_date),
            ],
        )?;

        Ok(term.uuid)
    }

    fn update_term(&self, term: &Term) -> TermRepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE school_terms
             SET
                term_number = ?1,
                start_date = ?2,
                end_date = ?3
             WHERE uuid = ?4;",
            params![
                term.number.as_str(),
                date_to_db(term.start_date),
                date_to_db(term.end_date),
                term.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(TermRepoError::NotFound(term.uuid));
        }

        Ok(())
    }

    fn get_term(&self, id: TermId) -> TermRepoResult<Option<Term>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TERM_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_term_row(row)?));
        }

        Ok(None)
    }

    fn list_terms(&self) -> TermRepoResult<Vec<Term>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TERM_SELECT_SQL} ORDER BY start_date ASC, uuid ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut terms = Vec::new();

        while let Some(row) = rows.next()? {
            terms.push(parse_term_row(row)?);
        }

        Ok(terms)
    }

    fn delete_term(&self, id: TermId) -> TermRepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM school_terms WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(TermRepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_term_row(row: &Row<'_>) -> TermRepoResult<Term> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        TermRepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in school_terms.uuid"))
    })?;

    let number_text: String = row.get("term_number")?;
    let number = TermNumber::parse(&number_text).ok_or_else(|| {
        TermRepoError::InvalidData(format!(
            "invalid term number `{number_text}` in school_terms.term_number"
        ))
    })?;

    let start_text: String = row.get("start_date")?;
    let start_date = parse_date(&start_text).ok_or_else(|| {
        TermRepoError::InvalidData(format!(
            "invalid date `{start_text}` in school_terms.start_date"
        ))
    })?;

    let end_text: String = row.get("end_date")?;
    let end_date = parse_date(&end_text).ok_or_else(|| {
        TermRepoError::InvalidData(format!("invalid date `{end_text}` in school_terms.end_date"))
    })?;

    Ok(Term {
        uuid,
        number,
        start_date,
        end_date,
    })
}
