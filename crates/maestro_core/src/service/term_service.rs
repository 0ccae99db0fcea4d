//! School term use-case service.
//!
//! # Responsibility
//! - Gate every term write behind the scheduling validator.
//! - Provide CRUD entry points over the term repository.
//!
//! # Invariants
//! - The comparison snapshot and the write go through the same repository
//!   connection; a failed validation performs no store mutation at all.
//! - An edit validates against all terms except the one being edited, and
//!   never changes that term's identity.

use crate::model::term::{Term, TermDraft, TermId};
use crate::repo::term_repo::{TermRepoError, TermRepository};
use crate::service::term_validator::{validate_term, TermViolation};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from term service operations.
#[derive(Debug)]
pub enum TermServiceError {
    /// The proposed term failed validation; nothing was persisted.
    Rejected(Vec<TermViolation>),
    /// Target term does not exist.
    NotFound(TermId),
    /// Repository-level failure.
    Repo(TermRepoError),
}

impl Display for TermServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(violations) => {
                write!(f, "term rejected: ")?;
                for (index, violation) in violations.iter().enumerate() {
                    if index > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "[{}] {violation}", violation.field().as_str())?;
                }
                Ok(())
            }
            Self::NotFound(id) => write!(f, "school term not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TermServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TermRepoError> for TermServiceError {
    fn from(value: TermRepoError) -> Self {
        match value {
            TermRepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Validator-gated term CRUD facade.
pub struct TermService<R: TermRepository> {
    repo: R,
}

impl<R: TermRepository> TermService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a new term if it passes validation against all stored terms.
    pub fn create_term(&self, draft: &TermDraft) -> Result<Term, TermServiceError> {
        let existing = self.repo.list_terms()?;
        let accepted =
            validate_term(draft, &existing, None).map_err(TermServiceError::Rejected)?;

        let term = Term::new(accepted.number, accepted.start_date, accepted.end_date);
        self.repo.create_term(&term)?;
        Ok(term)
    }

    /// Replaces the values of an existing term if the new values pass
    /// validation against every other stored term.
    ///
    /// The term under edit is excluded from the comparison set, so an edit
    /// that only shifts within the term's own previous dates succeeds. On
    /// rejection the stored term is left exactly as it was.
    pub fn update_term(&self, id: TermId, draft: &TermDraft) -> Result<Term, TermServiceError> {
        self.repo
            .get_term(id)?
            .ok_or(TermServiceError::NotFound(id))?;

        let existing = self.repo.list_terms()?;
        let accepted =
            validate_term(draft, &existing, Some(id)).map_err(TermServiceError::Rejected)?;

        let term = Term::with_id(id, accepted.number, accepted.start_date, accepted.end_date);
        self.repo.update_term(&term)?;
        Ok(term)
    }

    /// Gets one term by ID.
    pub fn get_term(&self, id: TermId) -> Result<Option<Term>, TermServiceError> {
        self.repo.get_term(id).map_err(Into::into)
    }

    /// Lists all terms ordered by start date.
    pub fn list_terms(&self) -> Result<Vec<Term>, TermServiceError> {
        self.repo.list_terms().map_err(Into::into)
    }

    /// Deletes one term by ID.
    pub fn delete_term(&self, id: TermId) -> Result<(), TermServiceError> {
        self.repo.delete_term(id).map_err(Into::into)
    }
}
