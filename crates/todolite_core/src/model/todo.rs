//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical todo record and its write payload.
//! - Provide validation helpers shared by every write path.
//!
//! # Invariants
//! - `id` is assigned by the store exactly once and never changes.
//! - `title` is never empty or whitespace-only.
//! - `created_date <= updated_date` at all times.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier assigned by the store on creation.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Backed by the SQLite rowid, which is monotonic and never reused.
pub type TodoId = i64;

/// Canonical todo record as persisted and served over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Store-assigned integer primary key.
    pub id: TodoId,
    /// Task description. Never empty.
    pub title: String,
    /// Completion flag. Defaults to `false` at creation.
    pub completed: bool,
    /// Unix epoch milliseconds. Set once at creation, immutable.
    pub created_date: i64,
    /// Unix epoch milliseconds. Refreshed on every successful update.
    pub updated_date: i64,
}

/// Mutable payload shared by create and full-replace update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    pub title: String,
    pub completed: bool,
}

/// Validation failure for todo field contracts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    /// `title` was empty or contained only whitespace.
    EmptyTitle,
    /// Persisted timestamps violate `created_date <= updated_date`.
    TimestampOrder { created_date: i64, updated_date: i64 },
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TimestampOrder {
                created_date,
                updated_date,
            } => write!(
                f,
                "created_date {created_date} is later than updated_date {updated_date}"
            ),
        }
    }
}

impl Error for TodoValidationError {}

impl TodoDraft {
    /// Creates a draft without validating it.
    ///
    /// Write paths must call [`TodoDraft::validate`] before persisting.
    pub fn new(title: impl Into<String>, completed: bool) -> Self {
        Self {
            title: title.into(),
            completed,
        }
    }

    /// Checks field contracts for a write payload.
    ///
    /// # Errors
    /// - [`TodoValidationError::EmptyTitle`] when `title` trims to nothing.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.title.trim().is_empty() {
            return Err(TodoValidationError::EmptyTitle);
        }
        Ok(())
    }
}

impl Todo {
    /// Checks field contracts for a full record.
    ///
    /// Read paths use this to reject invalid persisted state instead of
    /// masking it.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.title.trim().is_empty() {
            return Err(TodoValidationError::EmptyTitle);
        }
        if self.created_date > self.updated_date {
            return Err(TodoValidationError::TimestampOrder {
                created_date: self.created_date,
                updated_date: self.updated_date,
            });
        }
        Ok(())
    }
}
