//! Board store: the authoritative in-memory board of one department.
//!
//! # Responsibility
//! - Reconcile persisted boards with the shipped department template.
//! - Validate, persist and apply every mutation in one synchronous step.
//!
//! # Invariants
//! - A failed write leaves the in-memory board unchanged.
//! - Corrupt persisted state is never surfaced as an error on load.
//!
//! # See also
//! - `merge` for the view-set reconciliation rule.

use crate::model::board::{Board, BoardPatch, BoardValidationError};
use crate::model::task::Task;
use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod board_store;
pub mod merge;

pub use board_store::{load_board, BoardStore};
pub use merge::{reconcile_views, MergeOutcome, DEPRECATED_VIEW_IDS};

pub type StoreResult<T> = Result<T, StoreError>;

/// Board store error for write paths and store construction.
#[derive(Debug)]
pub enum StoreError {
    InvalidDepartmentKey(String),
    Validation(BoardValidationError),
    Storage(StorageError),
    Serialization(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDepartmentKey(key) => write!(f, "invalid department key: `{key}`"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "failed to serialize board: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDepartmentKey(_) => None,
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Serialization(err) => Some(err),
        }
    }
}

impl From<BoardValidationError> for StoreError {
    fn from(value: BoardValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Update path the board controller funnels every mutation through.
///
/// `BoardStore` is the production implementation; hosts may wrap it to
/// observe updates.
pub trait BoardUpdates {
    fn board(&self) -> &Board;
    fn update_board(&mut self, patch: BoardPatch) -> StoreResult<&Board>;
    fn update_tasks(&mut self, tasks: Vec<Task>) -> StoreResult<&Board>;
}
