//! Key-value storage port for persisted board state.
//!
//! # Responsibility
//! - Define the synchronous `get/set/remove` contract the board store writes to.
//! - Own the persisted key layout for boards and task lists.
//!
//! # Invariants
//! - Board entries live under `dept-<name>-data`.
//! - Task lists live under `board-tasks-<boardId>`.
//! - Keys of different departments never overlap.

use crate::db::DbError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

static DEPARTMENT_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("valid department key regex"));

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage backend failure.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    InvalidKey(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidKey(key) => write!(f, "invalid storage key: `{key}`"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidKey(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Synchronous local key-value store.
///
/// Implementations must be usable through `&self`; single-threaded callers
/// own each store exclusively.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

/// Returns whether `name` is a valid bare department key (`sales`, `hr_ops`).
pub fn is_valid_department_key(name: &str) -> bool {
    DEPARTMENT_KEY_RE.is_match(name)
}

/// Board id for a department, e.g. `sales` -> `dept-sales`.
pub fn department_board_id(name: &str) -> String {
    format!("dept-{name}")
}

/// Storage key of the persisted board (without tasks).
pub fn board_storage_key(name: &str) -> String {
    format!("dept-{name}-data")
}

/// Storage key of the persisted task list of one board.
pub fn tasks_storage_key(board_id: &str) -> String {
    format!("board-tasks-{board_id}")
}
