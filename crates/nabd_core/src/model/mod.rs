//! Board entity model shared by every department workspace.
//!
//! # Responsibility
//! - Define the serializable `Board`, `Column` and `Task` shapes.
//! - Provide write-time validation used by the board store.
//!
//! # Invariants
//! - `Board::default_view` is always a member of `Board::available_views`.
//! - Column ids are unique within one board.
//! - Task values reference existing columns and match the column type.

pub mod board;
pub mod task;
