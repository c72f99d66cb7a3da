//! Board controller: composition root presented by each department page.
//!
//! # Responsibility
//! - Resolve and render the active view through the department registry.
//! - Expose column/task/view mutations funneled through `BoardUpdates`.
//!
//! # Invariants
//! - The controller holds no persistence logic of its own.
//! - The selected view is transient and never written to storage.

pub mod board_controller;

pub use board_controller::{BoardController, ControllerError, ControllerResult};
