//! Board/View core for Nabd department workspaces.
//! This crate is the single source of truth for board invariants, view-set
//! reconciliation and view dispatch.

pub mod controller;
pub mod db;
pub mod department;
pub mod i18n;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;
pub mod view;

pub use controller::{BoardController, ControllerError, ControllerResult};
pub use department::{catalog, open_department, DepartmentConfig};
pub use i18n::{
    Language, LocaleContext, RawKeyTranslator, StaticTranslator, TextDirection, Translator,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::board::{Board, BoardPatch, BoardValidationError, Column, ColumnType};
pub use model::task::{Task, TaskId, TaskValue};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};
pub use store::{
    load_board, BoardStore, BoardUpdates, StoreError, StoreResult, DEPRECATED_VIEW_IDS,
};
pub use view::{
    BuiltinView, CustomRender, CustomView, DashboardOptionDecl, DashboardSection,
    DashboardSectionDecl, DashboardSectionIndex, RenderContext, RenderedView, ViewRegistry,
    ViewResolution,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
