//! Generic department wiring: one config, one store, one controller.
//!
//! # Responsibility
//! - Capture what differs per department (key, template, menu, deny-list).
//! - Build the store/controller pair the same way for every department.

pub mod catalog;

use crate::controller::BoardController;
use crate::i18n::{LocaleContext, Translator};
use crate::model::board::Board;
use crate::storage::{department_board_id, KeyValueStore};
use crate::store::merge::default_deprecations;
use crate::store::{BoardStore, StoreResult};
use crate::view::{DashboardSectionDecl, DashboardSectionIndex, ViewRegistry};
use std::rc::Rc;

/// Static configuration of one department page.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentConfig {
    /// Bare department key, e.g. `sales`.
    pub key: String,
    pub template: Board,
    pub sections: Vec<DashboardSectionDecl>,
    pub deprecated_views: Vec<String>,
}

impl DepartmentConfig {
    /// Creates a config using the built-in deprecation deny-list.
    pub fn new(key: impl Into<String>, template: Board) -> Self {
        Self {
            key: key.into(),
            template,
            sections: Vec::new(),
            deprecated_views: default_deprecations(),
        }
    }

    pub fn with_sections(mut self, sections: Vec<DashboardSectionDecl>) -> Self {
        self.sections = sections;
        self
    }

    pub fn with_deprecated_views(mut self, deprecated: Vec<String>) -> Self {
        self.deprecated_views = deprecated;
        self
    }

    /// Board id this department's template is expected to carry.
    pub fn board_id(&self) -> String {
        department_board_id(&self.key)
    }
}

/// Opens the store for `config` and wraps it in a controller.
///
/// # Errors
/// - Returns store construction errors (invalid key or template).
pub fn open_department<S: KeyValueStore>(
    storage: S,
    config: DepartmentConfig,
    registry: ViewRegistry,
    translator: Rc<dyn Translator>,
    locale: LocaleContext,
) -> StoreResult<BoardController<BoardStore<S>>> {
    let DepartmentConfig {
        key,
        template,
        sections,
        deprecated_views,
    } = config;
    let store = BoardStore::open_with_deprecations(storage, &key, template, deprecated_views)?;
    Ok(BoardController::new(store, registry, translator, locale)
        .with_sections(DashboardSectionIndex::new(sections)))
}
