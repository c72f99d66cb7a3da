//! Per-department custom view registry.
//!
//! # Responsibility
//! - Map view ids to department-supplied dashboard renderers.
//! - Classify any view id as custom, built-in or unrecognized.
//!
//! # Invariants
//! - One registry per department; no global mutable table.
//! - Lookup never fails hard; unknown ids yield `ViewResolution::Unrecognized`.

use crate::model::board::Board;
use crate::view::builtin::BuiltinView;
use crate::view::render::{CustomRender, RenderContext};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Department dashboard contributed as a collaborator.
///
/// `render` may decline with `None`; the built-in view of the same id is
/// then used when one exists.
pub trait CustomView {
    fn view_id(&self) -> &str;
    fn render(&self, board: &Board, ctx: &RenderContext<'_>) -> Option<CustomRender>;
}

/// Adapter registering a closure as a custom view.
pub struct FnCustomView<F> {
    view_id: String,
    render: F,
}

impl<F> FnCustomView<F>
where
    F: Fn(&Board, &RenderContext<'_>) -> Option<CustomRender>,
{
    pub fn new(view_id: impl Into<String>, render: F) -> Self {
        Self {
            view_id: view_id.into(),
            render,
        }
    }
}

impl<F> CustomView for FnCustomView<F>
where
    F: Fn(&Board, &RenderContext<'_>) -> Option<CustomRender>,
{
    fn view_id(&self) -> &str {
        &self.view_id
    }

    fn render(&self, board: &Board, ctx: &RenderContext<'_>) -> Option<CustomRender> {
        (self.render)(board, ctx)
    }
}

/// Outcome of resolving one view id.
#[derive(Clone)]
pub enum ViewResolution {
    /// Department dashboard; may still defer to `builtin` when it declines.
    Custom {
        view: Rc<dyn CustomView>,
        builtin: Option<BuiltinView>,
    },
    Builtin(BuiltinView),
    Unrecognized,
}

impl ViewResolution {
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized)
    }
}

/// View registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewRegistryError {
    InvalidViewId(String),
    DuplicateViewId(String),
}

impl Display for ViewRegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidViewId(value) => write!(f, "view id is invalid: {value}"),
            Self::DuplicateViewId(value) => write!(f, "view id already registered: {value}"),
        }
    }
}

impl Error for ViewRegistryError {}

/// Custom dashboards of one department, keyed by view id.
#[derive(Default)]
pub struct ViewRegistry {
    views: BTreeMap<String, Rc<dyn CustomView>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one custom view.
    ///
    /// Ids equal to a built-in id are allowed and take precedence over it.
    pub fn register(&mut self, view: Rc<dyn CustomView>) -> Result<(), ViewRegistryError> {
        let view_id = view.view_id().trim().to_string();
        if !is_valid_view_id(&view_id) {
            return Err(ViewRegistryError::InvalidViewId(view_id));
        }
        if self.views.contains_key(view_id.as_str()) {
            return Err(ViewRegistryError::DuplicateViewId(view_id));
        }

        self.views.insert(view_id, view);
        Ok(())
    }

    /// Registers a closure under `view_id`.
    pub fn register_fn<F>(
        &mut self,
        view_id: impl Into<String>,
        render: F,
    ) -> Result<(), ViewRegistryError>
    where
        F: Fn(&Board, &RenderContext<'_>) -> Option<CustomRender> + 'static,
    {
        self.register(Rc::new(FnCustomView::new(view_id, render)))
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Returns sorted custom view ids.
    pub fn view_ids(&self) -> Vec<String> {
        self.views.keys().cloned().collect()
    }

    pub fn get(&self, view_id: &str) -> Option<Rc<dyn CustomView>> {
        self.views.get(view_id.trim()).cloned()
    }

    /// Classifies `view_id`: custom first, then built-in.
    pub fn resolve(&self, view_id: &str) -> ViewResolution {
        let builtin = BuiltinView::from_id(view_id.trim());
        match (self.get(view_id), builtin) {
            (Some(view), builtin) => ViewResolution::Custom { view, builtin },
            (None, Some(builtin)) => ViewResolution::Builtin(builtin),
            (None, None) => ViewResolution::Unrecognized,
        }
    }

    /// Resolves `view_id`, degrading to the board's default view when the id
    /// is unknown to this department.
    ///
    /// Returns the id that was actually resolved alongside the resolution.
    pub fn resolve_or_default<'b>(
        &self,
        view_id: &'b str,
        board: &'b Board,
    ) -> (&'b str, ViewResolution) {
        let resolution = self.resolve(view_id);
        if resolution.is_recognized() {
            return (view_id, resolution);
        }
        (board.default_view.as_str(), self.resolve(&board.default_view))
    }

    /// Renders a registered custom view; `None` when unregistered or declined.
    pub fn render_custom(
        &self,
        view_id: &str,
        board: &Board,
        ctx: &RenderContext<'_>,
    ) -> Option<CustomRender> {
        self.get(view_id)?.render(board, ctx)
    }
}

fn is_valid_view_id(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::{ViewRegistry, ViewRegistryError, ViewResolution};
    use crate::i18n::{LocaleContext, RawKeyTranslator};
    use crate::model::board::Board;
    use crate::view::builtin::BuiltinView;
    use crate::view::render::{CustomRender, RenderContext};

    fn insights(board: &Board, _ctx: &RenderContext<'_>) -> Option<CustomRender> {
        Some(CustomRender::new(
            "sales_insights",
            "Insights",
            serde_json::json!({ "tasks": board.tasks.len() }),
        ))
    }

    #[test]
    fn resolves_custom_builtin_and_unknown_ids() {
        let mut registry = ViewRegistry::new();
        registry
            .register_fn("sales_insights", insights)
            .expect("custom view should register");

        assert!(matches!(
            registry.resolve("sales_insights"),
            ViewResolution::Custom { builtin: None, .. }
        ));
        assert!(matches!(
            registry.resolve("table"),
            ViewResolution::Builtin(BuiltinView::Table)
        ));
        assert!(matches!(
            registry.resolve("nonexistent_id"),
            ViewResolution::Unrecognized
        ));
    }

    #[test]
    fn rejects_invalid_or_duplicate_ids() {
        let mut registry = ViewRegistry::new();
        let invalid = registry.register_fn("Sales Insights", insights);
        assert!(matches!(invalid, Err(ViewRegistryError::InvalidViewId(_))));
        let blank = registry.register_fn("   ", insights);
        assert!(matches!(blank, Err(ViewRegistryError::InvalidViewId(_))));

        registry
            .register_fn("sales_insights", insights)
            .expect("first registration should succeed");
        let duplicate = registry.register_fn("sales_insights", insights);
        assert!(matches!(
            duplicate,
            Err(ViewRegistryError::DuplicateViewId(_))
        ));
    }

    #[test]
    fn custom_view_may_shadow_builtin_id() {
        let mut registry = ViewRegistry::new();
        registry
            .register_fn("overview", |_, _| None)
            .expect("shadowing a built-in id is allowed");
        assert!(matches!(
            registry.resolve("overview"),
            ViewResolution::Custom {
                builtin: Some(BuiltinView::Overview),
                ..
            }
        ));
    }

    #[test]
    fn unknown_id_degrades_to_board_default() {
        let registry = ViewRegistry::new();
        let board = Board::new("dept-ops", "Operations", "kanban");
        let (resolved_id, resolution) = registry.resolve_or_default("retired_view", &board);
        assert_eq!(resolved_id, "kanban");
        assert!(matches!(
            resolution,
            ViewResolution::Builtin(BuiltinView::Kanban)
        ));
    }

    #[test]
    fn render_custom_returns_collaborator_payload() {
        let mut registry = ViewRegistry::new();
        registry
            .register_fn("sales_insights", insights)
            .expect("custom view should register");
        let board = Board::new("dept-sales", "Sales", "overview");
        let locale = LocaleContext::default();
        let ctx = RenderContext::new(&RawKeyTranslator, &locale);

        let rendered = registry
            .render_custom("sales_insights", &board, &ctx)
            .expect("custom render");
        assert_eq!(rendered.payload["tasks"], 0);
        assert!(registry.render_custom("table", &board, &ctx).is_none());
    }
}
