//! View layer: built-in renderers, per-department custom view registry and
//! the "Add View" section index.
//!
//! # Responsibility
//! - Turn a `Board` into a render-ready projection for one view id.
//! - Keep custom dashboards pluggable per department.
//!
//! # Invariants
//! - Rendering never fails; unknown ids produce a placeholder.
//! - Renderers never mutate the board.

pub mod builtin;
pub mod registry;
pub mod render;
pub mod sections;

pub use builtin::{BuiltinView, VIEW_KANBAN, VIEW_OVERVIEW, VIEW_TABLE};
pub use registry::{CustomView, FnCustomView, ViewRegistry, ViewRegistryError, ViewResolution};
pub use render::{
    ColumnTotal, CustomRender, KanbanCard, KanbanLane, KanbanView, OverviewView, PlaceholderView,
    RenderContext, RenderedView, StatusCount, TableCell, TableHeader, TableRow, TableView,
};
pub use sections::{
    DashboardOption, DashboardOptionDecl, DashboardSection, DashboardSectionDecl,
    DashboardSectionIndex,
};
