//! Render-ready projections produced by view renderers.

use crate::i18n::{LocaleContext, TextDirection, Translator};
use crate::model::board::ColumnType;
use crate::model::task::TaskId;
use serde::Serialize;

/// Ambient collaborators passed to every renderer call.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub translator: &'a dyn Translator,
    pub locale: &'a LocaleContext,
}

impl<'a> RenderContext<'a> {
    pub fn new(translator: &'a dyn Translator, locale: &'a LocaleContext) -> Self {
        Self { translator, locale }
    }

    pub fn t(&self, key: &str) -> String {
        self.translator.translate(key)
    }

    pub fn direction(&self) -> TextDirection {
        self.locale.direction()
    }
}

/// Output of one view render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum RenderedView {
    Table(TableView),
    Kanban(KanbanView),
    Overview(OverviewView),
    Custom(CustomRender),
    Placeholder(PlaceholderView),
}

impl RenderedView {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    /// Short render kind, used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Table(_) => "table",
            Self::Kanban(_) => "kanban",
            Self::Overview(_) => "overview",
            Self::Custom(_) => "custom",
            Self::Placeholder(_) => "placeholder",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableHeader {
    pub column_id: String,
    pub title: String,
    pub kind: ColumnType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCell {
    pub column_id: String,
    /// Display text; empty when the task has no value for the column.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub task_id: TaskId,
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub direction: TextDirection,
    pub headers: Vec<TableHeader>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KanbanCard {
    pub task_id: TaskId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KanbanLane {
    /// Raw status value; `None` for the unassigned lane.
    pub status: Option<String>,
    pub title: String,
    pub cards: Vec<KanbanCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KanbanView {
    pub direction: TextDirection,
    /// Status column driving the lanes, if the board has one.
    pub group_column: Option<String>,
    pub lanes: Vec<KanbanLane>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnTotal {
    pub column_id: String,
    pub title: String,
    pub value: f64,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewView {
    pub direction: TextDirection,
    pub title: String,
    pub description: String,
    pub task_count: usize,
    pub status_counts: Vec<StatusCount>,
    pub totals: Vec<ColumnTotal>,
}

/// Opaque output of a department dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomRender {
    pub view_id: String,
    pub title: String,
    /// Dashboard-defined payload; the core never inspects it.
    pub payload: serde_json::Value,
}

impl CustomRender {
    pub fn new(
        view_id: impl Into<String>,
        title: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            view_id: view_id.into(),
            title: title.into(),
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceholderView {
    pub view_id: String,
    pub message: String,
}
