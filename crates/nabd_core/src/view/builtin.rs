//! Generic renderers shared by every department.
//!
//! # Responsibility
//! - Project a board into table, kanban and overview shapes.
//! - Localize column titles and status labels at render time.
//!
//! # Invariants
//! - Column order in table output equals `Board::columns` order.
//! - Kanban lane order is the first-appearance order of status values.

use crate::i18n::locale::format_decimal;
use crate::model::board::{Board, Column, ColumnType};
use crate::model::task::{Task, TaskValue};
use crate::view::render::{
    ColumnTotal, KanbanCard, KanbanLane, KanbanView, OverviewView, RenderContext, RenderedView,
    StatusCount, TableCell, TableHeader, TableRow, TableView,
};

pub const VIEW_TABLE: &str = "table";
pub const VIEW_KANBAN: &str = "kanban";
pub const VIEW_OVERVIEW: &str = "overview";

const UNASSIGNED_LANE_KEY: &str = "views.kanban.unassigned";
const ALL_TASKS_LANE_KEY: &str = "views.kanban.all";

/// View implemented generically by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinView {
    Table,
    Kanban,
    Overview,
}

impl BuiltinView {
    pub const ALL: [BuiltinView; 3] = [Self::Table, Self::Kanban, Self::Overview];

    pub fn id(self) -> &'static str {
        match self {
            Self::Table => VIEW_TABLE,
            Self::Kanban => VIEW_KANBAN,
            Self::Overview => VIEW_OVERVIEW,
        }
    }

    pub fn from_id(view_id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|view| view.id() == view_id)
    }

    pub fn render(self, board: &Board, ctx: &RenderContext<'_>) -> RenderedView {
        match self {
            Self::Table => RenderedView::Table(render_table(board, ctx)),
            Self::Kanban => RenderedView::Kanban(render_kanban(board, ctx)),
            Self::Overview => RenderedView::Overview(render_overview(board, ctx)),
        }
    }
}

fn render_table(board: &Board, ctx: &RenderContext<'_>) -> TableView {
    let headers = board
        .columns
        .iter()
        .map(|column| TableHeader {
            column_id: column.id.clone(),
            title: ctx.t(&column.title),
            kind: column.kind,
        })
        .collect();

    let rows = board
        .tasks
        .iter()
        .map(|task| TableRow {
            task_id: task.id,
            cells: board
                .columns
                .iter()
                .map(|column| TableCell {
                    column_id: column.id.clone(),
                    text: task
                        .value(&column.id)
                        .map(|value| format_cell(column, value, ctx))
                        .unwrap_or_default(),
                })
                .collect(),
        })
        .collect();

    TableView {
        direction: ctx.direction(),
        headers,
        rows,
    }
}

fn render_kanban(board: &Board, ctx: &RenderContext<'_>) -> KanbanView {
    let Some(status_column) = board.status_column() else {
        return KanbanView {
            direction: ctx.direction(),
            group_column: None,
            lanes: vec![KanbanLane {
                status: None,
                title: ctx.t(ALL_TASKS_LANE_KEY),
                cards: board.tasks.iter().map(|task| card_for(board, task)).collect(),
            }],
        };
    };

    let mut lanes: Vec<KanbanLane> = Vec::new();
    let mut unassigned: Vec<KanbanCard> = Vec::new();
    for task in &board.tasks {
        let card = card_for(board, task);
        let Some(status) = task.value(&status_column.id).and_then(TaskValue::as_status) else {
            unassigned.push(card);
            continue;
        };
        match lanes
            .iter_mut()
            .find(|lane| lane.status.as_deref() == Some(status))
        {
            Some(lane) => lane.cards.push(card),
            None => lanes.push(KanbanLane {
                status: Some(status.to_string()),
                title: status_label(status, ctx),
                cards: vec![card],
            }),
        }
    }
    if !unassigned.is_empty() {
        lanes.push(KanbanLane {
            status: None,
            title: ctx.t(UNASSIGNED_LANE_KEY),
            cards: unassigned,
        });
    }

    KanbanView {
        direction: ctx.direction(),
        group_column: Some(status_column.id.clone()),
        lanes,
    }
}

fn render_overview(board: &Board, ctx: &RenderContext<'_>) -> OverviewView {
    let mut status_counts: Vec<StatusCount> = Vec::new();
    if let Some(status_column) = board.status_column() {
        for status in board
            .tasks
            .iter()
            .filter_map(|task| task.value(&status_column.id))
            .filter_map(TaskValue::as_status)
        {
            match status_counts.iter_mut().find(|entry| entry.status == status) {
                Some(entry) => entry.count += 1,
                None => status_counts.push(StatusCount {
                    status: status.to_string(),
                    label: status_label(status, ctx),
                    count: 1,
                }),
            }
        }
    }

    let totals = board
        .columns
        .iter()
        .filter(|column| column.kind.is_numeric())
        .map(|column| {
            let value: f64 = board
                .tasks
                .iter()
                .filter_map(|task| task.value(&column.id))
                .filter_map(TaskValue::as_number)
                .sum();
            ColumnTotal {
                column_id: column.id.clone(),
                title: ctx.t(&column.title),
                value,
                display: format_number(column.kind, value, ctx),
            }
        })
        .collect();

    OverviewView {
        direction: ctx.direction(),
        title: ctx.t(&board.name),
        description: ctx.t(&board.description),
        task_count: board.tasks.len(),
        status_counts,
        totals,
    }
}

fn card_for(board: &Board, task: &Task) -> KanbanCard {
    let title = board
        .columns
        .iter()
        .filter(|column| column.kind == ColumnType::Text)
        .find_map(|column| match task.value(&column.id) {
            Some(TaskValue::Text(text)) if !text.trim().is_empty() => Some(text.clone()),
            _ => None,
        })
        .unwrap_or_else(|| task.id.to_string());
    KanbanCard {
        task_id: task.id,
        title,
    }
}

fn format_cell(column: &Column, value: &TaskValue, ctx: &RenderContext<'_>) -> String {
    match value {
        TaskValue::Text(text) | TaskValue::Person(text) | TaskValue::Date(text) => text.clone(),
        TaskValue::Status(status) => status_label(status, ctx),
        TaskValue::Number(number) => format_number(column.kind, *number, ctx),
    }
}

fn format_number(kind: ColumnType, value: f64, ctx: &RenderContext<'_>) -> String {
    if kind == ColumnType::Currency {
        return ctx.locale.format_money(value);
    }
    let precision = if value.fract() == 0.0 { 0 } else { 2 };
    format_decimal(value, precision)
}

/// Translates `status.<value>`; untranslated statuses show the raw value.
fn status_label(status: &str, ctx: &RenderContext<'_>) -> String {
    let key = format!("status.{status}");
    let label = ctx.t(&key);
    if label == key {
        status.to_string()
    } else {
        label
    }
}
