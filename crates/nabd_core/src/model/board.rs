//! Board and column domain model.
//!
//! # Responsibility
//! - Define the department workspace record and its column schema.
//! - Define the shallow top-level patch applied by the board store.
//! - Validate write-side invariants before anything is persisted.
//!
//! # Invariants
//! - `id` is stable for the lifetime of a department (e.g. `dept-sales`).
//! - `default_view` must be contained in `available_views`.
//! - `columns` keep insertion order; ids are unique.

use crate::model::task::{Task, TaskId, TaskValue};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

static ISO_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("valid date regex")
});

/// Schema type of one column; decides how renderers read task values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Text,
    Status,
    Person,
    Date,
    Number,
    /// Numeric amount formatted with the active currency.
    Currency,
}

impl ColumnType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Status => "status",
            Self::Person => "person",
            Self::Date => "date",
            Self::Number => "number",
            Self::Currency => "currency",
        }
    }

    /// Returns whether `value` may be stored in a column of this type.
    pub fn accepts(self, value: &TaskValue) -> bool {
        matches!(
            (self, value),
            (Self::Text, TaskValue::Text(_))
                | (Self::Status, TaskValue::Status(_))
                | (Self::Person, TaskValue::Person(_))
                | (Self::Date, TaskValue::Date(_))
                | (Self::Number, TaskValue::Number(_))
                | (Self::Currency, TaskValue::Number(_))
        )
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Number | Self::Currency)
    }
}

/// One schema field of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    /// Display label or translation key; localized at render time.
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ColumnType,
}

impl Column {
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: ColumnType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
        }
    }
}

/// One department's workspace: schema, work items and view configuration.
///
/// `name` and `description` hold translation keys or raw strings; they are
/// never stored pre-localized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    pub available_views: Vec<String>,
    pub default_view: String,
}

impl Board {
    /// Creates an empty board whose only view is `default_view`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        default_view: impl Into<String>,
    ) -> Self {
        let default_view = default_view.into();
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            columns: Vec::new(),
            tasks: Vec::new(),
            available_views: vec![default_view.clone()],
            default_view,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Appends a view id unless it is already offered.
    pub fn with_view(mut self, view_id: impl Into<String>) -> Self {
        let view_id = view_id.into();
        if !self.has_view(&view_id) {
            self.available_views.push(view_id);
        }
        self
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == column_id)
    }

    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub fn has_view(&self, view_id: &str) -> bool {
        self.available_views.iter().any(|id| id == view_id)
    }

    /// First `status` column; kanban lanes and overview counts group by it.
    pub fn status_column(&self) -> Option<&Column> {
        self.columns
            .iter()
            .find(|column| column.kind == ColumnType::Status)
    }

    /// Validates write-side invariants.
    ///
    /// # Errors
    /// - Returns the first violated invariant, checked in declaration order.
    pub fn validate(&self) -> Result<(), BoardValidationError> {
        if self.id.trim().is_empty() {
            return Err(BoardValidationError::EmptyBoardId);
        }

        let mut column_ids = BTreeSet::new();
        for column in &self.columns {
            if column.id.trim().is_empty() {
                return Err(BoardValidationError::EmptyColumnId);
            }
            if !column_ids.insert(column.id.as_str()) {
                return Err(BoardValidationError::DuplicateColumnId(column.id.clone()));
            }
        }

        let mut view_ids = BTreeSet::new();
        for view_id in &self.available_views {
            if !view_ids.insert(view_id.as_str()) {
                return Err(BoardValidationError::DuplicateViewId(view_id.clone()));
            }
        }
        if !view_ids.contains(self.default_view.as_str()) {
            return Err(BoardValidationError::DefaultViewNotAvailable(
                self.default_view.clone(),
            ));
        }

        validate_tasks(&self.columns, &self.tasks)
    }
}

/// Validates a task list against a column schema.
///
/// Used both by `Board::validate()` and by task-only writes.
pub fn validate_tasks(columns: &[Column], tasks: &[Task]) -> Result<(), BoardValidationError> {
    let mut task_ids = BTreeSet::new();
    for task in tasks {
        if !task_ids.insert(task.id) {
            return Err(BoardValidationError::DuplicateTaskId(task.id));
        }
        for (column_id, value) in &task.values {
            let Some(column) = columns.iter().find(|column| &column.id == column_id) else {
                return Err(BoardValidationError::UnknownColumn {
                    task_id: task.id,
                    column_id: column_id.clone(),
                });
            };
            if !column.kind.accepts(value) {
                return Err(BoardValidationError::ValueTypeMismatch {
                    task_id: task.id,
                    column_id: column_id.clone(),
                    expected: column.kind,
                    actual: value.kind_name(),
                });
            }
            match value {
                TaskValue::Date(raw) if !ISO_DATE_RE.is_match(raw) => {
                    return Err(BoardValidationError::InvalidDate {
                        task_id: task.id,
                        value: raw.clone(),
                    });
                }
                TaskValue::Number(number) if !number.is_finite() => {
                    return Err(BoardValidationError::NonFiniteNumber {
                        task_id: task.id,
                        column_id: column_id.clone(),
                    });
                }
                _ => {}
            }
        }
    }
    Ok(())
}

/// Shallow top-level patch; `None` fields keep the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub columns: Option<Vec<Column>>,
    pub tasks: Option<Vec<Task>>,
    pub available_views: Option<Vec<String>>,
    pub default_view: Option<String>,
}

impl BoardPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Returns a copy of `board` with every present field replaced.
    ///
    /// `id` is never patched.
    pub fn apply_to(&self, board: &Board) -> Board {
        let mut next = board.clone();
        if let Some(name) = &self.name {
            next.name = name.clone();
        }
        if let Some(description) = &self.description {
            next.description = description.clone();
        }
        if let Some(columns) = &self.columns {
            next.columns = columns.clone();
        }
        if let Some(tasks) = &self.tasks {
            next.tasks = tasks.clone();
        }
        if let Some(views) = &self.available_views {
            next.available_views = views.clone();
        }
        if let Some(default_view) = &self.default_view {
            next.default_view = default_view.clone();
        }
        next
    }
}

/// Write-side invariant violations for boards and task lists.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardValidationError {
    EmptyBoardId,
    EmptyColumnId,
    DuplicateColumnId(String),
    DuplicateViewId(String),
    DefaultViewNotAvailable(String),
    /// View id on the retired deny-list; only raised by the board store.
    DeprecatedView(String),
    DuplicateTaskId(TaskId),
    UnknownColumn {
        task_id: TaskId,
        column_id: String,
    },
    ValueTypeMismatch {
        task_id: TaskId,
        column_id: String,
        expected: ColumnType,
        actual: &'static str,
    },
    InvalidDate {
        task_id: TaskId,
        value: String,
    },
    /// NaN and infinities cannot be written as JSON numbers.
    NonFiniteNumber {
        task_id: TaskId,
        column_id: String,
    },
}

impl Display for BoardValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyBoardId => write!(f, "board id cannot be empty"),
            Self::EmptyColumnId => write!(f, "column id cannot be empty"),
            Self::DuplicateColumnId(id) => write!(f, "duplicate column id: {id}"),
            Self::DuplicateViewId(id) => write!(f, "duplicate view id: {id}"),
            Self::DefaultViewNotAvailable(id) => {
                write!(f, "default view `{id}` is not in available views")
            }
            Self::DeprecatedView(id) => write!(f, "view `{id}` is deprecated"),
            Self::DuplicateTaskId(id) => write!(f, "duplicate task id: {id}"),
            Self::UnknownColumn { task_id, column_id } => {
                write!(f, "task {task_id} references unknown column `{column_id}`")
            }
            Self::ValueTypeMismatch {
                task_id,
                column_id,
                expected,
                actual,
            } => write!(
                f,
                "task {task_id} column `{column_id}` expects {} but got {actual}",
                expected.as_str()
            ),
            Self::InvalidDate { task_id, value } => {
                write!(f, "task {task_id} has invalid date `{value}`; expected YYYY-MM-DD")
            }
            Self::NonFiniteNumber { task_id, column_id } => {
                write!(f, "task {task_id} column `{column_id}` holds a non-finite number")
            }
        }
    }
}

impl Error for BoardValidationError {}

#[cfg(test)]
mod tests {
    use super::{Board, BoardPatch, BoardValidationError, Column, ColumnType};
    use crate::model::task::{Task, TaskValue};

    fn sample_board() -> Board {
        Board::new("dept-sales", "Sales", "overview")
            .with_view("table")
            .with_column(Column::new("title", "Title", ColumnType::Text))
            .with_column(Column::new("stage", "Stage", ColumnType::Status))
            .with_column(Column::new("amount", "Amount", ColumnType::Currency))
    }

    #[test]
    fn new_board_offers_its_default_view() {
        let board = Board::new("dept-hr", "HR", "table");
        assert_eq!(board.available_views, vec!["table".to_string()]);
        assert!(board.validate().is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_column_ids() {
        let board = sample_board().with_column(Column::new("stage", "Again", ColumnType::Text));
        assert_eq!(
            board.validate(),
            Err(BoardValidationError::DuplicateColumnId("stage".to_string()))
        );
    }

    #[test]
    fn validate_rejects_value_kind_mismatch() {
        let task = Task::new().with_value("amount", TaskValue::Text("lots".to_string()));
        let board = sample_board().with_task(task);
        assert!(matches!(
            board.validate(),
            Err(BoardValidationError::ValueTypeMismatch { .. })
        ));
    }

    #[test]
    fn currency_column_accepts_numbers() {
        let task = Task::new().with_value("amount", TaskValue::Number(1250.5));
        assert!(sample_board().with_task(task).validate().is_ok());
    }

    #[test]
    fn validate_rejects_malformed_dates() {
        let board = sample_board().with_column(Column::new("due", "Due", ColumnType::Date));
        let good = Task::new().with_value("due", TaskValue::Date("2026-03-31".to_string()));
        assert!(board.clone().with_task(good).validate().is_ok());

        let bad = Task::new().with_value("due", TaskValue::Date("31/03/2026".to_string()));
        assert!(matches!(
            board.with_task(bad).validate(),
            Err(BoardValidationError::InvalidDate { .. })
        ));
    }

    #[test]
    fn patch_replaces_only_present_fields() {
        let board = sample_board();
        let patch = BoardPatch {
            name: Some("Sales team".to_string()),
            ..BoardPatch::default()
        };
        let next = patch.apply_to(&board);
        assert_eq!(next.name, "Sales team");
        assert_eq!(next.columns, board.columns);
        assert_eq!(next.available_views, board.available_views);
        assert_eq!(next.id, board.id);
    }

    #[test]
    fn board_serializes_camel_case_fields() {
        let json = serde_json::to_value(sample_board()).expect("serialize board");
        assert_eq!(json["defaultView"], "overview");
        assert_eq!(json["availableViews"][1], "table");
        assert_eq!(json["columns"][1]["type"], "status");
    }
}
