//! Task records tracked on a board.
//!
//! # Responsibility
//! - Model one work item as a typed map from column id to value.
//! - Keep value kinds closed so renderers can interpret them by column type.
//!
//! # Invariants
//! - `id` is stable and never reused for another task on the same board.
//! - Value kinds are checked against `ColumnType` by `Board::validate()`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Stable identifier for one task row.
pub type TaskId = Uuid;

/// Tagged value stored in a task cell.
///
/// Serialized as `{"kind": "...", "value": ...}` so persisted payloads stay
/// self-describing across column type changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TaskValue {
    Text(String),
    /// Status label, e.g. `todo`, `in_progress`, `done`.
    Status(String),
    /// Assignee display name or handle.
    Person(String),
    /// Calendar date in `YYYY-MM-DD` form.
    Date(String),
    Number(f64),
}

impl TaskValue {
    /// Stable kind name, matching the serialized tag.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Status(_) => "status",
            Self::Person(_) => "person",
            Self::Date(_) => "date",
            Self::Number(_) => "number",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_status(&self) -> Option<&str> {
        match self {
            Self::Status(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

/// One row of work tracked on a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Cell values keyed by `Column::id`. Missing keys render as empty cells.
    #[serde(default)]
    pub values: BTreeMap<String, TaskValue>,
}

impl Task {
    /// Creates an empty task with a generated id.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates an empty task with a caller-provided id.
    pub fn with_id(id: TaskId) -> Self {
        Self {
            id,
            values: BTreeMap::new(),
        }
    }

    /// Builder-style setter used by templates and tests.
    pub fn with_value(mut self, column_id: impl Into<String>, value: TaskValue) -> Self {
        self.values.insert(column_id.into(), value);
        self
    }

    pub fn value(&self, column_id: &str) -> Option<&TaskValue> {
        self.values.get(column_id)
    }

    /// Replaces one cell, returning the previous value.
    pub fn set_value(
        &mut self,
        column_id: impl Into<String>,
        value: TaskValue,
    ) -> Option<TaskValue> {
        self.values.insert(column_id.into(), value)
    }

    pub fn clear_value(&mut self, column_id: &str) -> Option<TaskValue> {
        self.values.remove(column_id)
    }
}

impl Default for Task {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskValue};

    #[test]
    fn task_value_serializes_with_kind_tag() {
        let value = TaskValue::Status("done".to_string());
        let json = serde_json::to_value(&value).expect("serialize value");
        assert_eq!(json["kind"], "status");
        assert_eq!(json["value"], "done");
    }

    #[test]
    fn set_value_returns_previous_cell() {
        let mut task = Task::new().with_value("title", TaskValue::Text("draft".to_string()));
        let previous = task.set_value("title", TaskValue::Text("final".to_string()));
        assert_eq!(previous, Some(TaskValue::Text("draft".to_string())));
        assert_eq!(
            task.value("title"),
            Some(&TaskValue::Text("final".to_string()))
        );
    }
}
