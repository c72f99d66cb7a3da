//! Persisted board store for one department.
//!
//! # Responsibility
//! - Load the persisted board (or the template) and reconcile its view set.
//! - Apply shallow patches and task-list replacements with write-through.
//!
//! # Invariants
//! - Board payloads are written under `dept-<name>-data` without tasks.
//! - Task lists are written under `board-tasks-<boardId>`.
//! - Every write is validated before it reaches storage.
//! - Deprecated view ids are never written, so reloading is idempotent.

use crate::model::board::{validate_tasks, Board, BoardPatch, BoardValidationError};
use crate::model::task::Task;
use crate::storage::{
    board_storage_key, is_valid_department_key, tasks_storage_key, KeyValueStore,
};
use crate::store::merge::{default_deprecations, reconcile_views};
use crate::store::{BoardUpdates, StoreError, StoreResult};
use log::{debug, error, info, warn};

/// Reads and reconciles the board of `department`.
///
/// Never fails: unreadable, unparsable or invalid persisted state is logged
/// and replaced by `template`. A valid task list stored under the task key
/// is recovered even when the board entry itself is missing.
pub fn load_board<S: KeyValueStore + ?Sized>(
    storage: &S,
    department: &str,
    template: &Board,
    deprecated: &[String],
) -> Board {
    let persisted = read_persisted_board(storage, department, template);
    let from_storage = persisted.is_some();

    let mut board = match persisted {
        Some(persisted) => {
            let outcome = reconcile_views(persisted, template, deprecated);
            info!(
                "event=board_merge module=store status=ok department={} views_added={} views_dropped={} default_reset={}",
                department,
                outcome.added_views.len(),
                outcome.dropped_views.len(),
                outcome.default_view_reset
            );
            outcome.board
        }
        None => template.clone(),
    };

    let recovered = read_persisted_tasks(storage, &board.id);
    let candidates = [recovered, Some(template.tasks.clone())];
    board.tasks = candidates
        .into_iter()
        .flatten()
        .find(|tasks| match validate_tasks(&board.columns, tasks) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "event=board_load module=store status=tasks_rejected department={} error={}",
                    department, err
                );
                false
            }
        })
        .unwrap_or_default();

    if let Err(err) = board.validate() {
        warn!(
            "event=board_load module=store status=invalid department={} error={}",
            department, err
        );
        return template.clone();
    }

    info!(
        "event=board_load module=store status={} department={} views={} tasks={}",
        if from_storage { "persisted" } else { "template" },
        department,
        board.available_views.len(),
        board.tasks.len()
    );
    board
}

fn read_persisted_board<S: KeyValueStore + ?Sized>(
    storage: &S,
    department: &str,
    template: &Board,
) -> Option<Board> {
    let key = board_storage_key(department);
    let raw = match storage.get(&key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            warn!(
                "event=board_load module=store status=unavailable department={} error={}",
                department, err
            );
            return None;
        }
    };

    match serde_json::from_str::<Board>(&raw) {
        Ok(board) if board.id == template.id => Some(board),
        Ok(board) => {
            warn!(
                "event=board_load module=store status=corrupt department={} reason=id_mismatch persisted_id={}",
                department, board.id
            );
            None
        }
        Err(err) => {
            warn!(
                "event=board_load module=store status=corrupt department={} error={}",
                department, err
            );
            None
        }
    }
}

fn read_persisted_tasks<S: KeyValueStore + ?Sized>(
    storage: &S,
    board_id: &str,
) -> Option<Vec<Task>> {
    let raw = storage.get(&tasks_storage_key(board_id)).ok().flatten()?;
    match serde_json::from_str::<Vec<Task>>(&raw) {
        Ok(tasks) => Some(tasks),
        Err(err) => {
            warn!(
                "event=board_load module=store status=tasks_corrupt board_id={} error={}",
                board_id, err
            );
            None
        }
    }
}

/// Owns the live board of one department and writes it through to storage.
pub struct BoardStore<S: KeyValueStore> {
    storage: S,
    department: String,
    template: Board,
    deprecated: Vec<String>,
    board: Board,
}

impl<S: KeyValueStore> BoardStore<S> {
    /// Opens the store with the built-in deprecation deny-list.
    ///
    /// # Errors
    /// - `InvalidDepartmentKey` when `department` is not a lowercase slug.
    /// - `Validation` when the template itself violates board invariants.
    pub fn open(storage: S, department: &str, template: Board) -> StoreResult<Self> {
        Self::open_with_deprecations(storage, department, template, default_deprecations())
    }

    /// Opens the store with a department-specific deny-list.
    ///
    /// # Errors
    /// - `Validation(DeprecatedView)` when the template offers a view on
    ///   `deprecated`; such a board could never be written back.
    pub fn open_with_deprecations(
        storage: S,
        department: &str,
        template: Board,
        deprecated: Vec<String>,
    ) -> StoreResult<Self> {
        let department = department.trim();
        if !is_valid_department_key(department) {
            return Err(StoreError::InvalidDepartmentKey(department.to_string()));
        }
        template.validate()?;
        if let Some(view_id) = find_deprecated(&template, &deprecated) {
            return Err(StoreError::Validation(BoardValidationError::DeprecatedView(
                view_id.to_string(),
            )));
        }

        let board = load_board(&storage, department, &template, &deprecated);
        Ok(Self {
            storage,
            department: department.to_string(),
            template,
            deprecated,
            board,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn template(&self) -> &Board {
        &self.template
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn deprecated_views(&self) -> &[String] {
        &self.deprecated
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Re-reads persisted state, discarding the in-memory board.
    pub fn reload(&mut self) -> &Board {
        self.board = load_board(
            &self.storage,
            &self.department,
            &self.template,
            &self.deprecated,
        );
        &self.board
    }

    /// Applies a shallow patch, persists the result and returns it.
    ///
    /// # Errors
    /// - `Validation` when the result breaks a board invariant, including a
    ///   patch that drops `default_view` from `available_views` or offers a
    ///   deprecated view id.
    /// - `Storage`/`Serialization` when the write fails; the in-memory board
    ///   is left unchanged and a task entry written by this call is restored.
    pub fn update(&mut self, patch: BoardPatch) -> StoreResult<&Board> {
        if patch.is_empty() {
            return Ok(&self.board);
        }

        let next = patch.apply_to(&self.board);
        next.validate()?;
        if let Some(view_id) = find_deprecated(&next, &self.deprecated) {
            return Err(StoreError::Validation(BoardValidationError::DeprecatedView(
                view_id.to_string(),
            )));
        }

        let board_payload = board_payload(&next)?;
        if patch.tasks.is_some() {
            let previous_tasks = serde_json::to_string(&self.board.tasks)?;
            let next_tasks = serde_json::to_string(&next.tasks)?;
            self.write_tasks(&next.id, &next_tasks)?;
            if let Err(err) = self.write_board(&board_payload) {
                self.restore_tasks(&next.id, &previous_tasks);
                return Err(err);
            }
        } else {
            self.write_board(&board_payload)?;
        }
        self.board = next;

        info!(
            "event=board_update module=store status=ok department={} views={} columns={} tasks_replaced={}",
            self.department,
            self.board.available_views.len(),
            self.board.columns.len(),
            patch.tasks.is_some()
        );
        Ok(&self.board)
    }

    /// Replaces the task list and persists it under the task key.
    ///
    /// # Errors
    /// - `Validation` when a task does not match the column schema.
    pub fn update_tasks(&mut self, tasks: Vec<Task>) -> StoreResult<&Board> {
        validate_tasks(&self.board.columns, &tasks)?;

        let payload = serde_json::to_string(&tasks)?;
        self.write_tasks(&self.board.id, &payload)?;
        self.board.tasks = tasks;

        info!(
            "event=tasks_update module=store status=ok department={} tasks={}",
            self.department,
            self.board.tasks.len()
        );
        Ok(&self.board)
    }

    fn write_board(&self, payload: &str) -> StoreResult<()> {
        self.storage
            .set(&board_storage_key(&self.department), payload)?;
        debug!(
            "event=board_persist module=store status=ok department={} bytes={}",
            self.department,
            payload.len()
        );
        Ok(())
    }

    fn write_tasks(&self, board_id: &str, payload: &str) -> StoreResult<()> {
        self.storage.set(&tasks_storage_key(board_id), payload)?;
        Ok(())
    }

    /// Puts back the task entry after a failed board write.
    fn restore_tasks(&self, board_id: &str, previous: &str) {
        if let Err(err) = self.write_tasks(board_id, previous) {
            error!(
                "event=board_update module=store status=rollback_failed department={} error={}",
                self.department, err
            );
        }
    }
}

/// Board entry payload: the board without its task list.
fn board_payload(board: &Board) -> StoreResult<String> {
    let mut value = serde_json::to_value(board)?;
    if let Some(fields) = value.as_object_mut() {
        fields.remove("tasks");
    }
    Ok(serde_json::to_string(&value)?)
}

fn find_deprecated<'a>(board: &'a Board, deprecated: &[String]) -> Option<&'a str> {
    board
        .available_views
        .iter()
        .find(|view_id| deprecated.contains(view_id))
        .map(String::as_str)
}

impl<S: KeyValueStore> BoardUpdates for BoardStore<S> {
    fn board(&self) -> &Board {
        BoardStore::board(self)
    }

    fn update_board(&mut self, patch: BoardPatch) -> StoreResult<&Board> {
        self.update(patch)
    }

    fn update_tasks(&mut self, tasks: Vec<Task>) -> StoreResult<&Board> {
        BoardStore::update_tasks(self, tasks)
    }
}
