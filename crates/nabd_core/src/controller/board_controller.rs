//! Board controller use-case API.
//!
//! # Responsibility
//! - Track the transient current view and render it.
//! - Translate UI intents (add column, move task, add view) into patches.
//!
//! # Invariants
//! - Rendering never fails; unknown ids render a placeholder.
//! - Every mutation goes through `BoardUpdates::update_board` or
//!   `BoardUpdates::update_tasks`.

use crate::i18n::{LocaleContext, Translator};
use crate::model::board::{Board, BoardPatch, Column};
use crate::model::task::{Task, TaskId, TaskValue};
use crate::store::{BoardUpdates, StoreError};
use crate::view::{
    DashboardSection, DashboardSectionIndex, PlaceholderView, RenderContext, RenderedView,
    ViewRegistry, ViewResolution,
};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

const PLACEHOLDER_MESSAGE_KEY: &str = "views.placeholder";

pub type ControllerResult<T> = Result<T, ControllerError>;

/// Controller error for user-initiated mutations.
#[derive(Debug)]
pub enum ControllerError {
    Store(StoreError),
    UnknownColumn(String),
    DuplicateColumn(String),
    UnknownTask(TaskId),
    /// View id is not in `Board::available_views`.
    ViewNotAvailable(String),
    /// View id is not offered by the "Add View" menu.
    ViewNotOffered(String),
    /// The default view cannot be removed from the board.
    DefaultViewRemoval(String),
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::UnknownColumn(id) => write!(f, "column not found: {id}"),
            Self::DuplicateColumn(id) => write!(f, "column already exists: {id}"),
            Self::UnknownTask(id) => write!(f, "task not found: {id}"),
            Self::ViewNotAvailable(id) => write!(f, "view not available on this board: {id}"),
            Self::ViewNotOffered(id) => write!(f, "view not offered by the add-view menu: {id}"),
            Self::DefaultViewRemoval(id) => write!(f, "cannot remove default view: {id}"),
        }
    }
}

impl Error for ControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ControllerError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Per-department controller composing board updates, views and menu.
pub struct BoardController<U: BoardUpdates> {
    updates: U,
    registry: ViewRegistry,
    sections: DashboardSectionIndex,
    translator: Rc<dyn Translator>,
    locale: LocaleContext,
    current_view: Option<String>,
}

impl<U: BoardUpdates> BoardController<U> {
    pub fn new(
        updates: U,
        registry: ViewRegistry,
        translator: Rc<dyn Translator>,
        locale: LocaleContext,
    ) -> Self {
        Self {
            updates,
            registry,
            sections: DashboardSectionIndex::default(),
            translator,
            locale,
            current_view: None,
        }
    }

    /// Attaches the department's "Add View" declarations.
    pub fn with_sections(mut self, sections: DashboardSectionIndex) -> Self {
        self.sections = sections;
        self
    }

    pub fn board(&self) -> &Board {
        self.updates.board()
    }

    pub fn updates(&self) -> &U {
        &self.updates
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    pub fn locale(&self) -> &LocaleContext {
        &self.locale
    }

    /// Swaps the translator, e.g. after a language switch.
    ///
    /// The menu cache is dropped even when the language is unchanged, since
    /// the new tables may differ.
    pub fn set_translator(&mut self, translator: Rc<dyn Translator>) {
        self.translator = translator;
        self.sections.invalidate();
    }

    pub fn set_locale(&mut self, locale: LocaleContext) {
        self.locale = locale;
    }

    /// User-selected view, if any.
    pub fn current_view(&self) -> Option<&str> {
        self.current_view.as_deref()
    }

    /// View that `render_active` will draw.
    ///
    /// The current selection wins while it is still offered by the board;
    /// otherwise the board default is used. An id unknown to the registry
    /// degrades to the board default.
    pub fn active_view_id(&self) -> &str {
        let board = self.board();
        let selected = self
            .current_view
            .as_deref()
            .filter(|view_id| board.has_view(view_id))
            .unwrap_or(board.default_view.as_str());
        let (resolved, _) = self.registry.resolve_or_default(selected, board);
        resolved
    }

    /// Selects an available view for this session.
    pub fn switch_view(&mut self, view_id: &str) -> ControllerResult<()> {
        if !self.board().has_view(view_id) {
            return Err(ControllerError::ViewNotAvailable(view_id.to_string()));
        }
        self.current_view = Some(view_id.to_string());
        Ok(())
    }

    /// Localized "Add View" menu; stable until the language changes.
    pub fn dashboard_sections(&self) -> Rc<[DashboardSection]> {
        self.sections.sections(self.translator.as_ref())
    }

    /// Adds a menu option to the board (if absent) and makes it current.
    pub fn add_view_from_menu(&mut self, view_id: &str) -> ControllerResult<&Board> {
        if !self.sections.contains(view_id) {
            return Err(ControllerError::ViewNotOffered(view_id.to_string()));
        }
        if !self.board().has_view(view_id) {
            let mut views = self.board().available_views.clone();
            views.push(view_id.to_string());
            self.updates.update_board(BoardPatch {
                available_views: Some(views),
                ..BoardPatch::default()
            })?;
            info!(
                "event=view_add module=controller status=ok board_id={} view_id={}",
                self.board().id,
                view_id
            );
        }
        self.current_view = Some(view_id.to_string());
        Ok(self.board())
    }

    /// Removes an optional view from the board.
    pub fn remove_view(&mut self, view_id: &str) -> ControllerResult<&Board> {
        let board = self.board();
        if !board.has_view(view_id) {
            return Err(ControllerError::ViewNotAvailable(view_id.to_string()));
        }
        if board.default_view == view_id {
            return Err(ControllerError::DefaultViewRemoval(view_id.to_string()));
        }
        let views = board
            .available_views
            .iter()
            .filter(|id| id.as_str() != view_id)
            .cloned()
            .collect();
        self.updates.update_board(BoardPatch {
            available_views: Some(views),
            ..BoardPatch::default()
        })?;
        if self.current_view.as_deref() == Some(view_id) {
            self.current_view = None;
        }
        Ok(self.board())
    }

    /// Makes an available view the persisted default.
    pub fn set_default_view(&mut self, view_id: &str) -> ControllerResult<&Board> {
        if !self.board().has_view(view_id) {
            return Err(ControllerError::ViewNotAvailable(view_id.to_string()));
        }
        self.updates.update_board(BoardPatch {
            default_view: Some(view_id.to_string()),
            ..BoardPatch::default()
        })?;
        Ok(self.board())
    }

    pub fn add_column(&mut self, column: Column) -> ControllerResult<&Board> {
        if self.board().column(&column.id).is_some() {
            return Err(ControllerError::DuplicateColumn(column.id));
        }
        let mut columns = self.board().columns.clone();
        columns.push(column);
        self.updates.update_board(BoardPatch {
            columns: Some(columns),
            ..BoardPatch::default()
        })?;
        Ok(self.board())
    }

    /// Replaces the column with the same id.
    ///
    /// When the type changes, task values the new type does not accept are
    /// cleared in the same update.
    pub fn edit_column(&mut self, column: Column) -> ControllerResult<&Board> {
        let board = self.board();
        let Some(position) = board.columns.iter().position(|c| c.id == column.id) else {
            return Err(ControllerError::UnknownColumn(column.id));
        };

        let type_changed = board.columns[position].kind != column.kind;
        let tasks = type_changed.then(|| {
            board
                .tasks
                .iter()
                .cloned()
                .map(|mut task| {
                    let incompatible = task
                        .value(&column.id)
                        .is_some_and(|value| !column.kind.accepts(value));
                    if incompatible {
                        task.clear_value(&column.id);
                    }
                    task
                })
                .collect()
        });

        let mut columns = board.columns.clone();
        columns[position] = column;
        self.updates.update_board(BoardPatch {
            columns: Some(columns),
            tasks,
            ..BoardPatch::default()
        })?;
        Ok(self.board())
    }

    /// Deletes a column and every task value stored under it.
    pub fn delete_column(&mut self, column_id: &str) -> ControllerResult<&Board> {
        let board = self.board();
        if board.column(column_id).is_none() {
            return Err(ControllerError::UnknownColumn(column_id.to_string()));
        }
        let columns = board
            .columns
            .iter()
            .filter(|column| column.id != column_id)
            .cloned()
            .collect();
        let tasks = board
            .tasks
            .iter()
            .cloned()
            .map(|mut task| {
                task.clear_value(column_id);
                task
            })
            .collect();
        self.updates.update_board(BoardPatch {
            columns: Some(columns),
            tasks: Some(tasks),
            ..BoardPatch::default()
        })?;
        Ok(self.board())
    }

    /// Appends a task and returns its id.
    pub fn add_task(&mut self, task: Task) -> ControllerResult<TaskId> {
        let task_id = task.id;
        let mut tasks = self.board().tasks.clone();
        tasks.push(task);
        self.updates.update_tasks(tasks)?;
        Ok(task_id)
    }

    /// Replaces the task with the same id.
    pub fn edit_task(&mut self, task: Task) -> ControllerResult<&Board> {
        let mut tasks = self.board().tasks.clone();
        let Some(slot) = tasks.iter_mut().find(|existing| existing.id == task.id) else {
            return Err(ControllerError::UnknownTask(task.id));
        };
        *slot = task;
        self.updates.update_tasks(tasks)?;
        Ok(self.board())
    }

    /// Sets one cell of one task.
    pub fn set_task_value(
        &mut self,
        task_id: TaskId,
        column_id: &str,
        value: TaskValue,
    ) -> ControllerResult<&Board> {
        if self.board().column(column_id).is_none() {
            return Err(ControllerError::UnknownColumn(column_id.to_string()));
        }
        let mut task = self
            .board()
            .task(task_id)
            .cloned()
            .ok_or(ControllerError::UnknownTask(task_id))?;
        task.set_value(column_id, value);
        self.edit_task(task)
    }

    pub fn delete_task(&mut self, task_id: TaskId) -> ControllerResult<&Board> {
        let board = self.board();
        if board.task(task_id).is_none() {
            return Err(ControllerError::UnknownTask(task_id));
        }
        let tasks = board
            .tasks
            .iter()
            .filter(|task| task.id != task_id)
            .cloned()
            .collect();
        self.updates.update_tasks(tasks)?;
        Ok(self.board())
    }

    /// Renders the active view.
    pub fn render_active(&self) -> RenderedView {
        self.render_view(self.active_view_id())
    }

    /// Renders `view_id` against the current board.
    ///
    /// Custom views take precedence; a declining custom view falls back to
    /// the built-in of the same id. Anything else renders a placeholder.
    pub fn render_view(&self, view_id: &str) -> RenderedView {
        let board = self.board();
        let ctx = RenderContext::new(self.translator.as_ref(), &self.locale);

        let rendered = match self.registry.resolve(view_id) {
            ViewResolution::Custom { view, builtin } => view
                .render(board, &ctx)
                .map(RenderedView::Custom)
                .or_else(|| builtin.map(|builtin| builtin.render(board, &ctx)))
                .unwrap_or_else(|| self.placeholder(view_id, &ctx)),
            ViewResolution::Builtin(builtin) => builtin.render(board, &ctx),
            ViewResolution::Unrecognized => self.placeholder(view_id, &ctx),
        };

        debug!(
            "event=view_render module=controller status={} board_id={} view_id={}",
            rendered.kind(),
            board.id,
            view_id
        );
        rendered
    }

    fn placeholder(&self, view_id: &str, ctx: &RenderContext<'_>) -> RenderedView {
        RenderedView::Placeholder(PlaceholderView {
            view_id: view_id.to_string(),
            message: ctx.t(PLACEHOLDER_MESSAGE_KEY),
        })
    }
}
