//! View-set reconciliation between a persisted board and its template.
//!
//! # Invariants
//! - Persisted view order is kept; template-only views are appended.
//! - Deprecated ids are removed even when the template still lists them.
//! - The result always satisfies `default_view ∈ available_views`.

use crate::model::board::Board;

/// Retired generic view ids removed from every reconciled board.
pub const DEPRECATED_VIEW_IDS: &[&str] = &["board", "list", "kanban_legacy", "table_legacy"];

/// Reconciled board plus what the merge changed.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub board: Board,
    /// Template views newly offered to the persisted board.
    pub added_views: Vec<String>,
    /// Persisted views removed by the deny-list.
    pub dropped_views: Vec<String>,
    /// Set when the persisted default view had to be replaced.
    pub default_view_reset: bool,
}

/// Reconciles `persisted` against `template`.
///
/// Only `available_views` and, when it no longer qualifies, `default_view`
/// are changed; every other persisted field is passed through.
///
/// Default-view fallback order when the persisted default was dropped:
/// the template default, then the first remaining view. When no view
/// remains, the template default is re-added.
pub fn reconcile_views(persisted: Board, template: &Board, deprecated: &[String]) -> MergeOutcome {
    let is_deprecated = |view_id: &str| deprecated.iter().any(|id| id == view_id);
    let mut board = persisted;

    let mut views: Vec<String> = Vec::with_capacity(board.available_views.len());
    let mut dropped_views = Vec::new();
    for view_id in board.available_views.drain(..) {
        if views.contains(&view_id) || dropped_views.contains(&view_id) {
            continue;
        }
        if is_deprecated(&view_id) {
            dropped_views.push(view_id);
        } else {
            views.push(view_id);
        }
    }

    let mut added_views = Vec::new();
    for view_id in &template.available_views {
        if is_deprecated(view_id) || views.contains(view_id) || dropped_views.contains(view_id) {
            continue;
        }
        views.push(view_id.clone());
        added_views.push(view_id.clone());
    }

    let mut default_view_reset = false;
    if !views.contains(&board.default_view) {
        default_view_reset = true;
        board.default_view = if views.contains(&template.default_view) {
            template.default_view.clone()
        } else if let Some(first) = views.first() {
            first.clone()
        } else {
            views.push(template.default_view.clone());
            template.default_view.clone()
        };
    }

    board.available_views = views;
    MergeOutcome {
        board,
        added_views,
        dropped_views,
        default_view_reset,
    }
}

/// Owned copy of the built-in deny-list.
pub fn default_deprecations() -> Vec<String> {
    DEPRECATED_VIEW_IDS.iter().map(|id| id.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::reconcile_views;
    use crate::model::board::Board;

    fn board(views: &[&str], default_view: &str) -> Board {
        let mut board = Board::new("dept-sales", "Sales", default_view);
        board.available_views = views.iter().map(|v| v.to_string()).collect();
        board
    }

    fn deny(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn appends_new_template_views_after_persisted_ones() {
        let persisted = board(&["b", "a"], "a");
        let template = board(&["a", "b", "c", "d"], "a");
        let outcome = reconcile_views(persisted, &template, &[]);
        assert_eq!(outcome.board.available_views, vec!["b", "a", "c", "d"]);
        assert_eq!(outcome.added_views, vec!["c", "d"]);
        assert!(!outcome.default_view_reset);
    }

    #[test]
    fn preserves_user_added_views_missing_from_template() {
        let persisted = board(&["overview", "custom_report"], "custom_report");
        let template = board(&["overview", "sales_insights"], "overview");
        let outcome = reconcile_views(persisted, &template, &[]);
        assert_eq!(
            outcome.board.available_views,
            vec!["overview", "custom_report", "sales_insights"]
        );
        assert_eq!(outcome.board.default_view, "custom_report");
    }

    #[test]
    fn deprecated_default_reverts_to_template_default() {
        let persisted = board(&["overview", "kanban"], "kanban");
        let template = board(&["overview", "sales_insights"], "overview");
        let outcome = reconcile_views(persisted, &template, &deny(&["kanban"]));
        assert_eq!(
            outcome.board.available_views,
            vec!["overview", "sales_insights"]
        );
        assert_eq!(outcome.board.default_view, "overview");
        assert_eq!(outcome.dropped_views, vec!["kanban"]);
        assert!(outcome.default_view_reset);
    }

    #[test]
    fn falls_back_to_first_view_when_template_default_is_deprecated() {
        let persisted = board(&["list", "table"], "list");
        let template = board(&["list"], "list");
        let outcome = reconcile_views(persisted, &template, &deny(&["list"]));
        assert_eq!(outcome.board.available_views, vec!["table"]);
        assert_eq!(outcome.board.default_view, "table");
    }

    #[test]
    fn re_adds_template_default_when_nothing_remains() {
        let persisted = board(&["list"], "list");
        let template = board(&["list"], "list");
        let outcome = reconcile_views(persisted, &template, &deny(&["list"]));
        assert_eq!(outcome.board.available_views, vec!["list"]);
        assert_eq!(outcome.board.default_view, "list");
        assert!(outcome.board.validate().is_ok());
    }

    #[test]
    fn collapses_duplicate_persisted_views() {
        let persisted = board(&["table", "table", "kanban"], "table");
        let template = board(&["table"], "table");
        let outcome = reconcile_views(persisted, &template, &[]);
        assert_eq!(outcome.board.available_views, vec!["table", "kanban"]);
    }
}
