use nabd_core::storage::{board_storage_key, tasks_storage_key};
use nabd_core::{
    load_board, Board, BoardPatch, BoardStore, BoardValidationError, Column, ColumnType,
    KeyValueStore, MemoryKeyValueStore, StoreError, Task, TaskValue,
};

fn sales_template() -> Board {
    Board::new("dept-sales", "sales.title", "overview")
        .with_view("sales_insights")
        .with_column(Column::new("deal", "Deal", ColumnType::Text))
        .with_column(Column::new("stage", "Stage", ColumnType::Status))
}

fn views(board: &Board) -> Vec<&str> {
    board.available_views.iter().map(String::as_str).collect()
}

fn deny(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

fn persist_raw(storage: &MemoryKeyValueStore, value: serde_json::Value) {
    storage
        .set(&board_storage_key("sales"), &value.to_string())
        .expect("seed persisted board");
}

#[test]
fn missing_storage_returns_template() {
    let storage = MemoryKeyValueStore::new();
    let store = BoardStore::open(&storage, "sales", sales_template()).expect("open store");
    assert_eq!(store.board(), &sales_template());
    assert!(storage.is_empty());
}

#[test]
fn corrupt_storage_returns_exact_template() {
    let storage = MemoryKeyValueStore::new();
    storage
        .set(&board_storage_key("sales"), "{not json")
        .expect("seed corrupt payload");

    let board = load_board(&storage, "sales", &sales_template(), &[]);
    assert_eq!(board, sales_template());
}

#[test]
fn persisted_board_with_foreign_id_is_treated_as_corrupt() {
    let storage = MemoryKeyValueStore::new();
    persist_raw(
        &storage,
        serde_json::json!({
            "id": "dept-finance",
            "name": "finance.title",
            "availableViews": ["table"],
            "defaultView": "table"
        }),
    );

    let board = load_board(&storage, "sales", &sales_template(), &[]);
    assert_eq!(board, sales_template());
}

#[test]
fn reconciles_deprecated_default_to_template_default() {
    let storage = MemoryKeyValueStore::new();
    persist_raw(
        &storage,
        serde_json::json!({
            "id": "dept-sales",
            "name": "sales.title",
            "columns": [],
            "availableViews": ["overview", "kanban"],
            "defaultView": "kanban"
        }),
    );

    let board = load_board(&storage, "sales", &sales_template(), &deny(&["kanban"]));
    assert_eq!(views(&board), vec!["overview", "sales_insights"]);
    assert_eq!(board.default_view, "overview");
    assert!(board.columns.is_empty());
}

#[test]
fn merge_keeps_persisted_views_and_adds_new_template_views() {
    let storage = MemoryKeyValueStore::new();
    persist_raw(
        &storage,
        serde_json::json!({
            "id": "dept-sales",
            "name": "My pipeline",
            "availableViews": ["b", "a"],
            "defaultView": "a"
        }),
    );
    let mut template = Board::new("dept-sales", "sales.title", "a");
    template.available_views = deny(&["a", "b", "c", "d"]);

    let board = load_board(&storage, "sales", &template, &deny(&["d"]));
    assert_eq!(views(&board), vec!["b", "a", "c"]);
    assert_eq!(board.name, "My pipeline");
    assert!(board.has_view(&board.default_view));
}

#[test]
fn update_then_load_round_trips() {
    let storage = MemoryKeyValueStore::new();
    let mut store = BoardStore::open(&storage, "sales", sales_template()).expect("open store");

    let patch = BoardPatch {
        name: Some("Enterprise sales".to_string()),
        available_views: Some(deny(&["overview", "sales_insights", "table"])),
        default_view: Some("table".to_string()),
        ..BoardPatch::default()
    };
    let updated = store.update(patch.clone()).expect("update board").clone();
    assert_eq!(updated, patch.apply_to(&sales_template()));

    let reloaded = load_board(
        &storage,
        "sales",
        &sales_template(),
        store.deprecated_views(),
    );
    assert_eq!(reloaded, updated);
    assert!(reloaded.has_view(&reloaded.default_view));
}

#[test]
fn patch_cannot_drop_default_view() {
    let storage = MemoryKeyValueStore::new();
    let mut store = BoardStore::open(&storage, "sales", sales_template()).expect("open store");

    let err = store
        .update(BoardPatch {
            available_views: Some(deny(&["sales_insights"])),
            ..BoardPatch::default()
        })
        .expect_err("dropping the default view must fail");
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(store.board(), &sales_template());
    assert!(storage.is_empty());
}

#[test]
fn board_entry_excludes_tasks_and_tasks_use_secondary_key() {
    let storage = MemoryKeyValueStore::new();
    let mut store = BoardStore::open(&storage, "sales", sales_template()).expect("open store");

    let task = Task::new().with_value("deal", TaskValue::Text("Acme".to_string()));
    store
        .update_tasks(vec![task.clone()])
        .expect("update tasks");
    store
        .update(BoardPatch {
            description: Some("Q3 pipeline".to_string()),
            ..BoardPatch::default()
        })
        .expect("update board");

    let raw_board = storage
        .get(&board_storage_key("sales"))
        .expect("read board entry")
        .expect("board entry exists");
    let json: serde_json::Value = serde_json::from_str(&raw_board).expect("board entry is json");
    assert!(json.get("tasks").is_none());
    assert_eq!(json["description"], "Q3 pipeline");

    let raw_tasks = storage
        .get(&tasks_storage_key("dept-sales"))
        .expect("read task entry")
        .expect("task entry exists");
    let tasks: Vec<Task> = serde_json::from_str(&raw_tasks).expect("task entry is json");
    assert_eq!(tasks, vec![task]);

    let mut reopened =
        BoardStore::open(&storage, "sales", sales_template()).expect("reopen store");
    assert_eq!(reopened.board().tasks.len(), 1);
    assert_eq!(reopened.board().description, "Q3 pipeline");
    assert_eq!(reopened.reload(), store.board());
}

#[test]
fn task_list_is_recovered_without_board_entry() {
    let storage = MemoryKeyValueStore::new();
    let task = Task::new().with_value("stage", TaskValue::Status("won".to_string()));
    storage
        .set(
            &tasks_storage_key("dept-sales"),
            &serde_json::to_string(&vec![task.clone()]).expect("serialize tasks"),
        )
        .expect("seed tasks");

    let board = load_board(&storage, "sales", &sales_template(), &[]);
    assert_eq!(board.tasks, vec![task]);
    assert_eq!(board.available_views, sales_template().available_views);
}

#[test]
fn invalid_recovered_tasks_fall_back_to_template_tasks() {
    let storage = MemoryKeyValueStore::new();
    let stray = Task::new().with_value("retired_column", TaskValue::Number(3.0));
    storage
        .set(
            &tasks_storage_key("dept-sales"),
            &serde_json::to_string(&vec![stray]).expect("serialize tasks"),
        )
        .expect("seed tasks");

    let seeded = Task::new().with_value("deal", TaskValue::Text("Seed deal".to_string()));
    let template = sales_template().with_task(seeded.clone());
    let board = load_board(&storage, "sales", &template, &[]);
    assert_eq!(board.tasks, vec![seeded]);
}

#[test]
fn default_view_stays_available_across_update_and_reload_sequences() {
    let storage = MemoryKeyValueStore::new();
    let patches = vec![
        BoardPatch {
            available_views: Some(deny(&["overview", "sales_insights", "kanban"])),
            ..BoardPatch::default()
        },
        BoardPatch {
            default_view: Some("kanban".to_string()),
            ..BoardPatch::default()
        },
        BoardPatch {
            available_views: Some(deny(&["kanban"])),
            ..BoardPatch::default()
        },
    ];

    let mut store = BoardStore::open(&storage, "sales", sales_template()).expect("open store");
    for patch in patches {
        store.update(patch).expect("patch should apply");
        let board = store.board();
        assert!(board.has_view(&board.default_view));

        let reloaded = store.reload().clone();
        assert!(reloaded.has_view(&reloaded.default_view));
    }

    // The template's views come back on reload even after the user narrowed them.
    assert_eq!(views(store.board()), vec!["kanban", "overview", "sales_insights"]);
}

#[test]
fn non_finite_numbers_are_rejected_and_stored_tasks_survive() {
    let storage = MemoryKeyValueStore::new();
    let template =
        sales_template().with_column(Column::new("amount", "Amount", ColumnType::Currency));
    let mut store = BoardStore::open(&storage, "sales", template.clone()).expect("open store");

    let acme = Task::new()
        .with_value("deal", TaskValue::Text("Acme".to_string()))
        .with_value("amount", TaskValue::Number(1200.0));
    store
        .update_tasks(vec![acme.clone()])
        .expect("finite amount is accepted");

    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let broken = Task::new().with_value("amount", TaskValue::Number(bad));
        let err = store
            .update_tasks(vec![acme.clone(), broken])
            .expect_err("non-finite amount must be rejected");
        assert!(matches!(
            err,
            StoreError::Validation(BoardValidationError::NonFiniteNumber { ref column_id, .. })
                if column_id == "amount"
        ));
    }
    assert_eq!(store.board().tasks, vec![acme.clone()]);

    let reloaded = load_board(&storage, "sales", &template, store.deprecated_views());
    assert_eq!(reloaded.tasks, vec![acme]);
}
