//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open one catalog department against a SQLite file (or memory).
//! - Print the reconciled board and one rendered view as JSON.
//!
//! Usage: `nabd_cli <department> [db_path|:memory:] [view_id]`

use nabd_core::db::{open_db, open_db_in_memory};
use nabd_core::{
    catalog, default_log_level, init_logging, open_department, LocaleContext, RawKeyTranslator,
    SqliteKeyValueStore, ViewRegistry,
};
use std::process::ExitCode;
use std::rc::Rc;

const MEMORY_DB: &str = ":memory:";
const LOG_DIR_ENV: &str = "NABD_LOG_DIR";

fn main() -> ExitCode {
    match run(std::env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("nabd_cli: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    let mut args = args.into_iter();
    let department = args.next().ok_or_else(|| {
        format!(
            "missing department; expected one of {}",
            catalog::department_keys().join("|")
        )
    })?;
    let db_path = args.next().unwrap_or_else(|| MEMORY_DB.to_string());
    let view_id = args.next();

    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        init_logging(default_log_level(), &log_dir)?;
    }

    let config = catalog::by_key(&department)
        .ok_or_else(|| format!("unknown department `{department}`"))?;
    let conn = if db_path == MEMORY_DB {
        open_db_in_memory()
    } else {
        open_db(&db_path)
    }
    .map_err(|err| err.to_string())?;

    let controller = open_department(
        SqliteKeyValueStore::new(&conn),
        config,
        ViewRegistry::new(),
        Rc::new(RawKeyTranslator),
        LocaleContext::default(),
    )
    .map_err(|err| err.to_string())?;

    let rendered = match view_id.as_deref() {
        Some(view_id) => controller.render_view(view_id),
        None => controller.render_active(),
    };
    let output = serde_json::json!({
        "version": nabd_core::core_version(),
        "board": controller.board(),
        "activeView": controller.active_view_id(),
        "rendered": rendered,
    });
    let pretty = serde_json::to_string_pretty(&output).map_err(|err| err.to_string())?;
    println!("{pretty}");
    Ok(())
}
