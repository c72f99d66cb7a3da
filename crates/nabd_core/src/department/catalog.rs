//! Built-in department templates.
//!
//! Department-specific KPIs are data; these templates only declare the
//! schema, the shipped views and the "Add View" menu.

use crate::department::DepartmentConfig;
use crate::model::board::{Board, Column, ColumnType};
use crate::storage::department_board_id;
use crate::view::{
    DashboardOptionDecl, DashboardSectionDecl, VIEW_KANBAN, VIEW_OVERVIEW, VIEW_TABLE,
};

pub const SALES: &str = "sales";
pub const FINANCE: &str = "finance";
pub const OPERATIONS: &str = "operations";

/// Keys of every catalog department.
pub fn department_keys() -> &'static [&'static str] {
    &[SALES, FINANCE, OPERATIONS]
}

/// Returns the catalog config for `key`.
pub fn by_key(key: &str) -> Option<DepartmentConfig> {
    match key.trim() {
        SALES => Some(sales()),
        FINANCE => Some(finance()),
        OPERATIONS => Some(operations()),
        _ => None,
    }
}

pub fn sales() -> DepartmentConfig {
    let template = Board::new(department_board_id(SALES), "sales.title", VIEW_OVERVIEW)
        .with_description("sales.description")
        .with_view(VIEW_TABLE)
        .with_view(VIEW_KANBAN)
        .with_view("sales_insights")
        .with_column(Column::new("deal", "sales.columns.deal", ColumnType::Text))
        .with_column(Column::new("stage", "sales.columns.stage", ColumnType::Status))
        .with_column(Column::new("owner", "sales.columns.owner", ColumnType::Person))
        .with_column(Column::new("close_date", "sales.columns.close_date", ColumnType::Date))
        .with_column(Column::new("value", "sales.columns.value", ColumnType::Currency));

    DepartmentConfig::new(SALES, template).with_sections(vec![
        DashboardSectionDecl::new("sections.analytics")
            .with_option(option("sales_insights", "chart-line"))
            .with_option(option("sales_forecast", "trend-up")),
        DashboardSectionDecl::new("sections.pipeline")
            .with_option(option("sales_funnel", "funnel"))
            .with_option(option("sales_leaderboard", "trophy")),
    ])
}

pub fn finance() -> DepartmentConfig {
    let template = Board::new(department_board_id(FINANCE), "finance.title", VIEW_OVERVIEW)
        .with_description("finance.description")
        .with_view(VIEW_TABLE)
        .with_view("finance_cashflow")
        .with_column(Column::new("item", "finance.columns.item", ColumnType::Text))
        .with_column(Column::new("status", "finance.columns.status", ColumnType::Status))
        .with_column(Column::new("due_date", "finance.columns.due_date", ColumnType::Date))
        .with_column(Column::new("amount", "finance.columns.amount", ColumnType::Currency));

    DepartmentConfig::new(FINANCE, template).with_sections(vec![
        DashboardSectionDecl::new("sections.reports")
            .with_option(option("finance_cashflow", "wallet"))
            .with_option(option("finance_budget", "pie-chart")),
        DashboardSectionDecl::new("sections.analytics")
            .with_option(option("finance_expenses", "receipt")),
    ])
}

pub fn operations() -> DepartmentConfig {
    let template = Board::new(department_board_id(OPERATIONS), "operations.title", VIEW_KANBAN)
        .with_description("operations.description")
        .with_view(VIEW_TABLE)
        .with_view(VIEW_OVERVIEW)
        .with_column(Column::new("task", "operations.columns.task", ColumnType::Text))
        .with_column(Column::new("status", "operations.columns.status", ColumnType::Status))
        .with_column(Column::new("assignee", "operations.columns.assignee", ColumnType::Person))
        .with_column(Column::new("hours", "operations.columns.hours", ColumnType::Number));

    DepartmentConfig::new(OPERATIONS, template).with_sections(vec![
        DashboardSectionDecl::new("sections.operations")
            .with_option(option("operations_capacity", "gauge"))
            .with_option(option("operations_incidents", "alert")),
    ])
}

fn option(view_id: &str, icon: &str) -> DashboardOptionDecl {
    DashboardOptionDecl::new(
        view_id,
        format!("views.{view_id}"),
        icon,
        format!("views.{view_id}.description"),
    )
}
