//! Dashboard module
//!
//! Provides a summary of the stored transactions: income and expense totals,
//! spending per month and totals per category.
//! The transaction list can be narrowed to a single category.

mod aggregation;
mod handlers;

pub use aggregation::{
    CategoryTotal, MonthlyExpense, TransactionTotals, category_totals, expense_category_totals,
    filter_by_category, format_currency, monthly_expenses, transaction_sign, transaction_totals,
};
pub use handlers::{DashboardQuery, DashboardSummary, TransactionRow, build_summary, get_dashboard_endpoint};
