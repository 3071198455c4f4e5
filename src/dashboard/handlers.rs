//! Dashboard HTTP handlers.
//!
//! The summary is rebuilt from every stored transaction on each request.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    app_state::DashboardState,
    category::{Category, CategoryId, CategoryTable},
    dashboard::aggregation::{
        CategoryTotal, MonthlyExpense, TransactionTotals, category_totals,
        expense_category_totals, filter_by_category, format_currency, monthly_expenses,
        transaction_sign, transaction_totals,
    },
    stores::TransactionStore,
    transaction::Transaction,
};

/// The query parameters for the dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Only list the transactions with this category ID.
    #[serde(default)]
    pub category: Option<String>,
}

/// A transaction with the values needed to display it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRow {
    #[serde(flatten)]
    transaction: Transaction,
    /// The signed amount, e.g. "-$12.34".
    display_amount: String,
    /// How to display the category, `None` if the transaction has no category.
    category_details: Option<&'static Category>,
}

impl TransactionRow {
    fn new(transaction: &Transaction, categories: &CategoryTable) -> Self {
        Self {
            transaction: transaction.clone(),
            display_amount: format!(
                "{}{}",
                transaction_sign(transaction.transaction_type),
                format_currency(transaction.amount)
            ),
            category_details: transaction
                .category
                .as_ref()
                .map(|category| categories.get_or_unknown(category.as_str())),
        }
    }
}

/// Everything shown on the dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Totals over all transactions.
    pub totals: TransactionTotals,
    /// Expenses per month over all transactions.
    pub monthly_expenses: Vec<MonthlyExpense>,
    /// Totals per category over all transactions.
    pub category_totals: Vec<CategoryTotal>,
    /// Expense totals per category over all transactions.
    pub expense_category_totals: Vec<CategoryTotal>,
    /// The transactions matching the category filter, newest first.
    pub transactions: Vec<TransactionRow>,
}

/// Build the dashboard summary for `transactions`.
///
/// The aggregates always cover every transaction, `category` only narrows the
/// list of transactions.
pub fn build_summary(
    transactions: &[Transaction],
    category: Option<&CategoryId>,
    categories: &CategoryTable,
) -> DashboardSummary {
    DashboardSummary {
        totals: transaction_totals(transactions),
        monthly_expenses: monthly_expenses(transactions),
        category_totals: category_totals(transactions, categories),
        expense_category_totals: expense_category_totals(transactions, categories),
        transactions: filter_by_category(transactions, category)
            .into_iter()
            .map(|transaction| TransactionRow::new(transaction, categories))
            .collect(),
    }
}

/// A route handler that responds with the [DashboardSummary] as JSON.
pub async fn get_dashboard_endpoint<T>(
    State(state): State<DashboardState<T>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardSummary>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let transactions = state
        .transaction_store
        .list()
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;
    let category = query.category.as_deref().and_then(CategoryId::new);

    Ok(Json(build_summary(
        &transactions,
        category.as_ref(),
        &state.categories,
    )))
}
