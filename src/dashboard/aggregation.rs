//! Transaction aggregation for the dashboard.
//!
//! Provides functions to total income and expenses, group expenses by month and
//! total amounts by category. Everything here is recomputed from a slice of
//! transactions on each call and never touches a store.

use std::collections::HashMap;

use serde::Serialize;
use time::Date;

use crate::{
    category::{CategoryId, CategoryTable},
    transaction::{Transaction, TransactionType},
};

/// The total income, total expenses and the difference between them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionTotals {
    /// The sum of the amounts of income transactions.
    pub total_income: f64,
    /// The sum of the amounts of expense transactions.
    pub total_expenses: f64,
    /// `total_income - total_expenses`.
    pub balance: f64,
}

/// The total spent in a calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyExpense {
    /// The month as `YYYY-MM`.
    pub month: String,
    /// The sum of the expense amounts in the month.
    pub total: f64,
}

/// The total amount for a category along with how to display the category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    /// The ID the transactions were stored with.
    pub category_id: CategoryId,
    /// The display name, "Unknown" if the ID is not in the category table.
    pub name: &'static str,
    /// The display icon.
    pub icon: &'static str,
    /// The display color as a hex string.
    pub color: &'static str,
    /// The sum of the amounts of the transactions in the category.
    pub total: f64,
}

/// Sum income and expenses over `transactions`.
pub fn transaction_totals(transactions: &[Transaction]) -> TransactionTotals {
    let (total_income, total_expenses) =
        transactions
            .iter()
            .fold((0.0, 0.0), |(income, expenses), transaction| {
                match transaction.transaction_type {
                    TransactionType::Income => (income + transaction.amount, expenses),
                    TransactionType::Expense => (income, expenses + transaction.amount),
                }
            });

    TransactionTotals {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
    }
}

fn month_label(date: Date) -> String {
    format!("{:04}-{:02}", date.year(), u8::from(date.month()))
}

/// Sum expenses by calendar month.
///
/// Income is ignored. Months without expenses are left out rather than filled with zero.
///
/// # Returns
/// One entry per month that has expenses, in chronological order.
pub fn monthly_expenses(transactions: &[Transaction]) -> Vec<MonthlyExpense> {
    let mut totals: HashMap<String, f64> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.transaction_type == TransactionType::Expense)
    {
        *totals.entry(month_label(transaction.date)).or_insert(0.0) += transaction.amount;
    }

    let mut monthly: Vec<MonthlyExpense> = totals
        .into_iter()
        .map(|(month, total)| MonthlyExpense { month, total })
        .collect();
    monthly.sort_by(|a, b| a.month.cmp(&b.month));

    monthly
}

/// Sum amounts by category for every transaction that has a category.
///
/// Income and expenses are added together. Use [expense_category_totals] for
/// a breakdown of spending only.
///
/// # Returns
/// The totals sorted from largest to smallest, with equal totals ordered by category ID.
pub fn category_totals(
    transactions: &[Transaction],
    categories: &CategoryTable,
) -> Vec<CategoryTotal> {
    totals_by_category(transactions.iter(), categories)
}

/// Sum the amounts of expenses by category.
///
/// Same as [category_totals] but ignores income.
pub fn expense_category_totals(
    transactions: &[Transaction],
    categories: &CategoryTable,
) -> Vec<CategoryTotal> {
    totals_by_category(
        transactions
            .iter()
            .filter(|transaction| transaction.transaction_type == TransactionType::Expense),
        categories,
    )
}

fn totals_by_category<'a>(
    transactions: impl Iterator<Item = &'a Transaction>,
    categories: &CategoryTable,
) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&CategoryId, f64> = HashMap::new();

    for transaction in transactions {
        if let Some(category_id) = &transaction.category {
            *totals.entry(category_id).or_insert(0.0) += transaction.amount;
        }
    }

    let mut category_totals: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category_id, total)| {
            let category = categories.get_or_unknown(category_id.as_str());

            CategoryTotal {
                category_id: category_id.clone(),
                name: category.name,
                icon: category.icon,
                color: category.color,
                total,
            }
        })
        .collect();

    category_totals.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category_id.cmp(&b.category_id))
    });

    category_totals
}

/// Keep the transactions in `category`, in their original order.
///
/// If `category` is `None`, every transaction is kept.
pub fn filter_by_category<'a, I>(transactions: I, category: Option<&CategoryId>) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    match category {
        Some(category) => transactions
            .into_iter()
            .filter(|transaction| transaction.category.as_ref() == Some(category))
            .collect(),
        None => transactions.into_iter().collect(),
    }
}

/// Format `amount` as dollars with two decimal places, e.g. "$12.34".
pub fn format_currency(amount: f64) -> String {
    format!("${amount:.2}")
}

/// The sign shown in front of an amount: "-" for expenses and "+" for income.
pub fn transaction_sign(transaction_type: TransactionType) -> &'static str {
    match transaction_type {
        TransactionType::Expense => "-",
        TransactionType::Income => "+",
    }
}
