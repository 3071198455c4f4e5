//! Defines the core data models and validation rules for transactions.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use time::{
    Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::{Error, category::CategoryId, database_id::TransactionId};

const ISO_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was spent or earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was spent.
    Expense,
    /// Money that was earned.
    Income,
}

impl TransactionType {
    /// The lowercase name used in JSON and in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim() {
            "expense" => Ok(TransactionType::Expense),
            "income" => Ok(TransactionType::Income),
            other => Err(Error::InvalidTransactionType(other.to_owned())),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are only ever created by a
/// [TransactionStore](crate::stores::TransactionStore), which assigns the ID and
/// timestamps. To describe a transaction that has not been stored yet, use
/// [NewTransaction].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent or earned in this transaction. Always positive.
    pub amount: f64,
    /// When the transaction happened.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// Whether the money was spent or earned.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The ID of the category the transaction belongs to.
    #[serde(
        default,
        deserialize_with = "deserialize_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<CategoryId>,
    /// When the transaction was first stored.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the transaction was last changed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Read a category ID so that a blank string means no category.
fn deserialize_category<'de, D>(deserializer: D) -> Result<Option<CategoryId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .as_deref()
        .and_then(CategoryId::new))
}

/// The validated fields of a transaction that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    amount: f64,
    date: Date,
    description: String,
    transaction_type: TransactionType,
    category: Option<CategoryId>,
}

impl NewTransaction {
    /// Validate the fields for a new transaction.
    ///
    /// `amount` is rounded to whole cents and `description` is trimmed.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if `amount` is not a finite number,
    /// - [Error::NonPositiveAmount] if `amount` rounds to zero or less,
    /// - or [Error::EmptyDescription] if `description` is blank.
    pub fn new(
        amount: f64,
        date: Date,
        description: &str,
        transaction_type: TransactionType,
    ) -> Result<Self, Error> {
        Ok(Self {
            amount: validate_amount(amount)?,
            date,
            description: validate_description(description)?,
            transaction_type,
            category: None,
        })
    }

    /// Set the category for the transaction.
    pub fn category(mut self, category: Option<CategoryId>) -> Self {
        self.category = category;
        self
    }

    /// Create the stored [Transaction] with the store assigned `id` and timestamp.
    pub fn finalise(self, id: TransactionId, now: OffsetDateTime) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            date: self.date,
            description: self.description,
            transaction_type: self.transaction_type,
            category: self.category,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A validated set of changes to apply to a stored transaction.
///
/// Fields that are not set are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionUpdate {
    amount: Option<f64>,
    date: Option<Date>,
    description: Option<String>,
    transaction_type: Option<TransactionType>,
    category: Option<Option<CategoryId>>,
}

impl TransactionUpdate {
    /// Change the amount, validated with the same rules as [NewTransaction::new].
    pub fn amount(mut self, amount: f64) -> Result<Self, Error> {
        self.amount = Some(validate_amount(amount)?);
        Ok(self)
    }

    /// Change the date.
    pub fn date(mut self, date: Date) -> Self {
        self.date = Some(date);
        self
    }

    /// Change the description, validated with the same rules as [NewTransaction::new].
    pub fn description(mut self, description: &str) -> Result<Self, Error> {
        self.description = Some(validate_description(description)?);
        Ok(self)
    }

    /// Change the transaction type.
    pub fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }

    /// Change the category. `None` removes the category.
    pub fn category(mut self, category: Option<CategoryId>) -> Self {
        self.category = Some(category);
        self
    }

    /// Apply the changes to `transaction` and stamp it with `now` as the update time.
    pub fn apply(self, mut transaction: Transaction, now: OffsetDateTime) -> Transaction {
        if let Some(amount) = self.amount {
            transaction.amount = amount;
        }
        if let Some(date) = self.date {
            transaction.date = date;
        }
        if let Some(description) = self.description {
            transaction.description = description;
        }
        if let Some(transaction_type) = self.transaction_type {
            transaction.transaction_type = transaction_type;
        }
        if let Some(category) = self.category {
            transaction.category = category;
        }

        transaction.updated_at = now;
        transaction
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Check that `amount` is a positive number and round it to whole cents.
pub fn validate_amount(amount: f64) -> Result<f64, Error> {
    if !amount.is_finite() {
        return Err(Error::InvalidAmount);
    }

    let rounded = (amount * 100.0).round() / 100.0;

    if !rounded.is_finite() {
        Err(Error::InvalidAmount)
    } else if rounded <= 0.0 {
        Err(Error::NonPositiveAmount)
    } else {
        Ok(rounded)
    }
}

fn validate_description(description: &str) -> Result<String, Error> {
    let description = description.trim();

    if description.is_empty() {
        Err(Error::EmptyDescription)
    } else {
        Ok(description.to_owned())
    }
}

/// Parse an ISO 8601 calendar date, e.g. "2024-01-15".
pub fn parse_date(text: &str) -> Result<Date, Error> {
    let text = text.trim();

    Date::parse(text, ISO_DATE_FORMAT).map_err(|_| Error::InvalidDate(text.to_owned()))
}
