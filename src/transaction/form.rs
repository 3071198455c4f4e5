//! The request bodies for creating, updating and deleting transactions.
//!
//! Every field is optional at the type level so that a missing field is reported
//! as an [Error] with the field name rather than a generic deserialization error.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{
    Error,
    category::CategoryId,
    database_id::TransactionId,
    transaction::{NewTransaction, TransactionType, TransactionUpdate, parse_date},
};

/// An amount as sent by a client: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// A JSON number, e.g. `12.5`.
    Number(f64),
    /// A string holding a number, e.g. `"12.5"`.
    Text(String),
    /// Anything else, which is never a valid amount.
    Other(Value),
}

impl AmountInput {
    fn to_number(&self) -> Result<f64, Error> {
        match self {
            AmountInput::Number(number) => Ok(*number),
            AmountInput::Text(text) => text.trim().parse().map_err(|_| Error::InvalidAmount),
            AmountInput::Other(_) => Err(Error::InvalidAmount),
        }
    }
}

/// The fields of a transaction as sent by a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionForm {
    /// The amount of money, must be positive.
    #[serde(default)]
    pub amount: Option<AmountInput>,
    /// The date as `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
    /// What the transaction was for.
    #[serde(default)]
    pub description: Option<String>,
    /// Either "expense" or "income".
    #[serde(default, rename = "type")]
    pub transaction_type: Option<String>,
    /// The category ID.
    ///
    /// `None` means the field was absent, `Some(None)` means it was `null`.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub category: Option<Option<String>>,
}

/// Deserialize a field that is present, so that `null` and a missing field can be told apart.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

fn required<'a>(field: &'a Option<String>, name: &'static str) -> Result<&'a str, Error> {
    match field.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(Error::MissingField(name)),
    }
}

impl TransactionForm {
    /// Validate the form as a new transaction.
    ///
    /// # Errors
    /// Returns an [Error::MissingField] if any of `amount`, `date`, `description`
    /// or `type` is missing, otherwise any error from validating the fields.
    pub fn into_new_transaction(self) -> Result<NewTransaction, Error> {
        let amount = self
            .amount
            .as_ref()
            .ok_or(Error::MissingField("amount"))?;
        let date = required(&self.date, "date")?;
        let description = required(&self.description, "description")?;
        let transaction_type = required(&self.transaction_type, "type")?;

        let amount = amount.to_number()?;
        let date = parse_date(date)?;
        let transaction_type: TransactionType = transaction_type.parse()?;
        let category = self.category.flatten().as_deref().and_then(CategoryId::new);

        Ok(NewTransaction::new(amount, date, description, transaction_type)?.category(category))
    }

    /// Validate the fields that are present as changes to a transaction.
    ///
    /// Present fields must pass the same checks as [TransactionForm::into_new_transaction].
    /// A `null` or empty category removes the category.
    pub fn into_update(self) -> Result<TransactionUpdate, Error> {
        let mut update = TransactionUpdate::default();

        if let Some(amount) = &self.amount {
            update = update.amount(amount.to_number()?)?;
        }

        if self.date.is_some() {
            update = update.date(parse_date(required(&self.date, "date")?)?);
        }

        if let Some(description) = &self.description {
            update = update.description(description)?;
        }

        if self.transaction_type.is_some() {
            update = update.transaction_type(required(&self.transaction_type, "type")?.parse()?);
        }

        if let Some(category) = self.category {
            update = update.category(category.as_deref().and_then(CategoryId::new));
        }

        Ok(update)
    }
}

/// The body of a request to update a transaction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTransactionForm {
    /// The ID of the transaction to update.
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    /// The new values for the transaction.
    #[serde(flatten)]
    pub fields: TransactionForm,
}

/// The body of a request to delete a transaction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteTransactionForm {
    /// The ID of the transaction to delete.
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
}

/// The outcome of reading a transaction ID from a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestedId {
    /// The ID is well formed.
    Valid(TransactionId),
    /// The ID is not blank but cannot refer to any stored transaction.
    Unknown,
}

/// Read the transaction ID from a request body.
///
/// # Errors
/// Returns an [Error::MissingId] if `id` is missing or blank.
pub fn require_id(id: Option<&str>) -> Result<RequestedId, Error> {
    let id = id.map(str::trim).unwrap_or_default();

    if id.is_empty() {
        return Err(Error::MissingId);
    }

    Ok(id
        .parse()
        .map(RequestedId::Valid)
        .unwrap_or(RequestedId::Unknown))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::{OffsetDateTime, macros::date};

    use crate::{
        Error,
        category::CategoryId,
        database_id::TransactionId,
        transaction::{
            NewTransaction, TransactionType,
            form::{
                DeleteTransactionForm, RequestedId, TransactionForm, UpdateTransactionForm,
                require_id,
            },
        },
    };

    fn form(value: serde_json::Value) -> TransactionForm {
        serde_json::from_value(value).expect("Could not parse form")
    }

    #[test]
    fn valid_form_creates_transaction() {
        let new_transaction = form(json!({
            "amount": 100.50,
            "date": "2024-01-15",
            "description": "Test",
            "type": "expense",
        }))
        .into_new_transaction();

        assert_eq!(
            new_transaction,
            NewTransaction::new(100.5, date!(2024 - 01 - 15), "Test", TransactionType::Expense)
        );
    }

    #[test]
    fn numeric_string_amount_is_accepted() {
        let new_transaction = form(json!({
            "amount": "42.10",
            "date": "2024-01-15",
            "description": "Test",
            "type": "income",
            "category": "salary",
        }))
        .into_new_transaction()
        .unwrap();

        let stored = new_transaction.finalise(TransactionId::InMemory(1), OffsetDateTime::now_utc());
        assert_eq!(stored.amount, 42.1);
        assert_eq!(stored.category, CategoryId::new("salary"));
    }

    #[test]
    fn missing_fields_are_reported_by_name() {
        let cases = [
            (json!({"date": "2024-01-15", "description": "a", "type": "expense"}), "amount"),
            (json!({"amount": 1, "description": "a", "type": "expense"}), "date"),
            (json!({"amount": 1, "date": "2024-01-15", "type": "expense"}), "description"),
            (json!({"amount": 1, "date": "2024-01-15", "description": " ", "type": "expense"}), "description"),
            (json!({"amount": 1, "date": "2024-01-15", "description": "a"}), "type"),
        ];

        for (value, field) in cases {
            assert_eq!(
                form(value).into_new_transaction(),
                Err(Error::MissingField(field))
            );
        }
    }

    #[test]
    fn negative_amount_is_rejected() {
        let result = form(json!({
            "amount": -5,
            "date": "2024-01-15",
            "description": "Test",
            "type": "expense",
        }))
        .into_new_transaction();

        assert_eq!(result, Err(Error::NonPositiveAmount));
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        for amount in [json!("twelve"), json!(true), json!([1])] {
            let result = form(json!({
                "amount": amount,
                "date": "2024-01-15",
                "description": "Test",
                "type": "expense",
            }))
            .into_new_transaction();

            assert_eq!(result, Err(Error::InvalidAmount));
        }
    }

    #[test]
    fn empty_category_is_no_category() {
        let new_transaction = form(json!({
            "amount": 3,
            "date": "2024-01-15",
            "description": "Test",
            "type": "expense",
            "category": "",
        }))
        .into_new_transaction()
        .unwrap();

        let stored = new_transaction.finalise(TransactionId::InMemory(1), OffsetDateTime::now_utc());
        assert_eq!(stored.category, None);
    }

    #[test]
    fn update_form_reads_id_and_partial_fields() {
        let update: UpdateTransactionForm = serde_json::from_value(json!({
            "_id": "mem_1",
            "amount": 150.00,
            "description": "Updated",
        }))
        .unwrap();

        assert_eq!(update.id.as_deref(), Some("mem_1"));
        assert!(update.fields.date.is_none());
        assert!(update.fields.category.is_none());
        assert!(update.fields.into_update().is_ok());
    }

    #[test]
    fn update_form_validates_present_fields() {
        let cases = [
            (json!({"amount": 0}), Error::NonPositiveAmount),
            (json!({"description": ""}), Error::EmptyDescription),
            (json!({"date": "yesterday"}), Error::InvalidDate("yesterday".to_owned())),
            (json!({"type": "loan"}), Error::InvalidTransactionType("loan".to_owned())),
        ];

        for (value, want) in cases {
            assert_eq!(form(value).into_update(), Err(want));
        }
    }

    #[test]
    fn null_category_is_distinguished_from_missing_category() {
        assert_eq!(form(json!({"category": null})).category, Some(None));
        assert_eq!(form(json!({})).category, None);
    }

    #[test]
    fn require_id_rejects_blank_ids() {
        assert_eq!(require_id(None), Err(Error::MissingId));
        assert_eq!(require_id(Some("  ")), Err(Error::MissingId));
    }

    #[test]
    fn require_id_flags_ids_that_cannot_exist() {
        let delete: DeleteTransactionForm =
            serde_json::from_value(json!({"id": "not-an-id"})).unwrap();

        assert_eq!(require_id(delete.id.as_deref()), Ok(RequestedId::Unknown));
        assert_eq!(
            require_id(Some("7")),
            Ok(RequestedId::Valid(TransactionId::Database(7)))
        );
    }
}
