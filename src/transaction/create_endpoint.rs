use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    Error,
    app_state::TransactionState,
    stores::TransactionStore,
    transaction::{Transaction, TransactionForm},
};

/// A route handler for creating a new transaction, responds with the stored transaction.
pub async fn create_transaction_endpoint<T>(
    State(mut state): State<TransactionState<T>>,
    payload: Result<Json<TransactionForm>, JsonRejection>,
) -> Result<Json<Transaction>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let Json(form) = payload?;

    create_transaction(form, &mut state.transaction_store).map(Json)
}

/// Validate `form` and add the transaction to `store`.
///
/// Nothing is stored if validation fails.
///
/// # Errors
/// This function will return a validation error (see [Error::is_validation_error])
/// if the form is incomplete or invalid, or any error from the store.
pub fn create_transaction(
    form: TransactionForm,
    store: &mut impl TransactionStore,
) -> Result<Transaction, Error> {
    let new_transaction = form.into_new_transaction()?;

    store.create(new_transaction)
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use time::macros::date;

    use crate::{
        AppState, Error, build_router,
        category::CategoryTable,
        stores::{InMemoryTransactionStore, TransactionStore},
        transaction::{Transaction, TransactionForm, TransactionType},
    };

    use super::create_transaction;

    fn form(value: Value) -> TransactionForm {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn creates_transaction_with_id_and_timestamps() {
        let mut store = InMemoryTransactionStore::new();

        let transaction = create_transaction(
            form(json!({
                "amount": 100.50,
                "date": "2024-01-15",
                "description": "Test",
                "type": "expense",
            })),
            &mut store,
        )
        .unwrap();

        assert_eq!(transaction.id.to_string(), "mem_1");
        assert_eq!(transaction.amount, 100.5);
        assert_eq!(transaction.date, date!(2024 - 01 - 15));
        assert_eq!(transaction.transaction_type, TransactionType::Expense);
        assert_eq!(transaction.created_at, transaction.updated_at);
    }

    #[test]
    fn negative_amount_persists_nothing() {
        let mut store = InMemoryTransactionStore::new();

        let result = create_transaction(
            form(json!({
                "amount": -5,
                "date": "2024-01-15",
                "description": "Test",
                "type": "expense",
            })),
            &mut store,
        );

        assert_eq!(result, Err(Error::NonPositiveAmount));
        assert_eq!(store.list(), Ok(vec![]));
    }

    fn get_test_server() -> TestServer {
        let state = AppState::new(InMemoryTransactionStore::new(), CategoryTable::predefined());

        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn post_returns_stored_transaction() {
        let server = get_test_server();

        let response = server
            .post("/api/transactions")
            .json(&json!({
                "amount": "12.50",
                "date": "2024-02-01",
                "description": "Groceries",
                "type": "expense",
                "category": "food-dining",
            }))
            .await;

        response.assert_status_ok();
        let transaction = response.json::<Transaction>();
        assert_eq!(transaction.amount, 12.5);
        assert_eq!(
            transaction.category.as_ref().map(|category| category.as_str()),
            Some("food-dining")
        );
    }

    #[tokio::test]
    async fn post_rejects_missing_fields() {
        let server = get_test_server();

        let response = server
            .post("/api/transactions")
            .json(&json!({ "amount": 12.5 }))
            .await;

        response.assert_status_bad_request();
        let body = response.json::<Value>();
        assert_eq!(body["error"], "missing required field \"date\"");
    }

    #[tokio::test]
    async fn post_rejects_wrongly_typed_fields_as_bad_request() {
        let server = get_test_server();

        let response = server
            .post("/api/transactions")
            .json(&json!({
                "amount": 5,
                "date": 20240115,
                "description": "Coffee",
                "type": "expense",
            }))
            .await;

        response.assert_status_bad_request();
        let body = response.json::<Value>();
        assert!(
            body["error"]
                .as_str()
                .is_some_and(|message| message.starts_with("invalid request body")),
            "{body}"
        );
    }

    #[tokio::test]
    async fn post_rejects_body_that_is_not_json() {
        let server = get_test_server();

        let response = server.post("/api/transactions").text("amount=5").await;

        response.assert_status_bad_request();
        assert!(response.json::<Value>()["error"].is_string());
    }
}
