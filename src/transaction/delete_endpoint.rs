use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    Error,
    app_state::TransactionState,
    database_id::TransactionId,
    stores::TransactionStore,
    transaction::form::{DeleteTransactionForm, RequestedId, require_id},
};

/// A route handler for deleting a transaction, responds with the ID of the deleted transaction.
pub async fn delete_transaction_endpoint<T>(
    State(mut state): State<TransactionState<T>>,
    payload: Result<Json<DeleteTransactionForm>, JsonRejection>,
) -> Result<impl IntoResponse, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let Json(form) = payload?;

    let id = delete_transaction(form, &mut state.transaction_store)?;

    Ok(Json(json!({ "id": id })))
}

/// Remove the transaction identified by `form` from `store`.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingId] if the form has no ID,
/// - [Error::DeleteMissingTransaction] if no transaction has the ID,
/// - or any other error from the store.
pub fn delete_transaction(
    form: DeleteTransactionForm,
    store: &mut impl TransactionStore,
) -> Result<TransactionId, Error> {
    match require_id(form.id.as_deref())? {
        RequestedId::Valid(id) => store.delete(id),
        RequestedId::Unknown => Err(Error::DeleteMissingTransaction),
    }
}
