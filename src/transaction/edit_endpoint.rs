use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    Error,
    app_state::TransactionState,
    stores::TransactionStore,
    transaction::{
        Transaction,
        form::{RequestedId, UpdateTransactionForm, require_id},
    },
};

/// A route handler for updating a transaction, responds with the updated transaction.
///
/// The ID of the transaction is read from the `id` (or `_id`) field of the body.
pub async fn edit_transaction_endpoint<T>(
    State(mut state): State<TransactionState<T>>,
    payload: Result<Json<UpdateTransactionForm>, JsonRejection>,
) -> Result<Json<Transaction>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let Json(form) = payload?;

    update_transaction(form, &mut state.transaction_store).map(Json)
}

/// Apply the fields present in `form` to the transaction it identifies.
///
/// Fields that are present are validated with the same rules used when creating a
/// transaction. Fields that are absent are left unchanged.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingId] if the form has no ID,
/// - validation error if a present field is invalid,
/// - [Error::UpdateMissingTransaction] if no transaction has the ID,
/// - or any other error from the store.
pub fn update_transaction(
    form: UpdateTransactionForm,
    store: &mut impl TransactionStore,
) -> Result<Transaction, Error> {
    let requested_id = require_id(form.id.as_deref())?;
    let update = form.fields.into_update()?;

    match requested_id {
        RequestedId::Valid(id) => store.update(id, update),
        RequestedId::Unknown => Err(Error::UpdateMissingTransaction),
    }
}
