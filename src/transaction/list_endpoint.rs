use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    Error,
    app_state::TransactionState,
    database_id::TransactionId,
    stores::TransactionStore,
    transaction::Transaction,
};

/// A route handler for listing all transactions, newest date first.
pub async fn get_transactions_endpoint<T>(
    State(state): State<TransactionState<T>>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    state.transaction_store.list().map(Json)
}

/// A route handler for getting a single transaction by its ID.
///
/// IDs that are not well formed are treated the same as IDs that are not stored.
pub async fn get_transaction_endpoint<T>(
    State(state): State<TransactionState<T>>,
    Path(transaction_id): Path<String>,
) -> Result<Json<Transaction>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let id: TransactionId = transaction_id.parse().map_err(|_| Error::NotFound)?;

    state.transaction_store.get(id).map(Json)
}
