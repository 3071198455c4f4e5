//! Application router configuration.

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::{
    AppState,
    categories_endpoint::get_categories_endpoint,
    dashboard::get_dashboard_endpoint,
    endpoints,
    not_found::get_404_not_found,
    stores::TransactionStore,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_transaction_endpoint, get_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router<T>(state: AppState<T>) -> Router
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions_endpoint::<T>)
                .post(create_transaction_endpoint::<T>)
                .put(edit_transaction_endpoint::<T>)
                .delete(delete_transaction_endpoint::<T>),
        )
        .route(endpoints::TRANSACTION, get(get_transaction_endpoint::<T>))
        .route(endpoints::CATEGORIES, get(get_categories_endpoint))
        .route(endpoints::DASHBOARD, get(get_dashboard_endpoint::<T>))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Report that the server is up.
async fn get_health() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}
