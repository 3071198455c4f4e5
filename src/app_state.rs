//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{category::CategoryTable, stores::TransactionStore};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// The store for managing [transactions](crate::transaction::Transaction).
    pub transaction_store: T,
    /// The lookup table of predefined categories.
    pub categories: Arc<CategoryTable>,
}

impl<T> AppState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// Create a new [AppState].
    pub fn new(transaction_store: T, categories: CategoryTable) -> Self {
        Self {
            transaction_store,
            categories: Arc::new(categories),
        }
    }
}

/// The state needed to get, create, update or delete a transaction.
#[derive(Debug, Clone)]
pub struct TransactionState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// The store for managing [transactions](crate::transaction::Transaction).
    pub transaction_store: T,
}

impl<T> FromRef<AppState<T>> for TransactionState<T>
where
    T: TransactionStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<T>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// The state needed for listing categories.
#[derive(Debug, Clone)]
pub struct CategoryState {
    /// The lookup table of predefined categories.
    pub categories: Arc<CategoryTable>,
}

impl<T> FromRef<AppState<T>> for CategoryState
where
    T: TransactionStore + Send + Sync,
{
    fn from_ref(state: &AppState<T>) -> Self {
        Self {
            categories: state.categories.clone(),
        }
    }
}

/// The state needed for the dashboard summary.
#[derive(Debug, Clone)]
pub struct DashboardState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// The store for managing [transactions](crate::transaction::Transaction).
    pub transaction_store: T,
    /// The lookup table of predefined categories.
    pub categories: Arc<CategoryTable>,
}

impl<T> FromRef<AppState<T>> for DashboardState<T>
where
    T: TransactionStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<T>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            categories: state.categories.clone(),
        }
    }
}
