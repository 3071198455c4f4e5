//! A personal finance tracker for recording income and expenses.
//!
//! This library provides a JSON REST API for managing transactions and a dashboard
//! summary of them. Transactions are kept in SQLite or, for throwaway sessions, in memory.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod categories_endpoint;
pub mod category;
pub mod config;
pub mod dashboard;
mod database_id;
mod db;
pub mod endpoints;
mod error;
mod logging;
mod not_found;
mod routing;
pub mod stores;
pub mod transaction;

pub use app_state::{AppState, CategoryState, DashboardState, TransactionState};
pub use database_id::{DatabaseId, IN_MEMORY_ID_PREFIX, ParseTransactionIdError, TransactionId};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
