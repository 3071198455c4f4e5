use std::{fs::OpenOptions, path::Path, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use finance_tracker::{
    AppState, build_router,
    category::CategoryTable,
    config::{ServerConfig, StorageBackend},
    graceful_shutdown, logging_middleware,
    stores::{InMemoryTransactionStore, sqlite::create_app_state},
};

/// The REST API server for the finance tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    config: ServerConfig,
}

#[tokio::main]
async fn main() {
    let config = Args::parse().config;

    setup_logging(&config.log_path);

    let categories = CategoryTable::predefined();
    let router = match config.store {
        StorageBackend::Sqlite => {
            let connection = Connection::open(&config.db_path).unwrap_or_else(|error| {
                panic!(
                    "Could not open database file {}: {error}",
                    config.db_path.display()
                )
            });
            let state = create_app_state(connection, categories)
                .expect("Could not initialize the database.");
            tracing::info!("Using SQLite database {}", config.db_path.display());

            build_router(state)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using the in-memory store, transactions will be lost on shutdown.");

            build_router(AppState::new(InMemoryTransactionStore::new(), categories))
        }
    };

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(router.layer(middleware::from_fn(logging_middleware)));

    let addr = config.socket_addr();
    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("Server stopped unexpectedly.");
}

fn setup_logging(log_path: &Path) {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
