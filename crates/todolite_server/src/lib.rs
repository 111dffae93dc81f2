//! HTTP surface for Todolite.
//!
//! # Responsibility
//! - Translate HTTP exchanges into core store operations.
//! - Own router construction and shared connection state.
//!
//! # Invariants
//! - Handlers hold the connection lock only for the duration of one store
//!   operation; no lock is held across other await points.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use rusqlite::Connection;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

pub mod api;
pub mod config;
pub mod error;

use api::{create_todo, delete_todo, get_todo, health, list_todos, update_todo};

/// Shared connection handle behind the router.
///
/// `rusqlite::Connection` is `Send` but not `Sync`, so access is serialized
/// through an async mutex rather than a reader/writer split.
pub type Db = Arc<Mutex<Connection>>;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
}

/// Builds the application router over a migrated connection.
pub fn app(conn: Connection) -> Router {
    let state = AppState {
        db: Arc::new(Mutex::new(conn)),
    };
    Router::new()
        .route("/health", get(health))
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(state)
}

/// Serves the application until the listener is closed.
pub async fn run(listener: TcpListener, conn: Connection) -> Result<(), std::io::Error> {
    axum::serve(listener, app(conn)).await
}
