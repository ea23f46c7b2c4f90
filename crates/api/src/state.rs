use std::sync::Arc;

use dealership_notify::Mailer;

use crate::config::ServerConfig;
use crate::storage::ObjectStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: dealership_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Outgoing email (order and lead notifications).
    pub mailer: Arc<dyn Mailer>,
    /// Destination for uploaded images.
    pub object_store: Arc<dyn ObjectStore>,
}
