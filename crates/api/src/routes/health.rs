//! Liveness endpoint for load balancers and the deploy pipeline.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
    db_healthy: bool,
    /// Configured email delivery backend (`http`, `smtp` or `none`).
    email_provider: &'static str,
    /// Configured upload backend (`http` or `local`).
    storage_backend: &'static str,
}

/// GET /health
///
/// Answers 503 when the database cannot be reached so that the instance is
/// taken out of rotation. Email and storage backends are reported from configuration only.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<Health>) {
    let db_healthy = match dealership_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Health check: database unreachable");
            false
        }
    };

    let code = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let body = Health {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        email_provider: state.config.email.provider.name(),
        storage_backend: state.config.storage.backend_name(),
    };
    (code, Json(body))
}

/// Root-level routes, mounted outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
