//! Admin routes.
//!
//! Two routers are provided:
//! - `auth_router()` for login, logout and session status (public)
//! - `gated_router()` for everything behind the session cookie

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::{middleware, Router};

use crate::handlers::{admin_auth, admin_gear, admin_leads, admin_vehicles, dashboard, uploads};
use crate::middleware::session::require_admin;
use crate::state::AppState;

/// Room for multipart boundaries and the `folder` field on top of the file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Public admin session routes mounted at `/admin`.
///
/// ```text
/// POST /login    -> login
/// POST /logout   -> logout
/// GET  /session  -> session_status
/// ```
pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin_auth::login))
        .route("/logout", post(admin_auth::logout))
        .route("/session", get(admin_auth::session_status))
}

/// Session-gated admin routes mounted at `/admin`.
///
/// ```text
/// GET            /dashboard       -> summary
/// GET, POST      /vehicles        -> list, create
/// GET, PUT, DEL  /vehicles/{id}   -> get, update, delete
/// GET, POST      /gear            -> list, create
/// GET, PUT, DEL  /gear/{id}       -> get, update, delete
/// GET            /leads           -> list
/// GET, PUT, DEL  /leads/{id}      -> get, update, delete
/// PUT            /password        -> change_password
/// POST           /uploads         -> upload_image (multipart)
/// ```
pub fn gated_router(state: AppState) -> Router<AppState> {
    let upload_limit = state.config.upload_max_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/dashboard", get(dashboard::summary))
        .route(
            "/vehicles",
            get(admin_vehicles::list_vehicles).post(admin_vehicles::create_vehicle),
        )
        .route(
            "/vehicles/{id}",
            get(admin_vehicles::get_vehicle)
                .put(admin_vehicles::update_vehicle)
                .delete(admin_vehicles::delete_vehicle),
        )
        .route(
            "/gear",
            get(admin_gear::list_gear).post(admin_gear::create_gear),
        )
        .route(
            "/gear/{id}",
            get(admin_gear::get_gear)
                .put(admin_gear::update_gear)
                .delete(admin_gear::delete_gear),
        )
        .route("/leads", get(admin_leads::list_leads))
        .route(
            "/leads/{id}",
            get(admin_leads::get_lead)
                .put(admin_leads::update_lead)
                .delete(admin_leads::delete_lead),
        )
        .route("/password", put(admin_auth::change_password))
        .route(
            "/uploads",
            post(uploads::upload_image).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}
