//! Admin session cookie handling and the admin gate middleware.
//!
//! The cookie value is `HMAC(SESSION_SECRET, current_password_hash)`. The
//! current hash is the one stored in `admin_settings`, or the hash of
//! `ADMIN_PASSWORD` until a password has been set from the admin panel.

use axum::extract::{Request, State};
use axum::http::header::{ACCEPT, COOKIE};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use dealership_core::auth::{hash_password, verify_session_token};
use dealership_core::error::CoreError;
use dealership_db::repositories::AdminSettingRepo;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Name of the admin session cookie.
pub const SESSION_COOKIE: &str = "admin_session";

/// Where browsers are sent when they hit a gated page without a session.
pub const LOGIN_PAGE: &str = "/admin/login";

/// Extract a cookie value from the request headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
}

/// The password hash logins are checked against.
pub async fn current_password_hash(state: &AppState) -> AppResult<String> {
    let stored = AdminSettingRepo::get_password_hash(&state.pool).await?;
    Ok(stored.unwrap_or_else(|| hash_password(&state.config.admin_password)))
}

/// Whether the request carries a valid admin session cookie.
pub async fn is_authenticated(state: &AppState, headers: &HeaderMap) -> AppResult<bool> {
    let Some(presented) = read_cookie(headers, SESSION_COOKIE) else {
        return Ok(false);
    };
    let hash = current_password_hash(state).await?;
    Ok(verify_session_token(
        &state.config.session_secret,
        &hash,
        &presented,
    ))
}

/// `Set-Cookie` value establishing a session.
pub fn session_cookie(config: &ServerConfig, token: &str) -> String {
    build_cookie(config, token, config.session_ttl_secs())
}

/// `Set-Cookie` value removing the session.
pub fn clear_session_cookie(config: &ServerConfig) -> String {
    build_cookie(config, "", 0)
}

fn build_cookie(config: &ServerConfig, value: &str, max_age: u64) -> String {
    let mut cookie =
        format!("{SESSION_COOKIE}={value}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age}");
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

fn wants_html(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("text/html"))
}

/// Gate for every admin route except login, logout and session status.
///
/// Browsers navigating to a gated page are redirected (303) to the login
/// page; API clients get a 401 JSON error.
pub async fn require_admin(State(state): State<AppState>, request: Request, next: Next) -> Response {
    match is_authenticated(&state, request.headers()).await {
        Ok(true) => next.run(request).await,
        Ok(false) => {
            tracing::debug!(path = %request.uri().path(), "Rejected unauthenticated admin request");
            if wants_html(request.headers()) {
                Redirect::to(LOGIN_PAGE).into_response()
            } else {
                AppError::Core(CoreError::Unauthorized("Admin session required".into()))
                    .into_response()
            }
        }
        Err(e) => e.into_response(),
    }
}
