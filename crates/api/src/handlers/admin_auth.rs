//! Admin login, logout, session status and password change.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use dealership_core::auth::{
    hash_password, session_token, validate_new_password, verify_password, MIN_PASSWORD_LENGTH,
};
use dealership_core::error::CoreError;
use dealership_db::repositories::AdminSettingRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::session::{
    clear_session_cookie, current_password_hash, is_authenticated, session_cookie,
};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
}

/// POST /api/v1/admin/login
///
/// A correct password sets the session cookie. A wrong one returns 401 and
/// never sets it.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let hash = current_password_hash(&state).await?;
    if !verify_password(&input.password, &hash) {
        tracing::warn!("Admin login failed");
        return Err(CoreError::Unauthorized("Invalid password".into()).into());
    }

    let token = session_token(&state.config.session_secret, &hash);
    tracing::info!("Admin logged in");

    Ok((
        [(SET_COOKIE, session_cookie(&state.config, &token))],
        Json(DataResponse {
            data: SessionStatus {
                authenticated: true,
            },
        }),
    ))
}

/// POST /api/v1/admin/logout
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(SET_COOKIE, clear_session_cookie(&state.config))],
        Json(DataResponse {
            data: SessionStatus {
                authenticated: false,
            },
        }),
    )
}

/// GET /api/v1/admin/session
pub async fn session_status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let authenticated = is_authenticated(&state, &headers).await?;
    Ok(Json(DataResponse {
        data: SessionStatus { authenticated },
    }))
}

/// PUT /api/v1/admin/password
///
/// Replace the admin password. Every existing session is invalidated; the
/// caller receives a fresh cookie.
pub async fn change_password(
    State(state): State<AppState>,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<impl IntoResponse> {
    let current = current_password_hash(&state).await?;
    if !verify_password(&input.current_password, &current) {
        return Err(CoreError::Unauthorized("Current password is incorrect".into()).into());
    }
    validate_new_password(&input.new_password, MIN_PASSWORD_LENGTH)?;

    let new_hash = hash_password(&input.new_password);
    AdminSettingRepo::set_password_hash(&state.pool, &new_hash).await?;
    tracing::info!("Admin password changed");

    let token = session_token(&state.config.session_secret, &new_hash);
    Ok((
        [(SET_COOKIE, session_cookie(&state.config, &token))],
        Json(DataResponse {
            data: SessionStatus {
                authenticated: true,
            },
        }),
    ))
}
