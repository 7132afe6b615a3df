//! Session API endpoints
//!
//! The hosted auth provider pushes its state transitions here:
//! - GET /api/v1/session - Current auth state, as seen by the caller
//! - PUT /api/v1/session - Publish a new auth state (provider secret required)
//! - DELETE /api/v1/session - Sign out (provider secret or session token)
//!
//! A signed-in publish answers with a fresh session token. Clients present it
//! as `Authorization: Bearer <token>` on submission and moderation routes.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::api::middleware::{ApiError, AppState};
use crate::models::AuthState;

/// Auth state plus the token issued for it
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub state: AuthState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Build the session router
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(get_session).put(publish_session).delete(sign_out),
    )
}

/// GET /api/v1/session - The user is only revealed to holders of the session
/// token or the provider secret
async fn get_session(State(state): State<AppState>, headers: HeaderMap) -> Json<AuthState> {
    let mut current = state.session.current();
    if current.user.is_some() && state.session_user(&headers).is_none() && !state.is_provider(&headers)
    {
        current.user = None;
    }
    Json(current)
}

/// PUT /api/v1/session - Returns the state as stored, display name filled in
async fn publish_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(auth_state): Json<AuthState>,
) -> Result<Json<SessionResponse>, ApiError> {
    if !state.is_provider(&headers) {
        tracing::warn!("Rejected session push without the provider secret");
        return Err(ApiError::unauthorized("Session pushes require the provider secret"));
    }

    let token = state.session.publish(auth_state);
    Ok(Json(SessionResponse {
        state: state.session.current(),
        token,
    }))
}

async fn sign_out(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    if !state.is_provider(&headers) && state.session_user(&headers).is_none() {
        return Err(ApiError::unauthorized("Invalid or expired session"));
    }

    state.session.sign_out();
    Ok(StatusCode::NO_CONTENT)
}
