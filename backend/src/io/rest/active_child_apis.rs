//! # REST API for the Active Child
//!
//! Which child a session is currently looking at.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::SetActiveChildRequest;
use tracing::info;

use super::error::ApiError;
use super::mappers::ChildMapper;
use super::session::AuthenticatedSession;
use crate::AppState;

/// Get the active child of the session
pub async fn get_active_child(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/active-child");

    let child = state.active_child_service.active_child(&session).await?;
    Ok(Json(ChildMapper::to_active_child_dto(child)))
}

/// Set the active child of a parent account
pub async fn set_active_child(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Json(request): Json<SetActiveChildRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /api/active-child - request: {:?}", request);

    let child = state
        .active_child_service
        .select_child(&session, &request.child_id)
        .await?;
    Ok(Json(ChildMapper::to_set_active_child_dto(child)))
}

/// Forget the explicit selection of a parent account
pub async fn reset_active_child(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /api/active-child");

    state.active_child_service.reset_selection(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}
