//! # REST API for Child Management
//!
//! Endpoints for creating, retrieving, updating and deleting child profiles,
//! plus the per-child invite code and link lookups.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{ChildLinkResponse, CreateChildRequest, InviteCodeResponse, UpdateChildRequest};
use tracing::info;

use super::error::ApiError;
use super::mappers::{ChildMapper, LinkMapper};
use super::session::AuthenticatedSession;
use crate::AppState;

/// Create a new child owned by the calling parent
pub async fn create_child(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Json(request): Json<CreateChildRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/children - request: {:?}", request);

    let child = state
        .child_service
        .create_child(&session, ChildMapper::to_create_command(request))
        .await?;
    let response = ChildMapper::to_child_response_dto(child, "Child created successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get a child by ID
pub async fn get_child(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(child_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/children/{}", child_id);

    let child = state.child_service.get_child_for_session(&session, &child_id).await?;
    Ok(Json(ChildMapper::to_dto(child)))
}

/// List the children visible to the session
pub async fn list_children(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/children");

    let children = state.child_service.list_children(&session).await?;
    Ok(Json(ChildMapper::to_child_list_dto(children)))
}

/// Update a child
pub async fn update_child(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(child_id): Path<String>,
    Json(request): Json<UpdateChildRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /api/children/{} - request: {:?}", child_id, request);

    let child = state
        .child_service
        .update_child(&session, &child_id, ChildMapper::to_update_command(request))
        .await?;
    Ok(Json(ChildMapper::to_child_response_dto(child, "Child updated successfully")))
}

/// Delete a child
pub async fn delete_child(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(child_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /api/children/{}", child_id);

    state.child_service.delete_child(&session, &child_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Invite code for one of the parent's children
pub async fn get_invite_code(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(child_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/children/{}/invite-code", child_id);

    if !session.is_parent() {
        return Err(ApiError::forbidden("PARENT_ONLY", "Only parents can share invite codes"));
    }

    let invite_code = state
        .link_service
        .invite_code_for(&session.account_id, &child_id)
        .await?;
    Ok(Json(InviteCodeResponse { child_id, invite_code }))
}

/// Link state of a child visible to the session
pub async fn get_child_link(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(child_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/children/{}/link", child_id);

    state.child_service.get_child_for_session(&session, &child_id).await?;
    let link = state.link_service.link_for_child(&child_id).await?;
    Ok(Json(ChildLinkResponse {
        link: link.map(LinkMapper::to_dto),
    }))
}
