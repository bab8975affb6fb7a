//! # REST API for Announcements
//!
//! School notices for a child, newest first.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{CreateAnnouncementRequest, UpdateAnnouncementRequest};
use tracing::info;

use super::error::ApiError;
use super::mappers::AnnouncementMapper;
use super::session::AuthenticatedSession;
use crate::AppState;

/// Announcements of a child, newest first
pub async fn list_announcements(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(child_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/children/{}/announcements", child_id);

    let items = state.announcement_service.list_announcements(&session, &child_id).await?;
    Ok(Json(AnnouncementMapper::to_list_dto(items)))
}

pub async fn create_announcement(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(child_id): Path<String>,
    Json(request): Json<CreateAnnouncementRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/children/{}/announcements - request: {:?}", child_id, request);

    let created = state
        .announcement_service
        .create_announcement(&session, AnnouncementMapper::to_create_command(child_id, request))
        .await?;
    let response = AnnouncementMapper::to_response_dto(created, "Announcement created successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_announcement(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(announcement_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/announcements/{}", announcement_id);

    let item = state.announcement_service.get_announcement(&session, &announcement_id).await?;
    Ok(Json(AnnouncementMapper::to_dto(item)))
}

pub async fn update_announcement(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(announcement_id): Path<String>,
    Json(request): Json<UpdateAnnouncementRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /api/announcements/{} - request: {:?}", announcement_id, request);

    let updated = state
        .announcement_service
        .update_announcement(&session, &announcement_id, AnnouncementMapper::to_update_command(request))
        .await?;
    Ok(Json(AnnouncementMapper::to_response_dto(updated, "Announcement updated successfully")))
}

pub async fn delete_announcement(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(announcement_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /api/announcements/{}", announcement_id);

    state.announcement_service.delete_announcement(&session, &announcement_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
