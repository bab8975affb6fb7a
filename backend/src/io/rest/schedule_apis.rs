//! # REST API for the Schedule
//!
//! Calendar events of a child.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{CreateScheduleRequest, UpdateScheduleRequest};
use tracing::info;

use super::error::ApiError;
use super::mappers::ScheduleMapper;
use super::session::AuthenticatedSession;
use crate::AppState;

pub async fn list_schedule_events(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(child_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/children/{}/schedules", child_id);

    let items = state.schedule_service.list_events(&session, &child_id).await?;
    Ok(Json(ScheduleMapper::to_list_dto(items)))
}

/// Create an event. All-day events are moved to midnight and lose their end time.
pub async fn create_schedule_event(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(child_id): Path<String>,
    Json(request): Json<CreateScheduleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/children/{}/schedules - request: {:?}", child_id, request);

    let created = state
        .schedule_service
        .create_event(&session, ScheduleMapper::to_create_command(child_id, request))
        .await?;
    let response = ScheduleMapper::to_response_dto(created, "Schedule event created successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_schedule_event(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/schedules/{}", event_id);

    let item = state.schedule_service.get_event(&session, &event_id).await?;
    Ok(Json(ScheduleMapper::to_dto(item)))
}

pub async fn update_schedule_event(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(event_id): Path<String>,
    Json(request): Json<UpdateScheduleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /api/schedules/{} - request: {:?}", event_id, request);

    let updated = state
        .schedule_service
        .update_event(&session, &event_id, ScheduleMapper::to_update_command(request))
        .await?;
    Ok(Json(ScheduleMapper::to_response_dto(updated, "Schedule event updated successfully")))
}

pub async fn delete_schedule_event(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /api/schedules/{}", event_id);

    state.schedule_service.delete_event(&session, &event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
