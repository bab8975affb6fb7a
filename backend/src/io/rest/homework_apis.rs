//! # REST API for Homework
//!
//! Homework of a child. Parents manage it; the linked child account reads
//! it and ticks items off through the completion endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{CreateHomeworkRequest, SetHomeworkCompletedRequest, UpdateHomeworkRequest};
use tracing::info;

use super::error::ApiError;
use super::mappers::HomeworkMapper;
use super::session::AuthenticatedSession;
use crate::AppState;

/// Homework of a child ordered by due date
pub async fn list_homework(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(child_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/children/{}/homework", child_id);

    let homework = state.homework_service.list_homework(&session, &child_id).await?;
    Ok(Json(HomeworkMapper::to_list_dto(homework)))
}

pub async fn create_homework(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(child_id): Path<String>,
    Json(request): Json<CreateHomeworkRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/children/{}/homework - request: {:?}", child_id, request);

    let homework = state
        .homework_service
        .create_homework(&session, HomeworkMapper::to_create_command(child_id, request))
        .await?;
    let response = HomeworkMapper::to_response_dto(homework, "Homework created successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_homework(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(homework_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/homework/{}", homework_id);

    let homework = state.homework_service.get_homework(&session, &homework_id).await?;
    Ok(Json(HomeworkMapper::to_dto(homework)))
}

pub async fn update_homework(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(homework_id): Path<String>,
    Json(request): Json<UpdateHomeworkRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /api/homework/{} - request: {:?}", homework_id, request);

    let homework = state
        .homework_service
        .update_homework(&session, &homework_id, HomeworkMapper::to_update_command(request))
        .await?;
    Ok(Json(HomeworkMapper::to_response_dto(homework, "Homework updated successfully")))
}

/// Mark homework done or reopen it
pub async fn set_homework_completed(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(homework_id): Path<String>,
    Json(request): Json<SetHomeworkCompletedRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /api/homework/{}/completion - request: {:?}", homework_id, request);

    let homework = state
        .homework_service
        .set_homework_completed(&session, &homework_id, request.completed)
        .await?;
    let message = if request.completed {
        "Homework marked as done"
    } else {
        "Homework reopened"
    };
    Ok(Json(HomeworkMapper::to_response_dto(homework, message)))
}

pub async fn delete_homework(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(homework_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /api/homework/{}", homework_id);

    state.homework_service.delete_homework(&session, &homework_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
