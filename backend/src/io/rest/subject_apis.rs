//! # REST API for Subjects
//!
//! School subjects of a child, used to label homework and exams.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{CreateSubjectRequest, UpdateSubjectRequest};
use tracing::info;

use super::error::ApiError;
use super::mappers::SubjectMapper;
use super::session::AuthenticatedSession;
use crate::AppState;

/// Subjects of a child ordered by name
pub async fn list_subjects(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(child_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/children/{}/subjects", child_id);

    let items = state.subject_service.list_subjects(&session, &child_id).await?;
    Ok(Json(SubjectMapper::to_list_dto(items)))
}

pub async fn create_subject(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(child_id): Path<String>,
    Json(request): Json<CreateSubjectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/children/{}/subjects - request: {:?}", child_id, request);

    let created = state
        .subject_service
        .create_subject(&session, SubjectMapper::to_create_command(child_id, request))
        .await?;
    let response = SubjectMapper::to_response_dto(created, "Subject created successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_subject(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(subject_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/subjects/{}", subject_id);

    let item = state.subject_service.get_subject(&session, &subject_id).await?;
    Ok(Json(SubjectMapper::to_dto(item)))
}

pub async fn update_subject(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(subject_id): Path<String>,
    Json(request): Json<UpdateSubjectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /api/subjects/{} - request: {:?}", subject_id, request);

    let updated = state
        .subject_service
        .update_subject(&session, &subject_id, SubjectMapper::to_update_command(request))
        .await?;
    Ok(Json(SubjectMapper::to_response_dto(updated, "Subject updated successfully")))
}

/// Delete a subject; homework and exams labelled with it lose the label
pub async fn delete_subject(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(subject_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /api/subjects/{}", subject_id);

    state.subject_service.delete_subject(&session, &subject_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
