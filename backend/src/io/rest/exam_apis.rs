//! # REST API for Exams
//!
//! Tests (`prova`) and graded assignments (`trabalho`) of a child.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{CreateExamRequest, UpdateExamRequest};
use tracing::info;

use super::error::ApiError;
use super::mappers::ExamMapper;
use super::session::AuthenticatedSession;
use crate::AppState;

pub async fn list_exams(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(child_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/children/{}/exams", child_id);

    let items = state.exam_service.list_exams(&session, &child_id).await?;
    Ok(Json(ExamMapper::to_list_dto(items)))
}

pub async fn create_exam(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(child_id): Path<String>,
    Json(request): Json<CreateExamRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/children/{}/exams - request: {:?}", child_id, request);

    let created = state
        .exam_service
        .create_exam(&session, ExamMapper::to_create_command(child_id, request))
        .await?;
    let response = ExamMapper::to_response_dto(created, "Exam created successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_exam(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(exam_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/exams/{}", exam_id);

    let item = state.exam_service.get_exam(&session, &exam_id).await?;
    Ok(Json(ExamMapper::to_dto(item)))
}

/// Update an exam. `"grade": null` clears a recorded grade.
pub async fn update_exam(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(exam_id): Path<String>,
    Json(request): Json<UpdateExamRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /api/exams/{} - request: {:?}", exam_id, request);

    let updated = state
        .exam_service
        .update_exam(&session, &exam_id, ExamMapper::to_update_command(request))
        .await?;
    Ok(Json(ExamMapper::to_response_dto(updated, "Exam updated successfully")))
}

pub async fn delete_exam(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(exam_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /api/exams/{}", exam_id);

    state.exam_service.delete_exam(&session, &exam_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
