//! # REST API for the Agenda
//!
//! Dashboard buckets of one child for a day (UTC today by default).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::info;

use super::error::ApiError;
use super::mappers::AgendaMapper;
use super::session::AuthenticatedSession;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AgendaQuery {
    /// `YYYY-MM-DD`
    pub date: Option<String>,
}

pub async fn get_agenda(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(child_id): Path<String>,
    Query(query): Query<AgendaQuery>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/children/{}/agenda - query: {:?}", child_id, query);

    let today = match query.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            ApiError::new(
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("date must be in YYYY-MM-DD format, got {}", raw),
            )
        })?,
        None => Utc::now().date_naive(),
    };

    let agenda = state.agenda_service.agenda(&session, &child_id, today).await?;
    Ok(Json(AgendaMapper::to_dto(child_id, agenda)))
}
