//! # REST API Interface Layer
//!
//! HTTP endpoints of the school tracker. Every handler:
//! - extracts the calling session from the `X-Account-Id` / `X-Account-Role` headers
//! - logs the request
//! - delegates to a domain service
//! - maps the result to a `shared` DTO or an [`ApiError`]

pub mod active_child_apis;
pub mod agenda_apis;
pub mod announcement_apis;
pub mod child_apis;
pub mod error;
pub mod exam_apis;
pub mod homework_apis;
pub mod link_apis;
pub mod mappers;
pub mod schedule_apis;
pub mod session;
pub mod subject_apis;

pub use active_child_apis::*;
pub use agenda_apis::*;
pub use announcement_apis::*;
pub use child_apis::*;
pub use error::ApiError;
pub use exam_apis::*;
pub use homework_apis::*;
pub use link_apis::*;
pub use schedule_apis::*;
pub use session::AuthenticatedSession;
pub use subject_apis::*;

use axum::{http::StatusCode, response::IntoResponse};

/// Liveness check
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
