//! Session extraction from request headers.
//!
//! Authentication happens upstream; by the time a request reaches us the
//! account id and role are trusted headers. Account ids are UUIDs, as issued
//! by the auth provider.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use super::error::ApiError;
use crate::domain::models::{SessionContext, UserRole};

pub const ACCOUNT_ID_HEADER: &str = "x-account-id";
pub const ACCOUNT_ROLE_HEADER: &str = "x-account-role";

fn header_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Session of the calling account
#[derive(Debug, Clone)]
pub struct AuthenticatedSession(pub SessionContext);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let account_id = header_value(parts, ACCOUNT_ID_HEADER)
            .ok_or_else(|| ApiError::unauthorized("Missing X-Account-Id header"))?;
        let account_id = Uuid::parse_str(account_id)
            .map_err(|_| ApiError::unauthorized("X-Account-Id must be a UUID"))?;
        let role = header_value(parts, ACCOUNT_ROLE_HEADER)
            .ok_or_else(|| ApiError::unauthorized("Missing X-Account-Role header"))?;
        let role = shared::UserRole::parse(role).map_err(|e| ApiError::unauthorized(e.to_string()))?;

        let role = match role {
            shared::UserRole::Parent => UserRole::Parent,
            shared::UserRole::Child => UserRole::Child,
        };

        Ok(AuthenticatedSession(SessionContext {
            account_id: account_id.hyphenated().to_string(),
            role,
            selected_child_id: None,
        }))
    }
}
