//! # REST API for Child Account Links
//!
//! Redeeming invite codes, listing links for a parent's children and
//! unlinking a child account.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use shared::{ChildLinkListResponse, RedeemInviteCodeRequest, RedeemInviteCodeResponse};
use tracing::{info, warn};

use super::error::ApiError;
use super::mappers::LinkMapper;
use super::session::AuthenticatedSession;
use crate::domain::invite_code::MAX_CODE_LENGTH;
use crate::domain::models::UserRole;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LinkListQuery {
    /// Comma-separated child ids
    pub child_ids: Option<String>,
}

/// Redeem an invite code for the calling child account
pub async fn redeem_invite_code(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Json(request): Json<RedeemInviteCodeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/links/redeem - account: {}", session.account_id);

    if session.role != UserRole::Child {
        return Err(ApiError::forbidden(
            "CHILD_ONLY",
            "Invite codes can only be redeemed by a child account",
        ));
    }

    let code = request.code.trim();
    if code.chars().count() > MAX_CODE_LENGTH {
        warn!("Rejecting oversized invite code from {}", session.account_id);
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "INVALID_CODE_FORMAT",
            "Invalid code format",
        ));
    }

    let link = state.link_service.redeem(code, &session.account_id).await?;
    let response = RedeemInviteCodeResponse {
        link: LinkMapper::to_dto(link),
        success_message: "Your account is now linked.".to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Links of the requested children, restricted to children the session can see
pub async fn list_links(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Query(query): Query<LinkListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/links - child_ids: {:?}", query.child_ids);

    let visible = state.child_service.list_children(&session).await?;
    let requested: Vec<&str> = query
        .child_ids
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect();

    let child_ids: Vec<String> = visible
        .into_iter()
        .map(|child| child.id)
        .filter(|id| requested.is_empty() || requested.contains(&id.as_str()))
        .collect();

    let links = state.link_service.links_for_children(&child_ids).await?;
    Ok(Json(ChildLinkListResponse {
        links: links.into_iter().map(LinkMapper::to_dto).collect(),
    }))
}

/// Unlink a child account from one of the parent's children
pub async fn unlink_child_account(
    State(state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(link_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /api/links/{}", link_id);

    if !session.is_parent() {
        return Err(ApiError::forbidden("PARENT_ONLY", "Only parents can unlink accounts"));
    }

    state.link_service.unlink(&session.account_id, &link_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
