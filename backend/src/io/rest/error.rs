use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shared::ErrorResponse;
use tracing::error;

use crate::domain::{ActiveChildError, ChildError, LinkError, RecordError};

const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Error returned by every handler: a status, a stable code and a
/// user-displayable message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    pub fn forbidden(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, code, message)
    }

    fn store_failure(err: &dyn std::fmt::Display) -> Self {
        error!(error = %err, "store failure");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "STORE_FAILURE", GENERIC_FAILURE)
    }
}

impl From<LinkError> for ApiError {
    fn from(err: LinkError) -> Self {
        let message = err.to_string();
        match err {
            LinkError::InvalidCodeFormat(_) => {
                Self::new(StatusCode::BAD_REQUEST, "INVALID_CODE_FORMAT", message)
            }
            LinkError::CodeNotFound => Self::new(StatusCode::NOT_FOUND, "CODE_NOT_FOUND", message),
            LinkError::ChildAlreadyLinked => {
                Self::new(StatusCode::CONFLICT, "CHILD_ALREADY_LINKED", message)
            }
            LinkError::AccountAlreadyLinked => {
                Self::new(StatusCode::CONFLICT, "ACCOUNT_ALREADY_LINKED", message)
            }
            LinkError::ChildNotOwned => Self::forbidden("CHILD_NOT_OWNED", message),
            LinkError::LinkNotFound => Self::new(StatusCode::NOT_FOUND, "LINK_NOT_FOUND", message),
            LinkError::UnencodableIdentifier => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, "UNENCODABLE_IDENTIFIER", message)
            }
            LinkError::Store(e) => Self::store_failure(&e),
        }
    }
}

impl From<ChildError> for ApiError {
    fn from(err: ChildError) -> Self {
        let message = err.to_string();
        match err {
            ChildError::Validation(_) => Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message),
            ChildError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "CHILD_NOT_FOUND", message),
            ChildError::NotOwned => Self::forbidden("CHILD_NOT_OWNED", message),
            ChildError::NotAParent => Self::forbidden("PARENT_ONLY", message),
            ChildError::Store(e) => Self::store_failure(&e),
        }
    }
}

impl From<ActiveChildError> for ApiError {
    fn from(err: ActiveChildError) -> Self {
        let message = err.to_string();
        match err {
            ActiveChildError::NotAParent => Self::forbidden("PARENT_ONLY", message),
            ActiveChildError::NotOwned => Self::forbidden("CHILD_NOT_OWNED", message),
            ActiveChildError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "CHILD_NOT_FOUND", message),
            ActiveChildError::Store(e) => Self::store_failure(&e),
        }
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        let message = err.to_string();
        match err {
            RecordError::Validation(_) => Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message),
            RecordError::NotFound(..) => Self::new(StatusCode::NOT_FOUND, "RECORD_NOT_FOUND", message),
            RecordError::ChildNotVisible => Self::forbidden("CHILD_NOT_OWNED", message),
            RecordError::ParentOnly => Self::forbidden("PARENT_ONLY", message),
            RecordError::Store(e) => Self::store_failure(&e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.code, self.message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::invite_code::ParseError;
    use crate::storage::StoreError;

    #[test]
    fn test_link_errors_have_distinct_codes() {
        let cases = [
            (LinkError::InvalidCodeFormat(ParseError::MalformedCode), StatusCode::BAD_REQUEST, "INVALID_CODE_FORMAT"),
            (LinkError::CodeNotFound, StatusCode::NOT_FOUND, "CODE_NOT_FOUND"),
            (LinkError::ChildAlreadyLinked, StatusCode::CONFLICT, "CHILD_ALREADY_LINKED"),
            (LinkError::AccountAlreadyLinked, StatusCode::CONFLICT, "ACCOUNT_ALREADY_LINKED"),
        ];

        for (err, status, code) in cases {
            let api_error = ApiError::from(err);
            assert_eq!(api_error.status, status);
            assert_eq!(api_error.code, code);
        }
    }

    #[test]
    fn test_store_failure_hides_details() {
        let err = LinkError::Store(StoreError::Backend(anyhow::anyhow!("disk I/O error")));
        let api_error = ApiError::from(err);
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.code, "STORE_FAILURE");
        assert!(!api_error.message.contains("disk"));
    }

    #[test]
    fn test_record_errors() {
        let not_found = ApiError::from(RecordError::NotFound("Homework", "hw-1".to_string()));
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        assert_eq!(not_found.message, "Homework not found: hw-1");

        assert_eq!(ApiError::from(RecordError::ParentOnly).code, "PARENT_ONLY");
        assert_eq!(ApiError::from(RecordError::ChildNotVisible).status, StatusCode::FORBIDDEN);
    }
}
