//! Request-level error mapping.
//!
//! Every failure surfaces to the caller as structured JSON with a
//! `success:false` flag and a message; none are silently swallowed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required request field is absent or blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The target host does not match any allowed suffix.
    #[error("database host is not on the allowlist")]
    HostNotAllowed,

    /// The client exceeded the fixed-window request limit.
    #[error("too many requests, please try again later")]
    RateLimited,

    /// No recognized feature module was selected.
    #[error("no recognized features selected")]
    EmptyFeatureSelection,

    /// Executing the generated SQL failed; driver message passed through.
    #[error("{0}")]
    Execution(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_) => StatusCode::BAD_REQUEST,
            ApiError::HostNotAllowed => StatusCode::FORBIDDEN,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::EmptyFeatureSelection => StatusCode::BAD_REQUEST,
            ApiError::Execution(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body for failed requests.
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody {
            success: false,
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::MissingField("connectionString").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::HostNotAllowed.status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::RateLimited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            ApiError::EmptyFeatureSelection.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Execution("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_execution_message_passthrough() {
        let err = ApiError::Execution("relation \"users\" does not exist".into());
        assert_eq!(err.to_string(), "relation \"users\" does not exist");
    }
}
