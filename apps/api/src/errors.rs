use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::interview::error::InterviewError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Status codes tell the caller what to do next:
/// 404/410 → start a new session, 502 → retry the same call, 503 → the service is misconfigured.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Interview(#[from] InterviewError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Interview(err) => interview_error_parts(err),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

fn interview_error_parts(err: &InterviewError) -> (StatusCode, &'static str, String) {
    match err {
        InterviewError::SessionNotFound(_) => {
            (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND", err.to_string())
        }
        InterviewError::SessionExpired(_) => {
            (StatusCode::GONE, "SESSION_EXPIRED", err.to_string())
        }
        InterviewError::InvalidState(_) => (StatusCode::CONFLICT, "INVALID_STATE", err.to_string()),
        InterviewError::UnknownSection(_) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
        }
        InterviewError::CompletionFailed(e) => {
            tracing::error!("LLM error: {e}");
            (
                StatusCode::BAD_GATEWAY,
                "COMPLETION_FAILED",
                "The interviewer could not respond. Please retry.".to_string(),
            )
        }
        InterviewError::ConfigurationMissing(what) => {
            tracing::error!("Configuration missing: {what}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "CONFIGURATION_MISSING",
                "The interview service is not configured".to_string(),
            )
        }
        InterviewError::Prompt(e) => {
            tracing::error!("Prompt error: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal server error occurred".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use uuid::Uuid;

    fn status_of(err: impl Into<AppError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn test_lookup_failures_are_distinct() {
        let id = Uuid::new_v4();
        assert_eq!(
            status_of(InterviewError::SessionNotFound(id)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_of(InterviewError::SessionExpired(id)), StatusCode::GONE);
    }

    #[test]
    fn test_completion_failure_is_bad_gateway() {
        assert_eq!(
            status_of(InterviewError::CompletionFailed(LlmError::EmptyContent)),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_configuration_missing_is_unavailable() {
        assert_eq!(
            status_of(InterviewError::ConfigurationMissing(
                "ANTHROPIC_API_KEY".to_string()
            )),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_invalid_state_and_validation() {
        assert_eq!(
            status_of(InterviewError::InvalidState("x".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Validation("text cannot be empty".to_string())),
            StatusCode::BAD_REQUEST
        );
    }
}
