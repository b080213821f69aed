use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::repo::ContentError;
use crate::report::SessionError;
use crate::suggestions::approve::ApprovalError;
use crate::suggestions::FieldError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    /// The Template Store changed between fetch and write. Callers re-run the
    /// whole batch from a fresh fetch.
    #[error("Stale template version: {0}")]
    StaleVersion(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Provider errors are upstream failures. A provider-side conflict is not a
/// stale Template Store: that signal only comes from `ApprovalError::Stale`.
impl From<ContentError> for AppError {
    fn from(e: ContentError) -> Self {
        AppError::Upstream(e.to_string())
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::InvalidId(id) => AppError::Validation(format!("invalid session id '{id}'")),
            SessionError::NotFound(id) => AppError::NotFound(format!("Session {id} not found")),
            other => AppError::Internal(other.into()),
        }
    }
}

impl From<FieldError> for AppError {
    fn from(e: FieldError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<ApprovalError> for AppError {
    fn from(e: ApprovalError) -> Self {
        match e {
            ApprovalError::Rejected(msg) => AppError::Validation(msg),
            ApprovalError::Stale { path } => AppError::StaleVersion(path),
            ApprovalError::Content(inner) => inner.into(),
            cleanup @ ApprovalError::Cleanup { .. } => AppError::Upstream(cleanup.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "unauthorized".to_string(),
            ),
            AppError::StaleVersion(path) => {
                tracing::warn!("Stale template version on {path}");
                (
                    StatusCode::CONFLICT,
                    "STALE_TEMPLATE_VERSION",
                    "The template store changed concurrently; retry the batch".to_string(),
                )
            }
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM_ERROR",
                    "A repository error occurred".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "POLISH_FAILED",
                    "polish_failed".to_string(),
                )
            }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_conflict_is_not_stale_version() {
        let err: AppError = ContentError::Conflict {
            path: "suggestions/pending/a.json".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Upstream(_)));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_other_content_errors_are_upstream_500() {
        let err: AppError = ContentError::Api {
            status: 502,
            message: "bad gateway".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Upstream(_)));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_stale_approval_is_409() {
        let err: AppError = ApprovalError::Stale {
            path: "src/data/templates.json".to_string(),
        }
        .into();
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_failed_cleanup_is_not_stale() {
        let err: AppError = ApprovalError::Cleanup {
            path: "suggestions/pending/a.json".to_string(),
            source: ContentError::Conflict {
                path: "suggestions/pending/a.json".to_string(),
            },
        }
        .into();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[test]
    fn test_validation_is_400() {
        let response = AppError::Validation("tag is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
