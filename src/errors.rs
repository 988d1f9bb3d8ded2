use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Map from wire field name ("diagnosis", "nextSteps") to its error messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{message}")]
    Validation {
        message: String,
        field_errors: FieldErrors,
    },
    #[error("{0}")]
    NotFound(String),
    /// Scoring oracle failed (transport, parse, or schema). The detail is for
    /// logs only; clients get a single generic message.
    #[error("oracle failure: {0}")]
    Oracle(String),
    #[error("store failure: {0}")]
    Store(String),
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn validation(message: impl Into<String>, field_errors: FieldErrors) -> Self {
        Self::Validation {
            message: message.into(),
            field_errors,
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn oracle(msg: impl Into<String>) -> Self {
        Self::Oracle(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field_errors: Option<FieldErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, body) = match self {
            AppError::BadRequest(s) => (
                StatusCode::BAD_REQUEST,
                ErrBody {
                    error: s,
                    field_errors: None,
                },
            ),
            AppError::Validation {
                message,
                field_errors,
            } => (
                StatusCode::BAD_REQUEST,
                ErrBody {
                    error: message,
                    field_errors: Some(field_errors),
                },
            ),
            AppError::NotFound(s) => (
                StatusCode::NOT_FOUND,
                ErrBody {
                    error: s,
                    field_errors: None,
                },
            ),
            AppError::Oracle(detail) => {
                tracing::error!("scoring oracle failure: {detail}");
                (
                    StatusCode::BAD_GATEWAY,
                    ErrBody {
                        error: "Failed to get feedback from AI. Please try again.".to_string(),
                        field_errors: None,
                    },
                )
            }
            AppError::Store(s) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrBody {
                    error: s,
                    field_errors: None,
                },
            ),
            AppError::Internal(s) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrBody {
                    error: s,
                    field_errors: None,
                },
            ),
        };
        (code, Json(body)).into_response()
    }
}

impl From<sled::Error> for AppError {
    fn from(err: sled::Error) -> Self {
        AppError::Store(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("serialization failed: {err}"))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Oracle(err.to_string())
    }
}
