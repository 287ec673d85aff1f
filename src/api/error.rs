//! API error response
//!
//! Every failure leaves the server as `{message, code}` with a 4xx/5xx
//! status. Scoring errors, rejected bodies and rejected queries all funnel
//! through `ApiError`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::error::ScoreError;

#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub message: String,
    pub code: &'static str,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            code: "NOT_FOUND",
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            code: "BAD_REQUEST",
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
            code: "NOTHING_TO_UNDO",
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            code: "INTERNAL_ERROR",
        }
    }
}

impl From<ScoreError> for ApiError {
    fn from(e: ScoreError) -> Self {
        let message = e.to_string();
        match e {
            ScoreError::InvalidGame(_) => Self::not_found(message),
            ScoreError::InvalidPlayer(_) => Self {
                code: "INVALID_PLAYER",
                ..Self::bad_request(message)
            },
            ScoreError::InvalidType(_) => Self {
                code: "INVALID_TYPE",
                ..Self::bad_request(message)
            },
            ScoreError::EmptyLog(_) => Self::conflict(message),
            ScoreError::Consistency(_) => {
                error!(error = %message, "consistency failure surfaced to client");
                Self {
                    code: "CONSISTENCY_ERROR",
                    ..Self::internal(message)
                }
            }
            ScoreError::Journal(_) => {
                error!(error = %message, "journal failure surfaced to client");
                Self {
                    code: "JOURNAL_ERROR",
                    ..Self::internal(message)
                }
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
