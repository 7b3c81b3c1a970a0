//! Translation of service errors into HTTP responses.

use super::metrics::ErrorKind;
use crate::task::{
    domain::{PageRequestError, ParseTaskSortError, TaskValidationError},
    services::TaskManagerError,
};
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{error, warn};

/// Errors surfaced by the HTTP adapter.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input failed domain validation.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),

    /// The request could not be decoded into the expected shape.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// The addressed task does not exist.
    #[error("task not found")]
    NotFound,

    /// The addressed task changed while the request was in flight.
    #[error("task was modified concurrently")]
    Conflict,

    /// Any other failure. The detail is logged, never returned.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl ApiError {
    /// Returns the status code this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the `api.errors.total` category for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::MalformedRequest(_) => ErrorKind::Validation,
            Self::NotFound => ErrorKind::NotFound,
            Self::Conflict => ErrorKind::Conflict,
            Self::Unexpected(_) => ErrorKind::ServerError,
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    fields: BTreeMap<&'static str, &'static str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();
        let body = match &self {
            Self::Validation(err) => {
                warn!(error = %err, "validation failed");
                ErrorBody {
                    error: "validation failed",
                    detail: None,
                    fields: err
                        .violations()
                        .iter()
                        .map(|violation| (violation.field(), violation.public_message()))
                        .collect(),
                }
            }
            Self::MalformedRequest(reason) => {
                warn!(reason = %reason, "malformed request");
                ErrorBody {
                    error: "malformed request",
                    detail: Some(reason.as_str()),
                    fields: BTreeMap::new(),
                }
            }
            Self::NotFound => {
                warn!("task not found");
                ErrorBody {
                    error: "task not found",
                    detail: None,
                    fields: BTreeMap::new(),
                }
            }
            Self::Conflict => {
                warn!("conflicting task write");
                ErrorBody {
                    error: "task was modified concurrently",
                    detail: None,
                    fields: BTreeMap::new(),
                }
            }
            Self::Unexpected(detail) => {
                error!(error = %detail, "unexpected error while handling request");
                ErrorBody {
                    error: "an unexpected error occurred",
                    detail: None,
                    fields: BTreeMap::new(),
                }
            }
        };
        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(kind);
        response
    }
}

impl From<TaskManagerError> for ApiError {
    fn from(err: TaskManagerError) -> Self {
        match err {
            TaskManagerError::Validation(validation) => Self::Validation(validation),
            TaskManagerError::NotFound(_) => Self::NotFound,
            TaskManagerError::Conflict(_) => Self::Conflict,
            TaskManagerError::Repository(repository) => Self::Unexpected(repository.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::MalformedRequest(rejection.body_text())
    }
}

impl From<ParseTaskSortError> for ApiError {
    fn from(err: ParseTaskSortError) -> Self {
        Self::MalformedRequest(err.to_string())
    }
}

impl From<PageRequestError> for ApiError {
    fn from(err: PageRequestError) -> Self {
        Self::MalformedRequest(err.to_string())
    }
}
