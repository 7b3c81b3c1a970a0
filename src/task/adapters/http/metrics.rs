//! Request metrics emitted at the HTTP boundary.
//!
//! Two series are recorded: `api.errors.total`, counted once per error
//! response and tagged with an [`ErrorKind`], and per-operation request
//! latency (`api.tasks.create`, `api.tasks.list`, and so on). The sink is the
//! [`RequestMetrics`] trait; [`TracingMetrics`] writes both series as
//! structured events under the `taskhub::metrics` target.

use axum::{
    extract::{MatchedPath, Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Name of the error counter.
pub const ERRORS_TOTAL: &str = "api.errors.total";

/// Category tag attached to `api.errors.total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Request body, query, or field validation failed.
    Validation,
    /// The addressed task does not exist.
    NotFound,
    /// A concurrent write won.
    Conflict,
    /// Anything else.
    ServerError,
}

impl ErrorKind {
    /// Returns the tag value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::ServerError => "server_error",
        }
    }
}

/// Sink for request metrics.
pub trait RequestMetrics: Send + Sync {
    /// Counts one error response of the given kind.
    fn record_error(&self, kind: ErrorKind);

    /// Records how long one request to `operation` took.
    fn record_latency(&self, operation: &'static str, status: StatusCode, elapsed: Duration);
}

/// Emits metrics as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMetrics;

impl RequestMetrics for TracingMetrics {
    fn record_error(&self, kind: ErrorKind) {
        info!(
            target: "taskhub::metrics",
            metric = ERRORS_TOTAL,
            error_type = kind.as_str(),
            increment = 1_u64,
        );
    }

    fn record_latency(&self, operation: &'static str, status: StatusCode, elapsed: Duration) {
        info!(
            target: "taskhub::metrics",
            metric = operation,
            status = status.as_u16(),
            elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
        );
    }
}

/// Maps a method and matched route to its timer name.
#[must_use]
pub fn operation_name(method: &Method, route: &str) -> &'static str {
    match (method.as_str(), route) {
        ("POST", "/tasks") => "api.tasks.create",
        ("GET", "/tasks") => "api.tasks.list",
        ("GET", "/tasks/{id}") => "api.tasks.get",
        ("PUT", "/tasks/{id}") => "api.tasks.update",
        ("DELETE", "/tasks/{id}") => "api.tasks.delete",
        ("POST", "/tasks/{id}/done") => "api.tasks.complete",
        ("GET", "/health") => "api.health",
        _ => "api.other",
    }
}

/// Middleware timing each routed request and counting error responses.
///
/// Error responses carry their [`ErrorKind`] as a response extension, set by
/// [`ApiError`](super::ApiError).
pub async fn track_request(
    State(metrics): State<Arc<dyn RequestMetrics>>,
    request: Request,
    next: Next,
) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(String::new, |matched| matched.as_str().to_owned());
    let operation = operation_name(request.method(), &route);
    let started = Instant::now();

    let response = next.run(request).await;

    if let Some(kind) = response.extensions().get::<ErrorKind>() {
        metrics.record_error(*kind);
    }
    metrics.record_latency(operation, response.status(), started.elapsed());
    response
}
