//! HTTP adapter for the task service.
//!
//! Decodes requests into [`TaskManager`](crate::task::services::TaskManager)
//! calls and performs the single translation from service errors to status
//! codes. Malformed bodies and query strings are rejected here, before any
//! service call. Error counts and per-route latency go to a
//! [`RequestMetrics`] sink.

mod dto;
mod error;
mod handlers;
mod metrics;
mod router;

pub use dto::{ListParams, PageResponse, TaskPayload};
pub use error::ApiError;
pub use handlers::HealthResponse;
pub use metrics::{ERRORS_TOTAL, ErrorKind, RequestMetrics, TracingMetrics, operation_name};
pub use router::{AppState, router};
