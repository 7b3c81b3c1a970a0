//! Router assembly and shared handler state.

use super::handlers::{
    complete_task, create_task, delete_task, get_task, health, list_tasks, update_task,
};
use super::metrics::{RequestMetrics, TracingMetrics, track_request};
use crate::{
    config::ListingLimits,
    task::{ports::TaskRepository, services::TaskManager},
};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use mockable::Clock;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// State shared by every handler.
pub struct AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    manager: TaskManager<R, C>,
    limits: ListingLimits,
    metrics: Arc<dyn RequestMetrics>,
}

impl<R, C> AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Bundles the task manager with listing limits. Metrics go to
    /// [`TracingMetrics`] until replaced with [`AppState::with_metrics`].
    #[must_use]
    pub fn new(manager: TaskManager<R, C>, limits: ListingLimits) -> Self {
        Self {
            manager,
            limits,
            metrics: Arc::new(TracingMetrics),
        }
    }

    /// Replaces the metrics sink.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn RequestMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Returns the task manager.
    #[must_use]
    pub const fn manager(&self) -> &TaskManager<R, C> {
        &self.manager
    }

    /// Returns the listing limits.
    #[must_use]
    pub const fn limits(&self) -> ListingLimits {
        self.limits
    }

    /// Returns the metrics sink.
    #[must_use]
    pub fn metrics(&self) -> Arc<dyn RequestMetrics> {
        Arc::clone(&self.metrics)
    }
}

impl<R, C> Clone for AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            manager: self.manager.clone(),
            limits: self.limits,
            metrics: Arc::clone(&self.metrics),
        }
    }
}

/// Builds the task service router.
///
/// | Method | Path | Success |
/// |---|---|---|
/// | `POST` | `/tasks` | 201 |
/// | `GET` | `/tasks` | 200 |
/// | `GET` | `/tasks/{id}` | 200 |
/// | `PUT` | `/tasks/{id}` | 200 |
/// | `POST` | `/tasks/{id}/done` | 200 |
/// | `DELETE` | `/tasks/{id}` | 204 |
/// | `GET` | `/health` | 200 |
///
/// Every routed request is timed and error responses are counted through
/// the state's [`RequestMetrics`] sink.
pub fn router<R, C>(state: AppState<R, C>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/tasks", get(list_tasks::<R, C>).post(create_task::<R, C>))
        .route(
            "/tasks/{id}",
            get(get_task::<R, C>)
                .put(update_task::<R, C>)
                .delete(delete_task::<R, C>),
        )
        .route("/tasks/{id}/done", post(complete_task::<R, C>))
        .route("/health", get(health))
        .route_layer(middleware::from_fn_with_state(
            state.metrics(),
            track_request,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
