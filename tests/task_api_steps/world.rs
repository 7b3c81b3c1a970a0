//! Shared world state for task HTTP behaviour scenarios.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use mockable::DefaultClock;
use rstest::fixture;
use serde_json::Value;
use taskhub::config::ListingLimits;
use taskhub::task::{
    adapters::{
        http::{AppState, router},
        memory::InMemoryTaskRepository,
    },
    services::TaskManager,
};
use tower::ServiceExt;

/// Scenario world for task HTTP behaviour tests.
pub struct TaskApiWorld {
    pub app: Router,
    pub task_id: Option<String>,
    pub last_status: Option<StatusCode>,
    pub last_body: Value,
}

impl TaskApiWorld {
    /// Creates a world over a fresh in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            app: fresh_router(),
            task_id: None,
            last_status: None,
            last_body: Value::Null,
        }
    }

    /// Discards every stored task and any recorded response.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns the id of the task created earlier in the scenario.
    pub fn task_id(&self) -> eyre::Result<&str> {
        self.task_id
            .as_deref()
            .ok_or_else(|| eyre::eyre!("no task has been created in this scenario"))
    }

    /// Sends a request and records its status and JSON body.
    pub fn send(&mut self, request: Request<Body>) -> eyre::Result<()> {
        let app = self.app.clone();
        let (status, body) = run_async(async move {
            let response = app.oneshot(request).await?;
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await?;
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes)?
            };
            Ok::<_, eyre::Report>((status, body))
        })?;
        self.last_status = Some(status);
        self.last_body = body;
        Ok(())
    }
}

impl Default for TaskApiWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskApiWorld {
    TaskApiWorld::default()
}

fn fresh_router() -> Router {
    let manager = TaskManager::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    );
    router(AppState::new(manager, ListingLimits::default()))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
