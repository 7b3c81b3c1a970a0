//! Shared test helpers for in-memory integration tests.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use taskhub::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{PageRequest, TaskSort},
    services::{TaskInput, TaskManager, TaskResponse},
};

/// Task manager over an in-memory store.
pub type TestManager = TaskManager<InMemoryTaskRepository, DefaultClock>;

/// Provides a manager backed by a fresh in-memory repository.
#[fixture]
pub fn manager() -> TestManager {
    TaskManager::new(Arc::new(InMemoryTaskRepository::new()), Arc::new(DefaultClock))
}

/// Returns an instant the given number of days from now, at the
/// microsecond precision tasks are stored with.
#[must_use]
pub fn days_from_now(days: i64) -> DateTime<Utc> {
    (Utc::now() + Duration::days(days)).trunc_subsecs(6)
}

/// Builds a page request.
///
/// # Errors
///
/// Returns an error if the size is zero.
pub fn page_request(page: u32, size: u32, sort: &str) -> eyre::Result<PageRequest> {
    let parsed: TaskSort = sort.parse()?;
    Ok(PageRequest::new(page, size, parsed)?)
}

/// Creates one task per title, in order.
///
/// # Errors
///
/// Returns an error if any creation fails.
pub async fn create_titled(
    manager: &TestManager,
    titles: &[&str],
) -> eyre::Result<Vec<TaskResponse>> {
    let mut created = Vec::with_capacity(titles.len());
    for title in titles {
        created.push(manager.create_task(TaskInput::new(*title)).await?);
    }
    Ok(created)
}
