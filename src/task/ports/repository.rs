//! Repository port for task persistence, lookup, and paged listing.

use crate::task::domain::{Page, PageRequest, TaskId, TaskRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Implementations serialise writes to the same identifier; writes to
/// distinct identifiers are independent.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts a task, or replaces the stored task with the same identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] on infrastructure failure.
    async fn save(&self, task: &TaskRecord) -> TaskRepositoryResult<()>;

    /// Replaces an existing task whose stored revision directly precedes
    /// `task.revision()`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// and [`TaskRepositoryError::Conflict`] when the stored revision has
    /// moved on.
    async fn update(&self, task: &TaskRecord) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<TaskRecord>;

    /// Returns one ordered page of tasks together with the total task count.
    ///
    /// A page past the end is empty and still reports the total.
    async fn find_all(&self, request: PageRequest) -> TaskRepositoryResult<Page<TaskRecord>>;

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored revision does not match the expected predecessor.
    #[error("task {id} was modified concurrently (expected stored revision {expected})")]
    Conflict {
        /// Task identifier.
        id: TaskId,
        /// Revision the writer expected to replace.
        expected: u64,
    },

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted task data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps persisted-data decoding or validation failures.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
