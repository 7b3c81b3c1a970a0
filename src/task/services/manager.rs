//! Service layer enforcing task business rules above raw storage.

use crate::task::{
    domain::{Page, PageRequest, TaskId, TaskRecord, TaskStatus, TaskValidationError},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Title and due date supplied by a caller for creation or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInput {
    title: String,
    due_date: Option<DateTime<Utc>>,
}

impl TaskInput {
    /// Creates input with a title and no due date.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            due_date: None,
        }
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn with_optional_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = due_date;
        self
    }
}

/// Public projection of a task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Task identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Lifecycle status.
    pub status: TaskStatus,
}

impl From<&TaskRecord> for TaskResponse {
    fn from(task: &TaskRecord) -> Self {
        Self {
            id: task.id(),
            title: task.title().as_str().to_owned(),
            due_date: task.due_date(),
            status: task.status(),
        }
    }
}

impl From<TaskRecord> for TaskResponse {
    fn from(task: TaskRecord) -> Self {
        Self::from(&task)
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskManagerError {
    /// Input failed domain validation.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),
    /// The task changed between load and write.
    #[error("task {0} was modified concurrently")]
    Conflict(TaskId),
    /// Any other repository failure.
    #[error(transparent)]
    Repository(TaskRepositoryError),
}

impl From<TaskRepositoryError> for TaskManagerError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            TaskRepositoryError::Conflict { id, .. } => Self::Conflict(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for task manager operations.
pub type TaskManagerResult<T> = Result<T, TaskManagerError>;

/// Single entry point for task operations.
///
/// Holds no mutable state of its own; all shared state lives in the
/// repository.
#[derive(Debug)]
pub struct TaskManager<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskManager<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskManager<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task manager.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates and persists a new open task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskManagerError::Validation`] when the input is invalid, in
    /// which case nothing is persisted, or [`TaskManagerError::Repository`]
    /// when persistence fails.
    pub async fn create_task(&self, input: TaskInput) -> TaskManagerResult<TaskResponse> {
        let task = TaskRecord::new(input.title, input.due_date, &*self.clock)?;
        self.repository.save(&task).await?;
        info!(task_id = %task.id(), "task created");
        Ok(TaskResponse::from(task))
    }

    /// Retrieves a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskManagerError::NotFound`] when the task does not exist.
    pub async fn get_task(&self, id: TaskId) -> TaskManagerResult<TaskResponse> {
        let task = self.repository.find_by_id(id).await?;
        Ok(TaskResponse::from(task))
    }

    /// Lists one page of tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskManagerError::Repository`] when the listing fails.
    pub async fn get_tasks(&self, request: PageRequest) -> TaskManagerResult<Page<TaskResponse>> {
        let page = self.repository.find_all(request).await?;
        debug!(
            page = page.page(),
            size = page.size(),
            total = page.total(),
            sort = %request.sort(),
            "tasks listed"
        );
        Ok(page.map(TaskResponse::from))
    }

    /// Replaces a task's title and due date, leaving id and status intact.
    ///
    /// # Errors
    ///
    /// Returns [`TaskManagerError::NotFound`] when the task does not exist
    /// (including when it is deleted concurrently),
    /// [`TaskManagerError::Validation`] for invalid input, and
    /// [`TaskManagerError::Conflict`] when another write landed first.
    pub async fn update_task(
        &self,
        id: TaskId,
        input: TaskInput,
    ) -> TaskManagerResult<TaskResponse> {
        let mut task = self.repository.find_by_id(id).await?;
        task.update(input.title, input.due_date, &*self.clock)?;
        self.repository.update(&task).await?;
        info!(task_id = %id, revision = task.revision(), "task updated");
        Ok(TaskResponse::from(task))
    }

    /// Marks a task as done. Completing a done task is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TaskManagerError::NotFound`] when the task does not exist and
    /// [`TaskManagerError::Conflict`] when another write landed first.
    pub async fn complete_task(&self, id: TaskId) -> TaskManagerResult<TaskResponse> {
        let mut task = self.repository.find_by_id(id).await?;
        if task.mark_done(&*self.clock) {
            self.repository.update(&task).await?;
            info!(task_id = %id, "task completed");
        } else {
            debug!(task_id = %id, "task already done");
        }
        Ok(TaskResponse::from(task))
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskManagerError::NotFound`] when the task does not exist.
    pub async fn delete_task(&self, id: TaskId) -> TaskManagerResult<()> {
        self.repository.delete(id).await?;
        info!(task_id = %id, "task deleted");
        Ok(())
    }
}
