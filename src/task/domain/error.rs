//! Error types for task domain validation and parsing.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// A single rule violation raised while building or changing a task.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is empty after trimming.
    #[error("title must not be blank")]
    EmptyTitle,

    /// The due date is not strictly after the current time.
    #[error("due date {due_date} must be in the future (now: {now})")]
    DueDateNotInFuture {
        /// Rejected due date.
        due_date: DateTime<Utc>,
        /// Clock reading used for the comparison.
        now: DateTime<Utc>,
    },
}

impl TaskDomainError {
    /// Returns the external field name the violation belongs to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::DueDateNotInFuture { .. } => "dueDate",
        }
    }

    /// Returns a caller-facing message without internal detail.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "Title cannot be empty",
            Self::DueDateNotInFuture { .. } => "Due date must be in the future",
        }
    }
}

/// All violations found while validating task input.
///
/// Never empty: constructors only build it from at least one violation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("task validation failed: {}", summary(.violations))]
pub struct TaskValidationError {
    violations: Vec<TaskDomainError>,
}

impl TaskValidationError {
    /// Collects violations, returning `None` when there are none.
    #[must_use]
    pub fn from_violations(violations: Vec<TaskDomainError>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    /// Returns the individual violations in field order.
    #[must_use]
    pub fn violations(&self) -> &[TaskDomainError] {
        &self.violations
    }

    /// Returns `true` when a violation concerns the given external field.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field() == field)
    }
}

impl From<TaskDomainError> for TaskValidationError {
    fn from(violation: TaskDomainError) -> Self {
        Self {
            violations: vec![violation],
        }
    }
}

fn summary(violations: &[TaskDomainError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error returned while parsing task statuses from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing a listing sort expression.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseTaskSortError {
    /// The property name is not sortable.
    #[error("unknown sort key '{0}', expected one of dueDate, title, status, createdAt")]
    UnknownKey(String),

    /// The direction is neither `asc` nor `desc`.
    #[error("unknown sort direction '{0}', expected asc or desc")]
    UnknownDirection(String),
}

/// Error returned for paging parameters that cannot describe a page.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PageRequestError {
    /// Page size must be at least one.
    #[error("page size must be at least 1")]
    ZeroPageSize,
}
