//! Task record aggregate and its guarded mutation entry points.

use super::{TaskDomainError, TaskId, TaskStatus, TaskTitle, TaskValidationError};
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;

/// Revision assigned to a freshly constructed record.
pub const INITIAL_REVISION: u64 = 1;

/// Fractional-second digits kept on every timestamp; `TIMESTAMPTZ` stores
/// microseconds.
const STORED_SUBSEC_DIGITS: u16 = 6;

/// Task record aggregate root.
///
/// Fields are private; the only mutations are [`TaskRecord::update`] and
/// [`TaskRecord::mark_done`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    id: TaskId,
    title: TaskTitle,
    due_date: Option<DateTime<Utc>>,
    status: TaskStatus,
    revision: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted write revision.
    pub revision: u64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskRecord {
    /// Creates a new open task.
    ///
    /// The due date and timestamps are truncated to microseconds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError`] listing every failing field when the
    /// title is blank or the due date is not strictly in the future.
    pub fn new(
        title: impl Into<String>,
        due_date: Option<DateTime<Utc>>,
        clock: &impl Clock,
    ) -> Result<Self, TaskValidationError> {
        let now = storage_instant(clock.utc());
        let due = due_date.map(storage_instant);
        let title = validate(title.into(), due, now)?;

        Ok(Self {
            id: TaskId::new(),
            title,
            due_date: due,
            status: TaskStatus::Open,
            revision: INITIAL_REVISION,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstructs a record from persisted storage.
    ///
    /// The due date is not re-validated against the current time.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            due_date: data.due_date,
            status: data.status,
            revision: data.revision,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the write revision.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces title and due date. Status is left untouched.
    ///
    /// Both fields are validated before anything changes, so a failed update
    /// leaves the record as it was.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError`] under the same rules as
    /// [`TaskRecord::new`].
    pub fn update(
        &mut self,
        title: impl Into<String>,
        due_date: Option<DateTime<Utc>>,
        clock: &impl Clock,
    ) -> Result<(), TaskValidationError> {
        let now = storage_instant(clock.utc());
        let due = due_date.map(storage_instant);
        self.title = validate(title.into(), due, now)?;
        self.due_date = due;
        self.touch(now);
        Ok(())
    }

    /// Marks the task as done.
    ///
    /// Returns `true` when the status changed and `false` when the task was
    /// already done, in which case nothing is modified.
    pub fn mark_done(&mut self, clock: &impl Clock) -> bool {
        if !self.status.can_transition_to(TaskStatus::Done) {
            return false;
        }
        self.status = TaskStatus::Done;
        self.touch(storage_instant(clock.utc()));
        true
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.revision = self.revision.saturating_add(1);
        self.updated_at = now;
    }
}

fn storage_instant(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(STORED_SUBSEC_DIGITS)
}

/// Runs both field checks and reports every violation at once.
fn validate(
    title: String,
    due_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<TaskTitle, TaskValidationError> {
    let mut violations = Vec::new();

    let checked_title = match TaskTitle::new(title) {
        Ok(valid_title) => Some(valid_title),
        Err(err) => {
            violations.push(err);
            None
        }
    };

    if let Some(due) = due_date.filter(|due| *due <= now) {
        violations.push(TaskDomainError::DueDateNotInFuture { due_date: due, now });
    }

    match (checked_title, TaskValidationError::from_violations(violations)) {
        (Some(valid_title), None) => Ok(valid_title),
        (_, Some(err)) => Err(err),
        (None, None) => Err(TaskDomainError::EmptyTitle.into()),
    }
}
