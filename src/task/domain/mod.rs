//! Domain model for task records.
//!
//! The task domain owns title and due-date validation, the `OPEN` to `DONE`
//! transition, and the paging vocabulary used by listings, while keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod ids;
mod page;
mod status;
mod task;

pub use error::{
    PageRequestError, ParseTaskSortError, ParseTaskStatusError, TaskDomainError,
    TaskValidationError,
};
pub use ids::{TaskId, TaskTitle};
pub use page::{Page, PageRequest, SortDirection, TaskSort, TaskSortKey};
pub use status::TaskStatus;
pub use task::{INITIAL_REVISION, PersistedTaskData, TaskRecord};
