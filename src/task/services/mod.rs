//! Application services for task record orchestration.

mod manager;

pub use manager::{TaskInput, TaskManager, TaskManagerError, TaskManagerResult, TaskResponse};
