//! Adapters for the task record ports and the HTTP surface.
//!
//! - [`memory::InMemoryTaskRepository`]: thread-safe in-memory storage, used
//!   by tests and when no database is configured
//! - [`postgres::PostgresTaskRepository`]: `PostgreSQL` persistence using
//!   Diesel ORM
//! - [`http`]: axum router translating requests into
//!   [`TaskManager`](crate::task::services::TaskManager) calls

pub mod http;
pub mod memory;
pub mod postgres;
