//! Taskhub: a task-tracking record service.
//!
//! Clients create, read, update, complete, delete, and page through task
//! records, each carrying a title, an optional due date, and an `OPEN` or
//! `DONE` status.
//!
//! # Architecture
//!
//! Taskhub follows hexagonal architecture principles:
//!
//! - **Domain**: validation and the `OPEN` to `DONE` transition, with no
//!   infrastructure dependencies
//! - **Ports**: the task repository contract
//! - **Adapters**: in-memory and `PostgreSQL` repositories, plus the HTTP
//!   surface
//! - **Services**: the task manager orchestrating domain and repository
//!
//! # Modules
//!
//! - [`task`]: task records, storage, orchestration, and HTTP mapping
//! - [`config`]: command-line and environment configuration
//! - [`telemetry`]: tracing subscriber setup

pub mod config;
pub mod task;
pub mod telemetry;
