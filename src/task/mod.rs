//! Task record management for Taskhub.
//!
//! Tasks are created `OPEN` with a non-blank title and an optional future due
//! date, may have their title and due date replaced, may be marked `DONE`
//! once, and may be deleted. Listings are paged and ordered, by due date
//! ascending unless asked otherwise. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
