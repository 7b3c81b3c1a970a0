//! Step definitions for task HTTP behaviour scenarios.

pub mod given;
pub mod when;
pub mod world;
