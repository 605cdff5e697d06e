//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The in-memory repository behaves like the PostgreSQL adapter where the
//! engine can observe it: writes are invisible until commit and constraint
//! violations come back as the same `DomainError` variants.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
