//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod duplication;

pub use duplication::{
    AuditMode, AuditPolicy, DuplicateCourseParams, DuplicationOutcome, DuplicationReport,
    DuplicationService,
};
