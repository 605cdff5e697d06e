//! Unified error types for the duplication engine
//!
//! This module defines error types for each layer:
//! - `DomainError`: Persistence port errors, reported by adapters
//! - `DuplicationError`: Engine errors (wraps domain errors for callers)

use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{CourseId, EntityKind, EntityRef};

/// Domain layer errors - reported by repository ports
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Entity already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Duplication engine errors
///
/// Any of these aborts the whole run; no partial course is committed.
#[derive(Debug, Error)]
pub enum DuplicationError {
    #[error("Source course not found: {0}")]
    SourceNotFound(CourseId),

    #[error("Validation failed for {kind} {original_id}: {reason}")]
    ValidationFailure {
        kind: EntityKind,
        original_id: Uuid,
        reason: String,
    },

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Unresolved dependency: {dependent} requires {missing}")]
    UnresolvedDependency {
        dependent: EntityRef,
        missing: EntityRef,
    },

    #[error("Phase '{phase}' requires {missing} to be duplicated first")]
    PhaseOrder {
        phase: &'static str,
        missing: EntityKind,
    },

    #[error("Attachment reference to {content} rejected: {reason}")]
    AttachmentReferenceFailure { content: String, reason: String },

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DuplicationError {
    pub fn validation(kind: EntityKind, original_id: Uuid, reason: impl Into<String>) -> Self {
        DuplicationError::ValidationFailure {
            kind,
            original_id,
            reason: reason.into(),
        }
    }

    /// Whether the error is the dependency-ordering family of failures
    pub fn is_ordering_bug(&self) -> bool {
        matches!(
            self,
            DuplicationError::UnresolvedDependency { .. } | DuplicationError::PhaseOrder { .. }
        )
    }
}

impl From<DomainError> for DuplicationError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::AlreadyExists(msg) | DomainError::Conflict(msg) => {
                DuplicationError::ConstraintViolation(msg)
            }
            DomainError::Validation(msg) => DuplicationError::ConstraintViolation(msg),
            DomainError::NotFound(msg) | DomainError::Database(msg) => {
                DuplicationError::Persistence(msg)
            }
            DomainError::Internal(msg) => DuplicationError::Internal(msg),
        }
    }
}
