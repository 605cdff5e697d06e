//! Per-run duplication state shared by every family duplicator

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::audit_policy::AuditPolicy;
use super::identity_map::IdentityMap;
use super::time_shift::TimeShift;
use crate::domain::entities::{AuditStamp, CourseId, EntityKind, UserId};
use crate::error::DuplicationError;

pub struct DuplicationContext {
    pub source_course_id: CourseId,
    /// Identity of the course being built, assigned before anything is written
    pub new_course_id: CourseId,
    pub shift: TimeShift,
    pub identities: IdentityMap,
    pub actor: UserId,
    /// Run time stamped on regenerated audit metadata
    pub now: DateTime<Utc>,
    policy: AuditPolicy,
}

impl DuplicationContext {
    pub fn new(
        source_course_id: CourseId,
        shift: TimeShift,
        policy: AuditPolicy,
        actor: UserId,
    ) -> Self {
        Self {
            source_course_id,
            new_course_id: CourseId::new(),
            shift,
            identities: IdentityMap::new(),
            actor,
            now: Utc::now(),
            policy,
        }
    }

    pub fn policy(&self) -> &AuditPolicy {
        &self.policy
    }

    /// Audit stamp for the duplicate of an entity of `kind`
    pub fn stamp(&self, kind: EntityKind, original: &AuditStamp) -> AuditStamp {
        self.policy.stamp(kind, original, self.actor, self.now)
    }

    /// Shift a single timestamp of entity `(kind, original_id)`
    pub fn shift_at(
        &self,
        kind: EntityKind,
        original_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, DuplicationError> {
        self.shift
            .shift(at)
            .map_err(|e| DuplicationError::validation(kind, original_id, e.to_string()))
    }

    pub fn shift_opt(
        &self,
        kind: EntityKind,
        original_id: Uuid,
        at: Option<DateTime<Utc>>,
    ) -> Result<Option<DateTime<Utc>>, DuplicationError> {
        at.map(|t| self.shift_at(kind, original_id, t)).transpose()
    }

    /// Shift a start/end window and check the shifted window is still ordered
    pub fn shift_window(
        &self,
        kind: EntityKind,
        original_id: Uuid,
        start_at: DateTime<Utc>,
        end_at: Option<DateTime<Utc>>,
    ) -> Result<(DateTime<Utc>, Option<DateTime<Utc>>), DuplicationError> {
        let start = self.shift_at(kind, original_id, start_at)?;
        let end = self.shift_opt(kind, original_id, end_at)?;

        if let Some(end) = end {
            if start >= end {
                return Err(DuplicationError::validation(
                    kind,
                    original_id,
                    format!("start {} is not before end {}", start, end),
                ));
            }
        }

        Ok((start, end))
    }
}
