//! Course duplication engine
//!
//! Copies a whole course aggregate under a new course identity inside one
//! transaction. Timestamps move by the offset between the original and the
//! requested start; attachment content is shared through new reference
//! rows. Any failure rolls the whole run back.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use crate::domain::entities::{CourseAggregate, CourseId, EntityKind, UserId};
use crate::domain::ports::{CourseRepository, CourseTransaction};
use crate::error::DuplicationError;

pub mod attachment;
pub mod audit_policy;
pub mod context;
pub mod dependency;
pub mod families;
pub mod identity_map;
pub mod time_shift;

pub use audit_policy::{AuditMode, AuditPolicy};
pub use context::DuplicationContext;
pub use dependency::ConditionResolver;
pub use families::{default_pipeline, FamilyDuplicator};
pub use identity_map::IdentityMap;
pub use time_shift::{ShiftOverflow, TimeShift};

/// Caller-supplied overrides for the new course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateCourseParams {
    pub new_title: String,
    /// The shift applied to every timestamp is `new_start_at - original.start_at`
    pub new_start_at: DateTime<Utc>,
    /// User recorded on regenerated audit metadata
    pub actor: UserId,
}

/// Summary of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct DuplicationReport {
    pub source_course_id: CourseId,
    pub new_course_id: CourseId,
    pub shift_seconds: i64,
    pub duplicated: BTreeMap<EntityKind, usize>,
}

impl DuplicationReport {
    fn from_context(ctx: &DuplicationContext) -> Self {
        let duplicated = EntityKind::ALL
            .iter()
            .map(|kind| (*kind, ctx.identities.count(*kind)))
            .filter(|(_, count)| *count > 0)
            .collect();

        Self {
            source_course_id: ctx.source_course_id,
            new_course_id: ctx.new_course_id,
            shift_seconds: ctx.shift.offset().num_seconds(),
            duplicated,
        }
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.duplicated.get(&kind).copied().unwrap_or(0)
    }
}

/// The new course and what it took to build it
#[derive(Debug, Clone)]
pub struct DuplicationOutcome {
    pub course: CourseAggregate,
    pub report: DuplicationReport,
}

/// Service coordinating a course duplication
pub struct DuplicationService<CR>
where
    CR: CourseRepository,
{
    courses: Arc<CR>,
    policy: AuditPolicy,
    pipeline: Vec<Box<dyn FamilyDuplicator<CR::Transaction>>>,
}

impl<CR> DuplicationService<CR>
where
    CR: CourseRepository,
{
    pub fn new(courses: Arc<CR>, policy: AuditPolicy) -> Self {
        Self::with_pipeline(courses, policy, default_pipeline())
    }

    /// Build a service running a custom family pipeline
    pub fn with_pipeline(
        courses: Arc<CR>,
        policy: AuditPolicy,
        pipeline: Vec<Box<dyn FamilyDuplicator<CR::Transaction>>>,
    ) -> Self {
        Self {
            courses,
            policy,
            pipeline,
        }
    }

    /// Duplicate the stored course `original_id`
    pub async fn duplicate(
        &self,
        original_id: &CourseId,
        params: &DuplicateCourseParams,
    ) -> Result<DuplicationOutcome, DuplicationError> {
        let source = self
            .courses
            .find_aggregate(original_id)
            .await?
            .ok_or(DuplicationError::SourceNotFound(*original_id))?;

        self.duplicate_aggregate(&source, params).await
    }

    /// Duplicate an already loaded aggregate
    pub async fn duplicate_aggregate(
        &self,
        source: &CourseAggregate,
        params: &DuplicateCourseParams,
    ) -> Result<DuplicationOutcome, DuplicationError> {
        let span = tracing::info_span!("duplicate_course", source = %source.id());
        self.execute(source, params).instrument(span).await
    }

    async fn execute(
        &self,
        source: &CourseAggregate,
        params: &DuplicateCourseParams,
    ) -> Result<DuplicationOutcome, DuplicationError> {
        let shift = TimeShift::between(source.course.start_at, params.new_start_at);
        let mut ctx =
            DuplicationContext::new(source.id(), shift, self.policy.clone(), params.actor);

        tracing::info!(
            target_course = %ctx.new_course_id,
            shift_seconds = shift.offset().num_seconds(),
            "Starting course duplication"
        );

        let mut tx = self.courses.begin().await?;

        match self.run(source, params, &mut ctx, &mut tx).await {
            Ok(course) => {
                if let Err(e) = tx.commit().await {
                    tracing::error!(error = %e, "Commit of course duplicate failed");
                    return Err(e.into());
                }
                let report = DuplicationReport::from_context(&ctx);
                tracing::info!(
                    target_course = %report.new_course_id,
                    entities = ctx.identities.len(),
                    "Course duplicated"
                );
                Ok(DuplicationOutcome { course, report })
            }
            Err(e) => {
                tracing::error!(error = %e, "Course duplication failed");
                tracing::warn!(
                    written = ctx.identities.len(),
                    "Rolling back partial duplicate"
                );
                if let Err(rollback) = tx.rollback().await {
                    tracing::error!(error = %rollback, "Rollback failed");
                }
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        source: &CourseAggregate,
        params: &DuplicateCourseParams,
        ctx: &mut DuplicationContext,
        tx: &mut CR::Transaction,
    ) -> Result<CourseAggregate, DuplicationError> {
        let course = families::course::duplicate_root(source, params, ctx, tx).await?;
        ctx.identities.seal(EntityKind::Course);
        let mut target = CourseAggregate::new(course);

        for family in &self.pipeline {
            if let Some(missing) = family
                .requires()
                .iter()
                .find(|kind| !ctx.identities.is_sealed(**kind))
            {
                return Err(DuplicationError::PhaseOrder {
                    phase: family.name(),
                    missing: *missing,
                });
            }

            family.duplicate(source, ctx, tx, &mut target).await?;

            for kind in family.produces() {
                ctx.identities.seal(*kind);
            }

            tracing::debug!(
                phase = family.name(),
                entities = ctx.identities.len(),
                "Phase complete"
            );
        }

        Ok(target)
    }
}
