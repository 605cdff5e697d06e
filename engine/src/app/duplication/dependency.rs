//! Dependency resolver for conditions
//!
//! Conditions reference their endpoints polymorphically and may point at
//! achievements, assessments or levels. They are duplicated last, in a
//! single pass, once every family that can be an endpoint has been sealed.
//! Conditions never depend on other conditions, so no ordering among them
//! is needed. An endpoint that still cannot be resolved is an ordering bug
//! (or a reference leaving the aggregate) and fails the run.

use async_trait::async_trait;

use crate::domain::entities::{
    Condition, ConditionId, ConditionTarget, Conditional, CourseAggregate, EntityId, EntityKind,
};
use crate::domain::ports::CourseTransaction;
use crate::error::DuplicationError;

use super::context::DuplicationContext;
use super::families::FamilyDuplicator;
use super::identity_map::IdentityMap;

/// Kinds that can appear at either end of a condition
pub const CONDITION_ENDPOINT_KINDS: &[EntityKind] = &[
    EntityKind::Course,
    EntityKind::Achievement,
    EntityKind::Assessment,
    EntityKind::Level,
];

pub struct ConditionResolver;

impl ConditionResolver {
    /// Map both ends of `condition` onto their duplicates
    pub fn resolve(
        condition: &Condition,
        identities: &IdentityMap,
    ) -> Result<(Conditional, ConditionTarget), DuplicationError> {
        let dependent = condition.id.entity_ref();

        let conditional = match condition.conditional {
            Conditional::Achievement(id) => {
                Conditional::Achievement(identities.require(dependent, id)?)
            }
            Conditional::Assessment(id) => {
                Conditional::Assessment(identities.require(dependent, id)?)
            }
        };

        let target = match condition.target {
            ConditionTarget::Achievement { achievement_id } => ConditionTarget::Achievement {
                achievement_id: identities.require(dependent, achievement_id)?,
            },
            ConditionTarget::Assessment {
                assessment_id,
                minimum_grade_percentage,
            } => ConditionTarget::Assessment {
                assessment_id: identities.require(dependent, assessment_id)?,
                minimum_grade_percentage,
            },
            ConditionTarget::Level { level_id } => ConditionTarget::Level {
                level_id: identities.require(dependent, level_id)?,
            },
        };

        Ok((conditional, target))
    }
}

#[async_trait]
impl<T: CourseTransaction> FamilyDuplicator<T> for ConditionResolver {
    fn name(&self) -> &'static str {
        "conditions"
    }

    fn requires(&self) -> &'static [EntityKind] {
        CONDITION_ENDPOINT_KINDS
    }

    fn produces(&self) -> &'static [EntityKind] {
        &[EntityKind::Condition]
    }

    async fn duplicate(
        &self,
        source: &CourseAggregate,
        ctx: &mut DuplicationContext,
        tx: &mut T,
        target: &mut CourseAggregate,
    ) -> Result<(), DuplicationError> {
        for condition in &source.conditions {
            let (conditional, dependency) = Self::resolve(condition, &ctx.identities)?;

            let duplicate = Condition {
                id: ConditionId::new(),
                course_id: ctx.new_course_id,
                conditional,
                target: dependency,
                audit: ctx.stamp(EntityKind::Condition, &condition.audit),
            };

            tx.insert_condition(&duplicate).await?;
            ctx.identities.put(condition.id, duplicate.id)?;

            tracing::trace!(
                condition = %condition.id,
                conditional = %duplicate.conditional.entity_ref(),
                target = %duplicate.target.entity_ref(),
                "Duplicated condition"
            );

            target.conditions.push(duplicate);
        }

        Ok(())
    }
}
