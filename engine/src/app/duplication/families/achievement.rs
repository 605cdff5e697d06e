//! Achievement duplication
//!
//! Achievements are registered as they are written. Their conditions are
//! left to the condition resolver, which runs once every possible endpoint
//! exists.

use async_trait::async_trait;

use crate::app::duplication::attachment::duplicate_reference;
use crate::app::duplication::context::DuplicationContext;
use crate::domain::entities::{Achievement, AchievementId, CourseAggregate, EntityKind};
use crate::domain::ports::CourseTransaction;
use crate::error::DuplicationError;

use super::FamilyDuplicator;

pub struct AchievementDuplicator;

#[async_trait]
impl<T: CourseTransaction> FamilyDuplicator<T> for AchievementDuplicator {
    fn name(&self) -> &'static str {
        "achievements"
    }

    fn requires(&self) -> &'static [EntityKind] {
        &[EntityKind::Course]
    }

    fn produces(&self) -> &'static [EntityKind] {
        &[EntityKind::Achievement]
    }

    async fn duplicate(
        &self,
        source: &CourseAggregate,
        ctx: &mut DuplicationContext,
        tx: &mut T,
        target: &mut CourseAggregate,
    ) -> Result<(), DuplicationError> {
        for achievement in &source.achievements {
            let badge = match &achievement.badge {
                Some(badge) => Some(duplicate_reference(badge, ctx, tx).await?),
                None => None,
            };

            let duplicate = Achievement {
                id: AchievementId::new(),
                course_id: ctx.new_course_id,
                title: achievement.title.clone(),
                description: achievement.description.clone(),
                weight: achievement.weight,
                published: achievement.published,
                badge,
                audit: ctx.stamp(EntityKind::Achievement, &achievement.audit),
            };

            tx.insert_achievement(&duplicate).await?;
            ctx.identities.put(achievement.id, duplicate.id)?;
            target.achievements.push(duplicate);
        }

        Ok(())
    }
}
