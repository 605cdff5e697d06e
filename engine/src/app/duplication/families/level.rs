//! Level duplication

use async_trait::async_trait;

use crate::app::duplication::context::DuplicationContext;
use crate::domain::entities::{CourseAggregate, EntityKind, Level, LevelId};
use crate::domain::ports::CourseTransaction;
use crate::error::DuplicationError;

use super::FamilyDuplicator;

pub struct LevelDuplicator;

#[async_trait]
impl<T: CourseTransaction> FamilyDuplicator<T> for LevelDuplicator {
    fn name(&self) -> &'static str {
        "levels"
    }

    fn requires(&self) -> &'static [EntityKind] {
        &[EntityKind::Course]
    }

    fn produces(&self) -> &'static [EntityKind] {
        &[EntityKind::Level]
    }

    async fn duplicate(
        &self,
        source: &CourseAggregate,
        ctx: &mut DuplicationContext,
        tx: &mut T,
        target: &mut CourseAggregate,
    ) -> Result<(), DuplicationError> {
        for level in &source.levels {
            let duplicate = Level {
                id: LevelId::new(),
                course_id: ctx.new_course_id,
                experience_points_threshold: level.experience_points_threshold,
                audit: ctx.stamp(EntityKind::Level, &level.audit),
            };

            tx.insert_level(&duplicate).await?;
            ctx.identities.put(level.id, duplicate.id)?;
            target.levels.push(duplicate);
        }

        Ok(())
    }
}
