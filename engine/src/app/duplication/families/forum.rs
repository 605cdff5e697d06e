//! Forum duplication
//!
//! Only the forum itself is copied; topics and posts stay with the
//! original course.

use async_trait::async_trait;

use crate::app::duplication::context::DuplicationContext;
use crate::domain::entities::{CourseAggregate, EntityKind, Forum, ForumId};
use crate::domain::ports::CourseTransaction;
use crate::error::DuplicationError;

use super::FamilyDuplicator;

pub struct ForumDuplicator;

#[async_trait]
impl<T: CourseTransaction> FamilyDuplicator<T> for ForumDuplicator {
    fn name(&self) -> &'static str {
        "forums"
    }

    fn requires(&self) -> &'static [EntityKind] {
        &[EntityKind::Course]
    }

    fn produces(&self) -> &'static [EntityKind] {
        &[EntityKind::Forum]
    }

    async fn duplicate(
        &self,
        source: &CourseAggregate,
        ctx: &mut DuplicationContext,
        tx: &mut T,
        target: &mut CourseAggregate,
    ) -> Result<(), DuplicationError> {
        for forum in &source.forums {
            let duplicate = Forum {
                id: ForumId::new(),
                course_id: ctx.new_course_id,
                name: forum.name.clone(),
                slug: forum.slug.clone(),
                description: forum.description.clone(),
                audit: ctx.stamp(EntityKind::Forum, &forum.audit),
            };

            tx.insert_forum(&duplicate).await?;
            ctx.identities.put(forum.id, duplicate.id)?;
            target.forums.push(duplicate);
        }

        Ok(())
    }
}
