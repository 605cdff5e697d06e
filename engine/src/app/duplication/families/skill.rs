//! Skill and skill branch duplication
//!
//! Branches go first so each skill can resolve its branch through the
//! identity map.

use async_trait::async_trait;

use crate::app::duplication::context::DuplicationContext;
use crate::domain::entities::{
    CourseAggregate, EntityId, EntityKind, Skill, SkillBranch, SkillBranchId, SkillId,
};
use crate::domain::ports::CourseTransaction;
use crate::error::DuplicationError;

use super::FamilyDuplicator;

pub struct SkillDuplicator;

#[async_trait]
impl<T: CourseTransaction> FamilyDuplicator<T> for SkillDuplicator {
    fn name(&self) -> &'static str {
        "skills"
    }

    fn requires(&self) -> &'static [EntityKind] {
        &[EntityKind::Course]
    }

    fn produces(&self) -> &'static [EntityKind] {
        &[EntityKind::SkillBranch, EntityKind::Skill]
    }

    async fn duplicate(
        &self,
        source: &CourseAggregate,
        ctx: &mut DuplicationContext,
        tx: &mut T,
        target: &mut CourseAggregate,
    ) -> Result<(), DuplicationError> {
        for branch in &source.skill_branches {
            let duplicate = SkillBranch {
                id: SkillBranchId::new(),
                course_id: ctx.new_course_id,
                title: branch.title.clone(),
                description: branch.description.clone(),
                audit: ctx.stamp(EntityKind::SkillBranch, &branch.audit),
            };

            tx.insert_skill_branch(&duplicate).await?;
            ctx.identities.put(branch.id, duplicate.id)?;
            target.skill_branches.push(duplicate);
        }
        ctx.identities.seal(EntityKind::SkillBranch);

        for skill in &source.skills {
            let branch_id = skill
                .branch_id
                .map(|branch_id| ctx.identities.require(skill.id.entity_ref(), branch_id))
                .transpose()?;

            let duplicate = Skill {
                id: SkillId::new(),
                course_id: ctx.new_course_id,
                branch_id,
                title: skill.title.clone(),
                description: skill.description.clone(),
                audit: ctx.stamp(EntityKind::Skill, &skill.audit),
            };

            tx.insert_skill(&duplicate).await?;
            ctx.identities.put(skill.id, duplicate.id)?;
            target.skills.push(duplicate);
        }

        Ok(())
    }
}
