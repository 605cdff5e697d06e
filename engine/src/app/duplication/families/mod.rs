//! Entity family duplicators
//!
//! One strategy per entity family. Each declares the kinds that must be
//! complete before it runs and the kinds it produces; the coordinator
//! enforces that order instead of relying on declaration order.

use async_trait::async_trait;

use crate::domain::entities::{CourseAggregate, EntityKind};
use crate::domain::ports::CourseTransaction;
use crate::error::DuplicationError;

use super::context::DuplicationContext;
use super::dependency::ConditionResolver;

pub mod achievement;
pub mod course;
pub mod forum;
pub mod lesson_plan;
pub mod level;
pub mod material;
pub mod skill;

pub use achievement::AchievementDuplicator;
pub use forum::ForumDuplicator;
pub use lesson_plan::LessonPlanDuplicator;
pub use level::LevelDuplicator;
pub use material::MaterialDuplicator;
pub use skill::SkillDuplicator;

/// Duplicates one entity family of a course into the new course
#[async_trait]
pub trait FamilyDuplicator<T: CourseTransaction>: Send + Sync {
    /// Phase name used in logs and ordering errors
    fn name(&self) -> &'static str;

    /// Kinds that must be sealed before this family runs
    fn requires(&self) -> &'static [EntityKind] {
        &[]
    }

    /// Kinds sealed once this family has run
    fn produces(&self) -> &'static [EntityKind];

    /// Duplicate the family from `source`, appending duplicates to `target`
    async fn duplicate(
        &self,
        source: &CourseAggregate,
        ctx: &mut DuplicationContext,
        tx: &mut T,
        target: &mut CourseAggregate,
    ) -> Result<(), DuplicationError>;
}

/// The families in the order a full course duplication runs them
pub fn default_pipeline<T: CourseTransaction>() -> Vec<Box<dyn FamilyDuplicator<T>>> {
    vec![
        Box::new(LevelDuplicator),
        Box::new(LessonPlanDuplicator),
        Box::new(AchievementDuplicator),
        Box::new(SkillDuplicator),
        Box::new(MaterialDuplicator),
        Box::new(ForumDuplicator),
        Box::new(ConditionResolver),
    ]
}
