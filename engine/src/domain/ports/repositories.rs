//! Repository port traits
//!
//! These traits define the interface to the persistence substrate.
//! Implementations are provided by adapters (e.g., PostgreSQL).
//!
//! Reads go through `CourseRepository`. All writes of one duplication run go
//! through a single `CourseTransaction`, which either commits as a whole or
//! leaves nothing behind. Dropping a transaction without committing it must
//! discard its writes.

use async_trait::async_trait;

use crate::domain::entities::{
    Achievement, AttachmentContentId, AttachmentReference, Condition, Course, CourseAggregate,
    CourseId, Forum, LessonPlanItem, Level, Material, MaterialFolder, Question, Skill,
    SkillBranch,
};
use crate::error::DomainError;

/// Read access to course aggregates and the entry point for writes
#[async_trait]
pub trait CourseRepository: Send + Sync {
    type Transaction: CourseTransaction;

    /// Load a course and everything it owns
    async fn find_aggregate(&self, id: &CourseId) -> Result<Option<CourseAggregate>, DomainError>;

    /// Open a unit of work
    async fn begin(&self) -> Result<Self::Transaction, DomainError>;
}

/// One atomic unit of work
///
/// Insert methods report uniqueness violations as `DomainError::AlreadyExists`
/// and broken references as `DomainError::Conflict`.
#[async_trait]
pub trait CourseTransaction: Send {
    async fn insert_course(&mut self, course: &Course) -> Result<(), DomainError>;

    /// Insert an item together with its subtype row
    async fn insert_lesson_plan_item(&mut self, item: &LessonPlanItem) -> Result<(), DomainError>;

    async fn insert_question(&mut self, question: &Question) -> Result<(), DomainError>;

    async fn insert_achievement(&mut self, achievement: &Achievement) -> Result<(), DomainError>;

    async fn insert_condition(&mut self, condition: &Condition) -> Result<(), DomainError>;

    async fn insert_level(&mut self, level: &Level) -> Result<(), DomainError>;

    async fn insert_skill_branch(&mut self, branch: &SkillBranch) -> Result<(), DomainError>;

    async fn insert_skill(&mut self, skill: &Skill) -> Result<(), DomainError>;

    async fn insert_material_folder(&mut self, folder: &MaterialFolder)
        -> Result<(), DomainError>;

    async fn insert_material(&mut self, material: &Material) -> Result<(), DomainError>;

    async fn insert_forum(&mut self, forum: &Forum) -> Result<(), DomainError>;

    /// Check that shared content exists in the attachment store
    async fn attachment_content_exists(
        &mut self,
        content: &AttachmentContentId,
    ) -> Result<bool, DomainError>;

    /// Insert a reference row pointing at existing content
    async fn insert_attachment_reference(
        &mut self,
        reference: &AttachmentReference,
    ) -> Result<(), DomainError>;

    async fn commit(self) -> Result<(), DomainError>;

    async fn rollback(self) -> Result<(), DomainError>;
}
