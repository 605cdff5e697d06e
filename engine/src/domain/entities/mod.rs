//! Domain entities
//!
//! Pure domain models for a course and everything it owns.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod achievement;
pub mod attachment;
pub mod audit;
pub mod condition;
pub mod course;
pub mod forum;
pub mod ids;
pub mod lesson_plan;
pub mod level;
pub mod material;
pub mod question;
pub mod skill;

pub use achievement::Achievement;
pub use attachment::{AttachmentContentId, AttachmentReference};
pub use audit::AuditStamp;
pub use condition::{Condition, ConditionTarget, Conditional};
pub use course::{Course, CourseAggregate};
pub use forum::Forum;
pub use ids::{
    AchievementId, AssessmentId, AttachmentReferenceId, ConditionId, CourseId, EntityId,
    EntityKind, EntityRef, EventId, ForumId, LessonPlanItemId, LevelId, MaterialFolderId,
    MaterialId, MilestoneId, QuestionId, SkillBranchId, SkillId, UserId,
};
pub use lesson_plan::{Assessment, Event, EventType, LessonPlanActable, LessonPlanItem, Milestone};
pub use level::Level;
pub use material::{FolderOwner, Material, MaterialFolder};
pub use question::{
    GradingScheme, MultipleResponseOption, MultipleResponseQuestion, ProgrammingQuestion,
    Question, QuestionActable, TextResponseQuestion,
};
pub use skill::{Skill, SkillBranch};
