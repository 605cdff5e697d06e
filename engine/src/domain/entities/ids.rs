//! Entity identifiers
//!
//! Every duplicable entity is identified by a UUID newtype. `EntityKind`
//! names the family an identifier belongs to, which lets identifiers of
//! different families share a single lookup table keyed by `(kind, uuid)`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The family a duplicable entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Course,
    LessonPlanItem,
    Assessment,
    Event,
    Milestone,
    Question,
    Achievement,
    Condition,
    Level,
    SkillBranch,
    Skill,
    MaterialFolder,
    Material,
    Forum,
    AttachmentReference,
}

impl EntityKind {
    pub const ALL: [EntityKind; 15] = [
        EntityKind::Course,
        EntityKind::LessonPlanItem,
        EntityKind::Assessment,
        EntityKind::Event,
        EntityKind::Milestone,
        EntityKind::Question,
        EntityKind::Achievement,
        EntityKind::Condition,
        EntityKind::Level,
        EntityKind::SkillBranch,
        EntityKind::Skill,
        EntityKind::MaterialFolder,
        EntityKind::Material,
        EntityKind::Forum,
        EntityKind::AttachmentReference,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Course => "course",
            EntityKind::LessonPlanItem => "lesson_plan_item",
            EntityKind::Assessment => "assessment",
            EntityKind::Event => "event",
            EntityKind::Milestone => "milestone",
            EntityKind::Question => "question",
            EntityKind::Achievement => "achievement",
            EntityKind::Condition => "condition",
            EntityKind::Level => "level",
            EntityKind::SkillBranch => "skill_branch",
            EntityKind::Skill => "skill",
            EntityKind::MaterialFolder => "material_folder",
            EntityKind::Material => "material",
            EntityKind::Forum => "forum",
            EntityKind::AttachmentReference => "attachment_reference",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        EntityKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == needle)
            .ok_or_else(|| format!("Unknown entity kind: {}", s))
    }
}

/// A typed identifier of one entity family
pub trait EntityId:
    Copy + Eq + std::hash::Hash + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
    const KIND: EntityKind;

    fn as_uuid(&self) -> Uuid;

    fn from_uuid(id: Uuid) -> Self;

    fn entity_ref(&self) -> EntityRef {
        EntityRef {
            kind: Self::KIND,
            id: self.as_uuid(),
        }
    }
}

/// Untyped reference to an entity of any family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: Uuid,
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl EntityId for $name {
            const KIND: EntityKind = EntityKind::$kind;

            fn as_uuid(&self) -> Uuid {
                self.0
            }

            fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a course
    CourseId => Course
);
entity_id!(
    /// Unique identifier for a lesson plan item
    LessonPlanItemId => LessonPlanItem
);
entity_id!(
    /// Unique identifier for an assessment (the subtype row, not its lesson plan item)
    AssessmentId => Assessment
);
entity_id!(EventId => Event);
entity_id!(MilestoneId => Milestone);
entity_id!(QuestionId => Question);
entity_id!(AchievementId => Achievement);
entity_id!(ConditionId => Condition);
entity_id!(LevelId => Level);
entity_id!(SkillBranchId => SkillBranch);
entity_id!(SkillId => Skill);
entity_id!(MaterialFolderId => MaterialFolder);
entity_id!(MaterialId => Material);
entity_id!(ForumId => Forum);
entity_id!(
    /// Unique identifier for an attachment reference row (not the shared content)
    AttachmentReferenceId => AttachmentReference
);

/// Identifier of a user recorded in audit metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
