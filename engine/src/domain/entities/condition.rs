//! Condition domain entity
//!
//! A condition gates its `conditional` behind a `target`. Both ends are
//! polymorphic and are modelled as sum types over the families that can
//! take part.

use serde::{Deserialize, Serialize};

use super::audit::AuditStamp;
use super::ids::{
    AchievementId, AssessmentId, ConditionId, CourseId, EntityId, EntityRef, LevelId,
};

/// The entity gated behind a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Conditional {
    Achievement(AchievementId),
    Assessment(AssessmentId),
}

impl Conditional {
    pub fn entity_ref(&self) -> EntityRef {
        match self {
            Conditional::Achievement(id) => id.entity_ref(),
            Conditional::Assessment(id) => id.entity_ref(),
        }
    }
}

/// What must be satisfied before the conditional unlocks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConditionTarget {
    Achievement {
        achievement_id: AchievementId,
    },
    Assessment {
        assessment_id: AssessmentId,
        minimum_grade_percentage: Option<f64>,
    },
    Level {
        level_id: LevelId,
    },
}

impl ConditionTarget {
    pub fn entity_ref(&self) -> EntityRef {
        match self {
            ConditionTarget::Achievement { achievement_id } => achievement_id.entity_ref(),
            ConditionTarget::Assessment { assessment_id, .. } => assessment_id.entity_ref(),
            ConditionTarget::Level { level_id } => level_id.entity_ref(),
        }
    }

    /// Stable type tag of the condition
    pub fn actable_type(&self) -> &'static str {
        match self {
            ConditionTarget::Achievement { .. } => "achievement",
            ConditionTarget::Assessment { .. } => "assessment",
            ConditionTarget::Level { .. } => "level",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: ConditionId,
    pub course_id: CourseId,
    pub conditional: Conditional,
    pub target: ConditionTarget,
    pub audit: AuditStamp,
}
