//! Level domain entity

use serde::{Deserialize, Serialize};

use super::audit::AuditStamp;
use super::ids::{CourseId, LevelId};

/// An experience points threshold students reach to level up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub id: LevelId,
    pub course_id: CourseId,
    pub experience_points_threshold: i32,
    pub audit: AuditStamp,
}
