//! Assessment skill entities

use serde::{Deserialize, Serialize};

use super::audit::AuditStamp;
use super::ids::{CourseId, SkillBranchId, SkillId};

/// A grouping of related skills
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillBranch {
    pub id: SkillBranchId,
    pub course_id: CourseId,
    pub title: String,
    pub description: Option<String>,
    pub audit: AuditStamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub course_id: CourseId,
    /// Skills may stand alone outside any branch
    pub branch_id: Option<SkillBranchId>,
    pub title: String,
    pub description: Option<String>,
    pub audit: AuditStamp,
}
