//! Achievement domain entity

use serde::{Deserialize, Serialize};

use super::attachment::AttachmentReference;
use super::audit::AuditStamp;
use super::ids::{AchievementId, CourseId};

/// An achievement students unlock once its conditions are met
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub course_id: CourseId,
    pub title: String,
    pub description: Option<String>,
    pub weight: i32,
    pub published: bool,
    pub badge: Option<AttachmentReference>,
    pub audit: AuditStamp,
}
