//! Forum domain entity

use serde::{Deserialize, Serialize};

use super::audit::AuditStamp;
use super::ids::{CourseId, ForumId};

/// A course discussion forum. The slug is unique within a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forum {
    pub id: ForumId,
    pub course_id: CourseId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub audit: AuditStamp,
}
