//! Material folder and material entities
//!
//! Folders form a tree per course. A folder may also be owned by an
//! assessment, in which case it holds that assessment's files.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::attachment::AttachmentReference;
use super::audit::AuditStamp;
use super::ids::{AssessmentId, CourseId, MaterialFolderId, MaterialId};

/// Entity a folder belongs to besides its course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum FolderOwner {
    Assessment(AssessmentId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialFolder {
    pub id: MaterialFolderId,
    pub course_id: CourseId,
    /// `None` for root folders
    pub parent_id: Option<MaterialFolderId>,
    pub owner: Option<FolderOwner>,
    pub name: String,
    pub description: Option<String>,
    pub can_student_upload: bool,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    pub audit: AuditStamp,
}

impl MaterialFolder {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A file in a folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub folder_id: MaterialFolderId,
    pub name: String,
    pub description: Option<String>,
    pub attachment: AttachmentReference,
    pub audit: AuditStamp,
}
