//! Attachment references
//!
//! Binary content is content-addressed and shared: many reference rows may
//! point at the same content. Duplicating a course only ever creates new
//! reference rows.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::audit::AuditStamp;
use super::ids::AttachmentReferenceId;

/// Pointer to shared attachment content: the hex SHA-256 of its bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttachmentContentId(pub String);

impl AttachmentContentId {
    /// Compute the content pointer for a blob
    ///
    /// This is the key the attachment store files content under. The engine
    /// only compares pointers; stores and seeders use this to name content.
    pub fn for_bytes(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AttachmentContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A reference row linking an owner (material, badge, programming question)
/// to shared content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentReference {
    pub id: AttachmentReferenceId,
    pub content: AttachmentContentId,
    /// File name shown to users
    pub name: String,
    pub audit: AuditStamp,
}
