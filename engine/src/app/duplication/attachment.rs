//! Attachment reference duplicator
//!
//! Creates a new reference row pointing at the same shared content. The
//! content itself is never read or copied. A reference row shared by
//! several owners is duplicated once and the duplicate is shared the same
//! way.

use crate::domain::entities::{AttachmentReference, AttachmentReferenceId, EntityKind};
use crate::domain::ports::CourseTransaction;
use crate::error::{DomainError, DuplicationError};

use super::context::DuplicationContext;

pub async fn duplicate_reference<T: CourseTransaction>(
    original: &AttachmentReference,
    ctx: &mut DuplicationContext,
    tx: &mut T,
) -> Result<AttachmentReference, DuplicationError> {
    if let Some(id) = ctx.identities.get(original.id) {
        return Ok(reference_copy(original, id, ctx));
    }

    if !tx.attachment_content_exists(&original.content).await? {
        return Err(DuplicationError::AttachmentReferenceFailure {
            content: original.content.to_string(),
            reason: "content not found in attachment store".to_string(),
        });
    }

    let duplicate = reference_copy(original, AttachmentReferenceId::new(), ctx);

    tx.insert_attachment_reference(&duplicate)
        .await
        .map_err(|e| match e {
            DomainError::Conflict(reason) | DomainError::NotFound(reason) => {
                DuplicationError::AttachmentReferenceFailure {
                    content: original.content.to_string(),
                    reason,
                }
            }
            other => other.into(),
        })?;
    ctx.identities.put(original.id, duplicate.id)?;

    tracing::debug!(
        original = %original.id,
        duplicate = %duplicate.id,
        content = %duplicate.content,
        "Duplicated attachment reference"
    );

    Ok(duplicate)
}

fn reference_copy(
    original: &AttachmentReference,
    id: AttachmentReferenceId,
    ctx: &DuplicationContext,
) -> AttachmentReference {
    AttachmentReference {
        id,
        content: original.content.clone(),
        name: original.name.clone(),
        audit: ctx.stamp(EntityKind::AttachmentReference, &original.audit),
    }
}
