//! Material folder and material duplication
//!
//! Folders are duplicated parent-before-child: each pass duplicates every
//! folder whose parent already has a duplicate, starting from the roots.
//! A pass that makes no progress means some folders hang off a parent the
//! aggregate does not contain. Folder and material audit stamps follow the
//! audit policy (kept verbatim by default).

use std::collections::HashSet;

use async_trait::async_trait;

use crate::app::duplication::attachment::duplicate_reference;
use crate::app::duplication::context::DuplicationContext;
use crate::domain::entities::{
    CourseAggregate, EntityId, EntityKind, FolderOwner, Material, MaterialFolder,
    MaterialFolderId, MaterialId,
};
use crate::domain::ports::CourseTransaction;
use crate::error::DuplicationError;

use super::FamilyDuplicator;

pub struct MaterialDuplicator;

#[async_trait]
impl<T: CourseTransaction> FamilyDuplicator<T> for MaterialDuplicator {
    fn name(&self) -> &'static str {
        "materials"
    }

    fn requires(&self) -> &'static [EntityKind] {
        &[EntityKind::Course, EntityKind::Assessment]
    }

    fn produces(&self) -> &'static [EntityKind] {
        &[EntityKind::MaterialFolder, EntityKind::Material]
    }

    async fn duplicate(
        &self,
        source: &CourseAggregate,
        ctx: &mut DuplicationContext,
        tx: &mut T,
        target: &mut CourseAggregate,
    ) -> Result<(), DuplicationError> {
        check_material_folders(source)?;

        let mut pending: Vec<&MaterialFolder> = source.material_folders.iter().collect();

        while !pending.is_empty() {
            let (ready, blocked): (Vec<&MaterialFolder>, Vec<&MaterialFolder>) =
                pending.into_iter().partition(|folder| match folder.parent_id {
                    None => true,
                    Some(parent_id) => ctx.identities.get(parent_id).is_some(),
                });

            if ready.is_empty() {
                return Err(orphaned(&blocked));
            }

            for folder in ready {
                let duplicate = duplicate_folder(folder, ctx)?;
                tx.insert_material_folder(&duplicate).await?;
                ctx.identities.put(folder.id, duplicate.id)?;

                for material in source.materials_in(folder.id) {
                    let copy = duplicate_material(material, duplicate.id, ctx, tx).await?;
                    target.materials.push(copy);
                }

                target.material_folders.push(duplicate);
            }

            pending = blocked;
        }

        tracing::debug!(
            folders = target.material_folders.len(),
            materials = target.materials.len(),
            "Duplicated material tree"
        );

        Ok(())
    }
}

/// Every material must sit in a folder of the aggregate
fn check_material_folders(source: &CourseAggregate) -> Result<(), DuplicationError> {
    let folders: HashSet<MaterialFolderId> =
        source.material_folders.iter().map(|f| f.id).collect();

    match source
        .materials
        .iter()
        .find(|m| !folders.contains(&m.folder_id))
    {
        Some(stray) => Err(DuplicationError::UnresolvedDependency {
            dependent: stray.id.entity_ref(),
            missing: stray.folder_id.entity_ref(),
        }),
        None => Ok(()),
    }
}

/// Error for folders whose parent chain never reaches a duplicated folder
fn orphaned(blocked: &[&MaterialFolder]) -> DuplicationError {
    match blocked.iter().find_map(|f| f.parent_id.map(|p| (f.id, p))) {
        Some((folder_id, parent_id)) => DuplicationError::UnresolvedDependency {
            dependent: folder_id.entity_ref(),
            missing: parent_id.entity_ref(),
        },
        None => DuplicationError::Internal("folder tree made no progress".to_string()),
    }
}

fn duplicate_folder(
    folder: &MaterialFolder,
    ctx: &DuplicationContext,
) -> Result<MaterialFolder, DuplicationError> {
    let dependent = folder.id.entity_ref();
    let parent_id = folder
        .parent_id
        .map(|parent_id| ctx.identities.require(dependent, parent_id))
        .transpose()?;
    let owner = match folder.owner {
        Some(FolderOwner::Assessment(assessment_id)) => Some(FolderOwner::Assessment(
            ctx.identities.require(dependent, assessment_id)?,
        )),
        None => None,
    };
    let (start_at, end_at) =
        ctx.shift_window(EntityKind::MaterialFolder, folder.id.0, folder.start_at, folder.end_at)?;

    Ok(MaterialFolder {
        id: MaterialFolderId::new(),
        course_id: ctx.new_course_id,
        parent_id,
        owner,
        name: folder.name.clone(),
        description: folder.description.clone(),
        can_student_upload: folder.can_student_upload,
        start_at,
        end_at,
        audit: ctx.stamp(EntityKind::MaterialFolder, &folder.audit),
    })
}

async fn duplicate_material<T: CourseTransaction>(
    material: &Material,
    folder_id: MaterialFolderId,
    ctx: &mut DuplicationContext,
    tx: &mut T,
) -> Result<Material, DuplicationError> {
    let attachment = duplicate_reference(&material.attachment, ctx, tx).await?;

    let duplicate = Material {
        id: MaterialId::new(),
        folder_id,
        name: material.name.clone(),
        description: material.description.clone(),
        attachment,
        audit: ctx.stamp(EntityKind::Material, &material.audit),
    };

    tx.insert_material(&duplicate).await?;
    ctx.identities.put(material.id, duplicate.id)?;

    Ok(duplicate)
}
