//! Course root duplication
//!
//! The root is written first so every child has a course to point at. The
//! registration key is never carried over.

use crate::domain::entities::{Course, CourseAggregate, EntityKind};
use crate::domain::ports::CourseTransaction;
use crate::error::DuplicationError;

use crate::app::duplication::context::DuplicationContext;
use crate::app::duplication::DuplicateCourseParams;

pub async fn duplicate_root<T: CourseTransaction>(
    source: &CourseAggregate,
    params: &DuplicateCourseParams,
    ctx: &mut DuplicationContext,
    tx: &mut T,
) -> Result<Course, DuplicationError> {
    let original = &source.course;

    if params.new_title.trim().is_empty() {
        return Err(DuplicationError::validation(
            EntityKind::Course,
            original.id.0,
            "new course title must not be blank",
        ));
    }

    let (start_at, end_at) =
        ctx.shift_window(EntityKind::Course, original.id.0, original.start_at, original.end_at)?;

    let course = Course {
        id: ctx.new_course_id,
        title: params.new_title.clone(),
        description: original.description.clone(),
        start_at,
        end_at,
        registration_key: None,
        published: original.published,
        enrollable: original.enrollable,
        audit: ctx.stamp(EntityKind::Course, &original.audit),
    };

    tx.insert_course(&course).await?;
    ctx.identities.put(original.id, course.id)?;

    tracing::debug!(original = %original.id, duplicate = %course.id, "Created course root");

    Ok(course)
}
