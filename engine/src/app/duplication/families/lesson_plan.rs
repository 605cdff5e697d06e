//! Lesson plan duplication
//!
//! For every item the subtype (assessment, event, milestone) is duplicated
//! first and then wrapped in a new item bound to the new course. Items keep
//! their positions, so sibling order survives. An assessment's questions
//! follow it in their original order.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::app::duplication::attachment::duplicate_reference;
use crate::app::duplication::context::DuplicationContext;
use crate::domain::entities::{
    Assessment, AssessmentId, CourseAggregate, EntityId, EntityKind, Event, EventId,
    LessonPlanActable, LessonPlanItem, LessonPlanItemId, Milestone, MilestoneId,
    ProgrammingQuestion, Question, QuestionActable, QuestionId,
};
use crate::domain::ports::CourseTransaction;
use crate::error::DuplicationError;

use super::FamilyDuplicator;

pub struct LessonPlanDuplicator;

#[async_trait]
impl<T: CourseTransaction> FamilyDuplicator<T> for LessonPlanDuplicator {
    fn name(&self) -> &'static str {
        "lesson_plan"
    }

    fn requires(&self) -> &'static [EntityKind] {
        &[EntityKind::Course]
    }

    fn produces(&self) -> &'static [EntityKind] {
        &[
            EntityKind::LessonPlanItem,
            EntityKind::Assessment,
            EntityKind::Event,
            EntityKind::Milestone,
            EntityKind::Question,
        ]
    }

    async fn duplicate(
        &self,
        source: &CourseAggregate,
        ctx: &mut DuplicationContext,
        tx: &mut T,
        target: &mut CourseAggregate,
    ) -> Result<(), DuplicationError> {
        check_question_owners(source)?;

        for item in &source.lesson_plan_items {
            let duplicate = duplicate_item(item, ctx)?;
            tx.insert_lesson_plan_item(&duplicate).await?;
            register_actable(&item.actable, &duplicate.actable, ctx)?;
            ctx.identities.put(item.id, duplicate.id)?;

            if let (Some(original), Some(assessment)) = (item.assessment(), duplicate.assessment())
            {
                for question in source.questions_of(original.id) {
                    let copy = duplicate_question(question, assessment.id, ctx, tx).await?;
                    target.questions.push(copy);
                }
            }

            target.lesson_plan_items.push(duplicate);
        }

        Ok(())
    }
}

/// Every question must belong to an assessment of the aggregate
fn check_question_owners(source: &CourseAggregate) -> Result<(), DuplicationError> {
    let assessments: HashSet<AssessmentId> = source.assessments().map(|(_, a)| a.id).collect();

    match source
        .questions
        .iter()
        .find(|q| !assessments.contains(&q.assessment_id))
    {
        Some(stray) => Err(DuplicationError::UnresolvedDependency {
            dependent: stray.id.entity_ref(),
            missing: stray.assessment_id.entity_ref(),
        }),
        None => Ok(()),
    }
}

fn duplicate_actable(actable: &LessonPlanActable) -> LessonPlanActable {
    match actable {
        LessonPlanActable::Assessment(assessment) => LessonPlanActable::Assessment(Assessment {
            id: AssessmentId::new(),
            ..assessment.clone()
        }),
        LessonPlanActable::Event(event) => LessonPlanActable::Event(Event {
            id: EventId::new(),
            ..event.clone()
        }),
        LessonPlanActable::Milestone(_) => LessonPlanActable::Milestone(Milestone {
            id: MilestoneId::new(),
        }),
    }
}

fn register_actable(
    original: &LessonPlanActable,
    duplicate: &LessonPlanActable,
    ctx: &mut DuplicationContext,
) -> Result<(), DuplicationError> {
    match (original, duplicate) {
        (LessonPlanActable::Assessment(a), LessonPlanActable::Assessment(b)) => {
            ctx.identities.put(a.id, b.id)
        }
        (LessonPlanActable::Event(a), LessonPlanActable::Event(b)) => {
            ctx.identities.put(a.id, b.id)
        }
        (LessonPlanActable::Milestone(a), LessonPlanActable::Milestone(b)) => {
            ctx.identities.put(a.id, b.id)
        }
        _ => Err(DuplicationError::Internal(format!(
            "actable type changed from {} to {} during duplication",
            original.actable_type(),
            duplicate.actable_type()
        ))),
    }
}

fn duplicate_item(
    item: &LessonPlanItem,
    ctx: &DuplicationContext,
) -> Result<LessonPlanItem, DuplicationError> {
    let kind = EntityKind::LessonPlanItem;
    let (start_at, end_at) = ctx.shift_window(kind, item.id.0, item.start_at, item.end_at)?;
    let bonus_end_at = ctx.shift_opt(kind, item.id.0, item.bonus_end_at)?;

    if let Some(bonus_end_at) = bonus_end_at {
        if bonus_end_at < start_at {
            return Err(DuplicationError::validation(
                kind,
                item.id.0,
                format!("bonus end {} is before start {}", bonus_end_at, start_at),
            ));
        }
    }

    Ok(LessonPlanItem {
        id: LessonPlanItemId::new(),
        course_id: ctx.new_course_id,
        position: item.position,
        title: item.title.clone(),
        description: item.description.clone(),
        start_at,
        bonus_end_at,
        end_at,
        actable: duplicate_actable(&item.actable),
        audit: ctx.stamp(kind, &item.audit),
    })
}

async fn duplicate_question<T: CourseTransaction>(
    question: &Question,
    assessment_id: AssessmentId,
    ctx: &mut DuplicationContext,
    tx: &mut T,
) -> Result<Question, DuplicationError> {
    let actable = match &question.actable {
        QuestionActable::Programming(programming) => {
            let attachment = match &programming.attachment {
                Some(reference) => Some(duplicate_reference(reference, ctx, tx).await?),
                None => None,
            };
            QuestionActable::Programming(ProgrammingQuestion {
                attachment,
                ..programming.clone()
            })
        }
        other => other.clone(),
    };

    let duplicate = Question {
        id: QuestionId::new(),
        assessment_id,
        title: question.title.clone(),
        description: question.description.clone(),
        staff_only_comments: question.staff_only_comments,
        maximum_grade: question.maximum_grade,
        weight: question.weight,
        actable,
        audit: ctx.stamp(EntityKind::Question, &question.audit),
    };

    tx.insert_question(&duplicate).await?;
    ctx.identities.put(question.id, duplicate.id)?;

    tracing::trace!(
        question = %question.id.entity_ref(),
        actable_type = duplicate.actable.actable_type(),
        "Duplicated question"
    );

    Ok(duplicate)
}
