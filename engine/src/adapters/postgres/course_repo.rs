//! PostgreSQL adapter for CourseRepository
//!
//! Reads a course aggregate table by table and writes duplicates inside a
//! single `DatabaseTransaction`. Actable subtype fields are stored as JSON
//! next to their type tag.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{
    Achievement, AchievementId, Assessment, AssessmentId, AttachmentContentId,
    AttachmentReference, AttachmentReferenceId, AuditStamp, Condition, ConditionId,
    ConditionTarget, Conditional, Course, CourseAggregate, CourseId, Event, EventId, EventType,
    FolderOwner, Forum, ForumId, LessonPlanActable, LessonPlanItem, LessonPlanItemId, Level,
    LevelId, Material, MaterialFolder, MaterialFolderId, MaterialId, Milestone, MilestoneId,
    MultipleResponseQuestion, ProgrammingQuestion, Question, QuestionActable, QuestionId, Skill,
    SkillBranch, SkillBranchId, SkillId, TextResponseQuestion, UserId,
};
use crate::domain::ports::{CourseRepository, CourseTransaction};
use crate::entity::{
    achievements, attachment_references, attachments, conditions, courses, forums,
    lesson_plan_items, levels, material_folders, materials, questions, skill_branches, skills,
};
use crate::error::DomainError;

/// Map a SeaORM error onto the port error, keeping constraint violations apart
pub(crate) fn map_db_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => DomainError::AlreadyExists(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => DomainError::Conflict(msg),
        _ => DomainError::Database(e.to_string()),
    }
}

fn utc(at: DateTimeWithTimeZone) -> DateTime<Utc> {
    at.with_timezone(&Utc)
}

fn audit(
    creator_id: Uuid,
    updater_id: Uuid,
    created_at: DateTimeWithTimeZone,
    updated_at: DateTimeWithTimeZone,
) -> AuditStamp {
    AuditStamp {
        creator_id: UserId(creator_id),
        updater_id: UserId(updater_id),
        created_at: utc(created_at),
        updated_at: utc(updated_at),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(value).map_err(|e| DomainError::Internal(e.to_string()))
}

fn from_json<T: for<'de> Deserialize<'de>>(
    value: serde_json::Value,
    what: &str,
) -> Result<T, DomainError> {
    serde_json::from_value(value)
        .map_err(|e| DomainError::Database(format!("malformed {} data: {}", what, e)))
}

// ============================================================================
// Stored actable payloads
// ============================================================================

#[derive(Serialize, Deserialize)]
struct AssessmentData {
    base_exp: i32,
    time_bonus_exp: i32,
    published: bool,
    autograded: bool,
}

#[derive(Serialize, Deserialize)]
struct EventData {
    event_type: EventType,
    location: Option<String>,
}

/// Programming question fields; the package lives in `attachment_reference_id`
#[derive(Serialize, Deserialize)]
struct ProgrammingData {
    language: String,
    memory_limit: Option<i32>,
    time_limit: Option<i32>,
}

fn lesson_plan_actable_data(
    actable: &LessonPlanActable,
) -> Result<(Uuid, serde_json::Value), DomainError> {
    match actable {
        LessonPlanActable::Assessment(a) => Ok((
            a.id.0,
            to_json(&AssessmentData {
                base_exp: a.base_exp,
                time_bonus_exp: a.time_bonus_exp,
                published: a.published,
                autograded: a.autograded,
            })?,
        )),
        LessonPlanActable::Event(e) => Ok((
            e.id.0,
            to_json(&EventData {
                event_type: e.event_type,
                location: e.location.clone(),
            })?,
        )),
        LessonPlanActable::Milestone(m) => Ok((m.id.0, serde_json::json!({}))),
    }
}

fn question_actable_data(
    actable: &QuestionActable,
) -> Result<(serde_json::Value, Option<Uuid>), DomainError> {
    match actable {
        QuestionActable::MultipleResponse(q) => Ok((to_json(q)?, None)),
        QuestionActable::TextResponse(q) => Ok((to_json(q)?, None)),
        QuestionActable::Programming(q) => Ok((
            to_json(&ProgrammingData {
                language: q.language.clone(),
                memory_limit: q.memory_limit,
                time_limit: q.time_limit,
            })?,
            q.attachment.as_ref().map(|a| a.id.0),
        )),
    }
}

// ============================================================================
// Repository
// ============================================================================

/// PostgreSQL implementation of CourseRepository
pub struct PostgresCourseRepository {
    db: DatabaseConnection,
}

impl PostgresCourseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_references(
        &self,
        ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, AttachmentReference>, DomainError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let results = attachment_references::Entity::find()
            .filter(attachment_references::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(results
            .into_iter()
            .map(|m| (m.id, AttachmentReference::from(m)))
            .collect())
    }
}

fn reference(
    refs: &HashMap<Uuid, AttachmentReference>,
    id: Uuid,
) -> Result<AttachmentReference, DomainError> {
    refs.get(&id)
        .cloned()
        .ok_or_else(|| DomainError::NotFound(format!("attachment reference {}", id)))
}

#[async_trait]
impl CourseRepository for PostgresCourseRepository {
    type Transaction = PostgresCourseTransaction;

    async fn find_aggregate(&self, id: &CourseId) -> Result<Option<CourseAggregate>, DomainError> {
        let Some(course) = courses::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let items = lesson_plan_items::Entity::find()
            .filter(lesson_plan_items::Column::CourseId.eq(id.0))
            .order_by_asc(lesson_plan_items::Column::Position)
            .order_by_asc(lesson_plan_items::Column::CreatedAt)
            .order_by_asc(lesson_plan_items::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let assessment_ids: Vec<Uuid> = items
            .iter()
            .filter(|m| m.actable_type == "assessment")
            .map(|m| m.actable_id)
            .collect();

        let question_models = if assessment_ids.is_empty() {
            Vec::new()
        } else {
            questions::Entity::find()
                .filter(questions::Column::AssessmentId.is_in(assessment_ids))
                .order_by_asc(questions::Column::Weight)
                .order_by_asc(questions::Column::CreatedAt)
                .order_by_asc(questions::Column::Id)
                .all(&self.db)
                .await
                .map_err(map_db_err)?
        };

        let achievement_models = achievements::Entity::find()
            .filter(achievements::Column::CourseId.eq(id.0))
            .order_by_asc(achievements::Column::Weight)
            .order_by_asc(achievements::Column::CreatedAt)
            .order_by_asc(achievements::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let condition_models = conditions::Entity::find()
            .filter(conditions::Column::CourseId.eq(id.0))
            .order_by_asc(conditions::Column::CreatedAt)
            .order_by_asc(conditions::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let level_models = levels::Entity::find()
            .filter(levels::Column::CourseId.eq(id.0))
            .order_by_asc(levels::Column::ExperiencePointsThreshold)
            .order_by_asc(levels::Column::CreatedAt)
            .order_by_asc(levels::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let branch_models = skill_branches::Entity::find()
            .filter(skill_branches::Column::CourseId.eq(id.0))
            .order_by_asc(skill_branches::Column::CreatedAt)
            .order_by_asc(skill_branches::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let skill_models = skills::Entity::find()
            .filter(skills::Column::CourseId.eq(id.0))
            .order_by_asc(skills::Column::CreatedAt)
            .order_by_asc(skills::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let folder_models = material_folders::Entity::find()
            .filter(material_folders::Column::CourseId.eq(id.0))
            .order_by_asc(material_folders::Column::CreatedAt)
            .order_by_asc(material_folders::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let folder_ids: Vec<Uuid> = folder_models.iter().map(|m| m.id).collect();
        let material_models = if folder_ids.is_empty() {
            Vec::new()
        } else {
            materials::Entity::find()
                .filter(materials::Column::FolderId.is_in(folder_ids))
                .order_by_asc(materials::Column::CreatedAt)
                .order_by_asc(materials::Column::Id)
                .all(&self.db)
                .await
                .map_err(map_db_err)?
        };

        let forum_models = forums::Entity::find()
            .filter(forums::Column::CourseId.eq(id.0))
            .order_by_asc(forums::Column::CreatedAt)
            .order_by_asc(forums::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let reference_ids = achievement_models
            .iter()
            .filter_map(|m| m.badge_reference_id)
            .chain(question_models.iter().filter_map(|m| m.attachment_reference_id))
            .chain(material_models.iter().map(|m| m.attachment_reference_id))
            .collect();
        let refs = self.load_references(reference_ids).await?;

        let mut aggregate = CourseAggregate::new(course.into());
        aggregate.lesson_plan_items = items
            .into_iter()
            .map(LessonPlanItem::try_from)
            .collect::<Result<_, _>>()?;
        aggregate.questions = question_models
            .into_iter()
            .map(|m| question_from_model(m, &refs))
            .collect::<Result<_, _>>()?;
        aggregate.achievements = achievement_models
            .into_iter()
            .map(|m| achievement_from_model(m, &refs))
            .collect::<Result<_, _>>()?;
        aggregate.conditions = condition_models
            .into_iter()
            .map(Condition::try_from)
            .collect::<Result<_, _>>()?;
        aggregate.levels = level_models.into_iter().map(Level::from).collect();
        aggregate.skill_branches = branch_models.into_iter().map(SkillBranch::from).collect();
        aggregate.skills = skill_models.into_iter().map(Skill::from).collect();
        aggregate.material_folders = folder_models
            .into_iter()
            .map(MaterialFolder::try_from)
            .collect::<Result<_, _>>()?;
        aggregate.materials = material_models
            .into_iter()
            .map(|m| material_from_model(m, &refs))
            .collect::<Result<_, _>>()?;
        aggregate.forums = forum_models.into_iter().map(Forum::from).collect();

        Ok(Some(aggregate))
    }

    async fn begin(&self) -> Result<PostgresCourseTransaction, DomainError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        Ok(PostgresCourseTransaction { txn })
    }
}

// ============================================================================
// Transaction
// ============================================================================

/// Unit of work for one duplication run
///
/// Dropping it without calling `commit` rolls every write back.
pub struct PostgresCourseTransaction {
    txn: DatabaseTransaction,
}

#[async_trait]
impl CourseTransaction for PostgresCourseTransaction {
    async fn insert_course(&mut self, course: &Course) -> Result<(), DomainError> {
        courses::ActiveModel {
            id: Set(course.id.0),
            title: Set(course.title.clone()),
            description: Set(course.description.clone()),
            start_at: Set(course.start_at.fixed_offset()),
            end_at: Set(course.end_at.map(|t| t.fixed_offset())),
            registration_key: Set(course.registration_key.clone()),
            published: Set(course.published),
            enrollable: Set(course.enrollable),
            creator_id: Set(course.audit.creator_id.0),
            updater_id: Set(course.audit.updater_id.0),
            created_at: Set(course.audit.created_at.fixed_offset()),
            updated_at: Set(course.audit.updated_at.fixed_offset()),
        }
        .insert(&self.txn)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    async fn insert_lesson_plan_item(&mut self, item: &LessonPlanItem) -> Result<(), DomainError> {
        let (actable_id, actable_data) = lesson_plan_actable_data(&item.actable)?;

        lesson_plan_items::ActiveModel {
            id: Set(item.id.0),
            course_id: Set(item.course_id.0),
            position: Set(item.position),
            title: Set(item.title.clone()),
            description: Set(item.description.clone()),
            start_at: Set(item.start_at.fixed_offset()),
            bonus_end_at: Set(item.bonus_end_at.map(|t| t.fixed_offset())),
            end_at: Set(item.end_at.map(|t| t.fixed_offset())),
            actable_type: Set(item.actable.actable_type().to_string()),
            actable_id: Set(actable_id),
            actable_data: Set(actable_data),
            creator_id: Set(item.audit.creator_id.0),
            updater_id: Set(item.audit.updater_id.0),
            created_at: Set(item.audit.created_at.fixed_offset()),
            updated_at: Set(item.audit.updated_at.fixed_offset()),
        }
        .insert(&self.txn)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    async fn insert_question(&mut self, question: &Question) -> Result<(), DomainError> {
        let (actable_data, attachment_reference_id) = question_actable_data(&question.actable)?;

        questions::ActiveModel {
            id: Set(question.id.0),
            assessment_id: Set(question.assessment_id.0),
            title: Set(question.title.clone()),
            description: Set(question.description.clone()),
            staff_only_comments: Set(question.staff_only_comments),
            maximum_grade: Set(question.maximum_grade),
            weight: Set(question.weight),
            actable_type: Set(question.actable.actable_type().to_string()),
            actable_data: Set(actable_data),
            attachment_reference_id: Set(attachment_reference_id),
            creator_id: Set(question.audit.creator_id.0),
            updater_id: Set(question.audit.updater_id.0),
            created_at: Set(question.audit.created_at.fixed_offset()),
            updated_at: Set(question.audit.updated_at.fixed_offset()),
        }
        .insert(&self.txn)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    async fn insert_achievement(&mut self, achievement: &Achievement) -> Result<(), DomainError> {
        achievements::ActiveModel {
            id: Set(achievement.id.0),
            course_id: Set(achievement.course_id.0),
            title: Set(achievement.title.clone()),
            description: Set(achievement.description.clone()),
            weight: Set(achievement.weight),
            published: Set(achievement.published),
            badge_reference_id: Set(achievement.badge.as_ref().map(|b| b.id.0)),
            creator_id: Set(achievement.audit.creator_id.0),
            updater_id: Set(achievement.audit.updater_id.0),
            created_at: Set(achievement.audit.created_at.fixed_offset()),
            updated_at: Set(achievement.audit.updated_at.fixed_offset()),
        }
        .insert(&self.txn)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    async fn insert_condition(&mut self, condition: &Condition) -> Result<(), DomainError> {
        let (conditional_type, conditional_id) = match condition.conditional {
            Conditional::Achievement(id) => ("achievement", id.0),
            Conditional::Assessment(id) => ("assessment", id.0),
        };
        let minimum_grade_percentage = match condition.target {
            ConditionTarget::Assessment {
                minimum_grade_percentage,
                ..
            } => minimum_grade_percentage,
            _ => None,
        };

        conditions::ActiveModel {
            id: Set(condition.id.0),
            course_id: Set(condition.course_id.0),
            conditional_type: Set(conditional_type.to_string()),
            conditional_id: Set(conditional_id),
            actable_type: Set(condition.target.actable_type().to_string()),
            target_id: Set(condition.target.entity_ref().id),
            minimum_grade_percentage: Set(minimum_grade_percentage),
            creator_id: Set(condition.audit.creator_id.0),
            updater_id: Set(condition.audit.updater_id.0),
            created_at: Set(condition.audit.created_at.fixed_offset()),
            updated_at: Set(condition.audit.updated_at.fixed_offset()),
        }
        .insert(&self.txn)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    async fn insert_level(&mut self, level: &Level) -> Result<(), DomainError> {
        levels::ActiveModel {
            id: Set(level.id.0),
            course_id: Set(level.course_id.0),
            experience_points_threshold: Set(level.experience_points_threshold),
            creator_id: Set(level.audit.creator_id.0),
            updater_id: Set(level.audit.updater_id.0),
            created_at: Set(level.audit.created_at.fixed_offset()),
            updated_at: Set(level.audit.updated_at.fixed_offset()),
        }
        .insert(&self.txn)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    async fn insert_skill_branch(&mut self, branch: &SkillBranch) -> Result<(), DomainError> {
        skill_branches::ActiveModel {
            id: Set(branch.id.0),
            course_id: Set(branch.course_id.0),
            title: Set(branch.title.clone()),
            description: Set(branch.description.clone()),
            creator_id: Set(branch.audit.creator_id.0),
            updater_id: Set(branch.audit.updater_id.0),
            created_at: Set(branch.audit.created_at.fixed_offset()),
            updated_at: Set(branch.audit.updated_at.fixed_offset()),
        }
        .insert(&self.txn)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    async fn insert_skill(&mut self, skill: &Skill) -> Result<(), DomainError> {
        skills::ActiveModel {
            id: Set(skill.id.0),
            course_id: Set(skill.course_id.0),
            skill_branch_id: Set(skill.branch_id.map(|b| b.0)),
            title: Set(skill.title.clone()),
            description: Set(skill.description.clone()),
            creator_id: Set(skill.audit.creator_id.0),
            updater_id: Set(skill.audit.updater_id.0),
            created_at: Set(skill.audit.created_at.fixed_offset()),
            updated_at: Set(skill.audit.updated_at.fixed_offset()),
        }
        .insert(&self.txn)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    async fn insert_material_folder(&mut self, folder: &MaterialFolder) -> Result<(), DomainError> {
        let (owner_type, owner_id) = match folder.owner {
            Some(FolderOwner::Assessment(id)) => (Some("assessment".to_string()), Some(id.0)),
            None => (None, None),
        };

        material_folders::ActiveModel {
            id: Set(folder.id.0),
            course_id: Set(folder.course_id.0),
            parent_id: Set(folder.parent_id.map(|p| p.0)),
            owner_type: Set(owner_type),
            owner_id: Set(owner_id),
            name: Set(folder.name.clone()),
            description: Set(folder.description.clone()),
            can_student_upload: Set(folder.can_student_upload),
            start_at: Set(folder.start_at.fixed_offset()),
            end_at: Set(folder.end_at.map(|t| t.fixed_offset())),
            creator_id: Set(folder.audit.creator_id.0),
            updater_id: Set(folder.audit.updater_id.0),
            created_at: Set(folder.audit.created_at.fixed_offset()),
            updated_at: Set(folder.audit.updated_at.fixed_offset()),
        }
        .insert(&self.txn)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    async fn insert_material(&mut self, material: &Material) -> Result<(), DomainError> {
        materials::ActiveModel {
            id: Set(material.id.0),
            folder_id: Set(material.folder_id.0),
            name: Set(material.name.clone()),
            description: Set(material.description.clone()),
            attachment_reference_id: Set(material.attachment.id.0),
            creator_id: Set(material.audit.creator_id.0),
            updater_id: Set(material.audit.updater_id.0),
            created_at: Set(material.audit.created_at.fixed_offset()),
            updated_at: Set(material.audit.updated_at.fixed_offset()),
        }
        .insert(&self.txn)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    async fn insert_forum(&mut self, forum: &Forum) -> Result<(), DomainError> {
        forums::ActiveModel {
            id: Set(forum.id.0),
            course_id: Set(forum.course_id.0),
            name: Set(forum.name.clone()),
            slug: Set(forum.slug.clone()),
            description: Set(forum.description.clone()),
            creator_id: Set(forum.audit.creator_id.0),
            updater_id: Set(forum.audit.updater_id.0),
            created_at: Set(forum.audit.created_at.fixed_offset()),
            updated_at: Set(forum.audit.updated_at.fixed_offset()),
        }
        .insert(&self.txn)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    async fn attachment_content_exists(
        &mut self,
        content: &AttachmentContentId,
    ) -> Result<bool, DomainError> {
        let found = attachments::Entity::find_by_id(content.0.clone())
            .one(&self.txn)
            .await
            .map_err(map_db_err)?;

        Ok(found.is_some())
    }

    async fn insert_attachment_reference(
        &mut self,
        reference: &AttachmentReference,
    ) -> Result<(), DomainError> {
        attachment_references::ActiveModel {
            id: Set(reference.id.0),
            attachment_name: Set(reference.content.0.clone()),
            name: Set(reference.name.clone()),
            creator_id: Set(reference.audit.creator_id.0),
            updater_id: Set(reference.audit.updater_id.0),
            created_at: Set(reference.audit.created_at.fixed_offset()),
            updated_at: Set(reference.audit.updated_at.fixed_offset()),
        }
        .insert(&self.txn)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    async fn commit(self) -> Result<(), DomainError> {
        self.txn.commit().await.map_err(map_db_err)
    }

    async fn rollback(self) -> Result<(), DomainError> {
        self.txn.rollback().await.map_err(map_db_err)
    }
}

// ============================================================================
// Model conversions
// ============================================================================

impl From<courses::Model> for Course {
    fn from(model: courses::Model) -> Self {
        Course {
            id: CourseId(model.id),
            title: model.title,
            description: model.description,
            start_at: utc(model.start_at),
            end_at: model.end_at.map(utc),
            registration_key: model.registration_key,
            published: model.published,
            enrollable: model.enrollable,
            audit: audit(
                model.creator_id,
                model.updater_id,
                model.created_at,
                model.updated_at,
            ),
        }
    }
}

impl From<attachment_references::Model> for AttachmentReference {
    fn from(model: attachment_references::Model) -> Self {
        AttachmentReference {
            id: AttachmentReferenceId(model.id),
            content: AttachmentContentId(model.attachment_name),
            name: model.name,
            audit: audit(
                model.creator_id,
                model.updater_id,
                model.created_at,
                model.updated_at,
            ),
        }
    }
}

impl TryFrom<lesson_plan_items::Model> for LessonPlanItem {
    type Error = DomainError;

    fn try_from(model: lesson_plan_items::Model) -> Result<Self, Self::Error> {
        let actable = match model.actable_type.as_str() {
            "assessment" => {
                let data: AssessmentData = from_json(model.actable_data, "assessment")?;
                LessonPlanActable::Assessment(Assessment {
                    id: AssessmentId(model.actable_id),
                    base_exp: data.base_exp,
                    time_bonus_exp: data.time_bonus_exp,
                    published: data.published,
                    autograded: data.autograded,
                })
            }
            "event" => {
                let data: EventData = from_json(model.actable_data, "event")?;
                LessonPlanActable::Event(Event {
                    id: EventId(model.actable_id),
                    event_type: data.event_type,
                    location: data.location,
                })
            }
            "milestone" => LessonPlanActable::Milestone(Milestone {
                id: MilestoneId(model.actable_id),
            }),
            other => {
                return Err(DomainError::Database(format!(
                    "unknown lesson plan actable type: {}",
                    other
                )))
            }
        };

        Ok(LessonPlanItem {
            id: LessonPlanItemId(model.id),
            course_id: CourseId(model.course_id),
            position: model.position,
            title: model.title,
            description: model.description,
            start_at: utc(model.start_at),
            bonus_end_at: model.bonus_end_at.map(utc),
            end_at: model.end_at.map(utc),
            actable,
            audit: audit(
                model.creator_id,
                model.updater_id,
                model.created_at,
                model.updated_at,
            ),
        })
    }
}

fn question_from_model(
    model: questions::Model,
    refs: &HashMap<Uuid, AttachmentReference>,
) -> Result<Question, DomainError> {
    let actable = match model.actable_type.as_str() {
        "multiple_response" => {
            let data: MultipleResponseQuestion =
                from_json(model.actable_data, "multiple response")?;
            QuestionActable::MultipleResponse(data)
        }
        "text_response" => {
            let data: TextResponseQuestion = from_json(model.actable_data, "text response")?;
            QuestionActable::TextResponse(data)
        }
        "programming" => {
            let data: ProgrammingData = from_json(model.actable_data, "programming")?;
            let attachment = model
                .attachment_reference_id
                .map(|id| reference(refs, id))
                .transpose()?;
            QuestionActable::Programming(ProgrammingQuestion {
                language: data.language,
                memory_limit: data.memory_limit,
                time_limit: data.time_limit,
                attachment,
            })
        }
        other => {
            return Err(DomainError::Database(format!(
                "unknown question actable type: {}",
                other
            )))
        }
    };

    Ok(Question {
        id: QuestionId(model.id),
        assessment_id: AssessmentId(model.assessment_id),
        title: model.title,
        description: model.description,
        staff_only_comments: model.staff_only_comments,
        maximum_grade: model.maximum_grade,
        weight: model.weight,
        actable,
        audit: audit(
            model.creator_id,
            model.updater_id,
            model.created_at,
            model.updated_at,
        ),
    })
}

fn achievement_from_model(
    model: achievements::Model,
    refs: &HashMap<Uuid, AttachmentReference>,
) -> Result<Achievement, DomainError> {
    Ok(Achievement {
        id: AchievementId(model.id),
        course_id: CourseId(model.course_id),
        title: model.title,
        description: model.description,
        weight: model.weight,
        published: model.published,
        badge: model
            .badge_reference_id
            .map(|id| reference(refs, id))
            .transpose()?,
        audit: audit(
            model.creator_id,
            model.updater_id,
            model.created_at,
            model.updated_at,
        ),
    })
}

impl TryFrom<conditions::Model> for Condition {
    type Error = DomainError;

    fn try_from(model: conditions::Model) -> Result<Self, Self::Error> {
        let conditional = match model.conditional_type.as_str() {
            "achievement" => Conditional::Achievement(AchievementId(model.conditional_id)),
            "assessment" => Conditional::Assessment(AssessmentId(model.conditional_id)),
            other => {
                return Err(DomainError::Database(format!(
                    "unknown conditional type: {}",
                    other
                )))
            }
        };
        let target = match model.actable_type.as_str() {
            "achievement" => ConditionTarget::Achievement {
                achievement_id: AchievementId(model.target_id),
            },
            "assessment" => ConditionTarget::Assessment {
                assessment_id: AssessmentId(model.target_id),
                minimum_grade_percentage: model.minimum_grade_percentage,
            },
            "level" => ConditionTarget::Level {
                level_id: LevelId(model.target_id),
            },
            other => {
                return Err(DomainError::Database(format!(
                    "unknown condition type: {}",
                    other
                )))
            }
        };

        Ok(Condition {
            id: ConditionId(model.id),
            course_id: CourseId(model.course_id),
            conditional,
            target,
            audit: audit(
                model.creator_id,
                model.updater_id,
                model.created_at,
                model.updated_at,
            ),
        })
    }
}

impl From<levels::Model> for Level {
    fn from(model: levels::Model) -> Self {
        Level {
            id: LevelId(model.id),
            course_id: CourseId(model.course_id),
            experience_points_threshold: model.experience_points_threshold,
            audit: audit(
                model.creator_id,
                model.updater_id,
                model.created_at,
                model.updated_at,
            ),
        }
    }
}

impl From<skill_branches::Model> for SkillBranch {
    fn from(model: skill_branches::Model) -> Self {
        SkillBranch {
            id: SkillBranchId(model.id),
            course_id: CourseId(model.course_id),
            title: model.title,
            description: model.description,
            audit: audit(
                model.creator_id,
                model.updater_id,
                model.created_at,
                model.updated_at,
            ),
        }
    }
}

impl From<skills::Model> for Skill {
    fn from(model: skills::Model) -> Self {
        Skill {
            id: SkillId(model.id),
            course_id: CourseId(model.course_id),
            branch_id: model.skill_branch_id.map(SkillBranchId),
            title: model.title,
            description: model.description,
            audit: audit(
                model.creator_id,
                model.updater_id,
                model.created_at,
                model.updated_at,
            ),
        }
    }
}

impl TryFrom<material_folders::Model> for MaterialFolder {
    type Error = DomainError;

    fn try_from(model: material_folders::Model) -> Result<Self, Self::Error> {
        let owner = match (model.owner_type.as_deref(), model.owner_id) {
            (Some("assessment"), Some(id)) => Some(FolderOwner::Assessment(AssessmentId(id))),
            (None, None) => None,
            (owner_type, _) => {
                return Err(DomainError::Database(format!(
                    "invalid owner {:?} on folder {}",
                    owner_type, model.id
                )))
            }
        };

        Ok(MaterialFolder {
            id: MaterialFolderId(model.id),
            course_id: CourseId(model.course_id),
            parent_id: model.parent_id.map(MaterialFolderId),
            owner,
            name: model.name,
            description: model.description,
            can_student_upload: model.can_student_upload,
            start_at: utc(model.start_at),
            end_at: model.end_at.map(utc),
            audit: audit(
                model.creator_id,
                model.updater_id,
                model.created_at,
                model.updated_at,
            ),
        })
    }
}

fn material_from_model(
    model: materials::Model,
    refs: &HashMap<Uuid, AttachmentReference>,
) -> Result<Material, DomainError> {
    Ok(Material {
        id: MaterialId(model.id),
        folder_id: MaterialFolderId(model.folder_id),
        name: model.name,
        description: model.description,
        attachment: reference(refs, model.attachment_reference_id)?,
        audit: audit(
            model.creator_id,
            model.updater_id,
            model.created_at,
            model.updated_at,
        ),
    })
}

impl From<forums::Model> for Forum {
    fn from(model: forums::Model) -> Self {
        Forum {
            id: ForumId(model.id),
            course_id: CourseId(model.course_id),
            name: model.name,
            slug: model.slug,
            description: model.description,
            audit: audit(
                model.creator_id,
                model.updater_id,
                model.created_at,
                model.updated_at,
            ),
        }
    }
}
