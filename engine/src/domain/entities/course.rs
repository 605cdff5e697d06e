//! Course domain entity and the course aggregate
//!
//! The aggregate is the flat, row-shaped view of everything a course owns.
//! Children point at their parents by id, the way they are stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::achievement::Achievement;
use super::attachment::AttachmentReference;
use super::audit::AuditStamp;
use super::condition::Condition;
use super::forum::Forum;
use super::ids::{AssessmentId, CourseId, MaterialFolderId};
use super::lesson_plan::{Assessment, LessonPlanItem};
use super::level::Level;
use super::material::{Material, MaterialFolder};
use super::question::{Question, QuestionActable};
use super::skill::{Skill, SkillBranch};

/// A course: the root of the aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    /// Key students use to self-enrol
    pub registration_key: Option<String>,
    pub published: bool,
    pub enrollable: bool,
    pub audit: AuditStamp,
}

/// A course together with every entity it transitively owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseAggregate {
    pub course: Course,
    /// Ordered by position
    pub lesson_plan_items: Vec<LessonPlanItem>,
    /// Ordered by assessment, then weight
    pub questions: Vec<Question>,
    pub achievements: Vec<Achievement>,
    pub conditions: Vec<Condition>,
    pub levels: Vec<Level>,
    pub skill_branches: Vec<SkillBranch>,
    pub skills: Vec<Skill>,
    pub material_folders: Vec<MaterialFolder>,
    pub materials: Vec<Material>,
    pub forums: Vec<Forum>,
}

impl CourseAggregate {
    /// An aggregate holding only its root
    pub fn new(course: Course) -> Self {
        Self {
            course,
            lesson_plan_items: Vec::new(),
            questions: Vec::new(),
            achievements: Vec::new(),
            conditions: Vec::new(),
            levels: Vec::new(),
            skill_branches: Vec::new(),
            skills: Vec::new(),
            material_folders: Vec::new(),
            materials: Vec::new(),
            forums: Vec::new(),
        }
    }

    pub fn id(&self) -> CourseId {
        self.course.id
    }

    /// Assessments in lesson plan order, with their wrapping items
    pub fn assessments(&self) -> impl Iterator<Item = (&LessonPlanItem, &Assessment)> {
        self.lesson_plan_items
            .iter()
            .filter_map(|item| item.assessment().map(|assessment| (item, assessment)))
    }

    pub fn questions_of(&self, assessment_id: AssessmentId) -> impl Iterator<Item = &Question> {
        self.questions
            .iter()
            .filter(move |q| q.assessment_id == assessment_id)
    }

    pub fn materials_in(&self, folder_id: MaterialFolderId) -> impl Iterator<Item = &Material> {
        self.materials
            .iter()
            .filter(move |m| m.folder_id == folder_id)
    }

    /// Every attachment reference held by any entity of the aggregate
    pub fn attachment_references(&self) -> Vec<&AttachmentReference> {
        let badges = self.achievements.iter().filter_map(|a| a.badge.as_ref());
        let packages = self.questions.iter().filter_map(|q| match &q.actable {
            QuestionActable::Programming(programming) => programming.attachment.as_ref(),
            _ => None,
        });
        let files = self.materials.iter().map(|m| &m.attachment);

        badges.chain(packages).chain(files).collect()
    }
}
