//! Mock implementations of port traits
//!
//! In-memory course store with transactional writes. A transaction stages
//! its inserts and only applies them on commit, so dropping or rolling it
//! back leaves the store untouched. Forum slugs and level thresholds are
//! unique per course, and a foreign key miss is reported as a conflict, the
//! way the PostgreSQL schema behaves.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    Achievement, AssessmentId, AttachmentContentId, AttachmentReference, AttachmentReferenceId,
    Condition, Course, CourseAggregate, CourseId, EntityKind, Forum, LessonPlanItem, Level,
    Material, MaterialFolder, MaterialFolderId, ProgrammingQuestion, Question, QuestionActable,
    Skill, SkillBranch,
};
use crate::domain::ports::{CourseRepository, CourseTransaction};
use crate::error::DomainError;

// ============================================================================
// In-Memory Course Repository
// ============================================================================

#[derive(Default)]
struct Store {
    courses: HashMap<CourseId, CourseAggregate>,
    contents: HashSet<AttachmentContentId>,
    references: HashMap<AttachmentReferenceId, AttachmentReference>,
}

impl Store {
    fn register_references(&mut self, aggregate: &CourseAggregate) {
        for reference in aggregate.attachment_references() {
            self.references.insert(reference.id, reference.clone());
        }
    }
}

/// Insert failure injected for atomicity tests
#[derive(Debug, Clone, Copy)]
struct InjectedFailure {
    kind: EntityKind,
    /// 1-based index of the failing insert of `kind`
    nth: usize,
}

#[derive(Default)]
pub struct InMemoryCourseRepository {
    store: Arc<RwLock<Store>>,
    failure: Option<InjectedFailure>,
    fail_commit: bool,
    commits: Arc<AtomicUsize>,
    rollbacks: Arc<AtomicUsize>,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a course aggregate for testing
    pub fn with_aggregate(self, aggregate: CourseAggregate) -> Self {
        {
            let mut store = self.store.write().unwrap();
            for reference in aggregate.attachment_references() {
                store.contents.insert(reference.content.clone());
            }
            store.register_references(&aggregate);
            store.courses.insert(aggregate.id(), aggregate);
        }
        self
    }

    /// Store content bytes and return their content id
    pub fn add_attachment_content(&self, bytes: &[u8]) -> AttachmentContentId {
        let content = AttachmentContentId::for_bytes(bytes);
        self.store.write().unwrap().contents.insert(content.clone());
        content
    }

    /// Remove stored content, leaving references to it dangling
    pub fn remove_attachment_content(&self, content: &AttachmentContentId) {
        self.store.write().unwrap().contents.remove(content);
    }

    /// Fail the `nth` insert (1-based) of `kind` in every transaction
    pub fn fail_on_insert(mut self, kind: EntityKind, nth: usize) -> Self {
        self.failure = Some(InjectedFailure { kind, nth });
        self
    }

    /// Make every commit fail without applying its writes
    pub fn fail_on_commit(mut self) -> Self {
        self.fail_commit = true;
        self
    }

    pub fn stored(&self, id: &CourseId) -> Option<CourseAggregate> {
        self.store.read().unwrap().courses.get(id).cloned()
    }

    pub fn course_count(&self) -> usize {
        self.store.read().unwrap().courses.len()
    }

    pub fn attachment_content_count(&self) -> usize {
        self.store.read().unwrap().contents.len()
    }

    pub fn attachment_reference_count(&self) -> usize {
        self.store.read().unwrap().references.len()
    }

    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    type Transaction = InMemoryCourseTransaction;

    async fn find_aggregate(&self, id: &CourseId) -> Result<Option<CourseAggregate>, DomainError> {
        Ok(self.stored(id))
    }

    async fn begin(&self) -> Result<InMemoryCourseTransaction, DomainError> {
        Ok(InMemoryCourseTransaction {
            store: self.store.clone(),
            failure: self.failure,
            fail_commit: self.fail_commit,
            commits: self.commits.clone(),
            rollbacks: self.rollbacks.clone(),
            courses: HashMap::new(),
            references: HashMap::new(),
            inserts: HashMap::new(),
        })
    }
}

// ============================================================================
// In-Memory Course Transaction
// ============================================================================

pub struct InMemoryCourseTransaction {
    store: Arc<RwLock<Store>>,
    failure: Option<InjectedFailure>,
    fail_commit: bool,
    commits: Arc<AtomicUsize>,
    rollbacks: Arc<AtomicUsize>,
    /// Staged rows, grouped by owning course
    courses: HashMap<CourseId, CourseAggregate>,
    references: HashMap<AttachmentReferenceId, AttachmentReference>,
    inserts: HashMap<EntityKind, usize>,
}

impl InMemoryCourseTransaction {
    fn check_injected(&mut self, kind: EntityKind) -> Result<(), DomainError> {
        let count = self.inserts.entry(kind).or_insert(0);
        *count += 1;

        match self.failure {
            Some(failure) if failure.kind == kind && failure.nth == *count => Err(
                DomainError::Conflict(format!("injected failure on {} insert #{}", kind, count)),
            ),
            _ => Ok(()),
        }
    }

    /// Staged view of a course, seeded from the store on first touch
    fn staged(&mut self, course_id: CourseId) -> Result<&mut CourseAggregate, DomainError> {
        if !self.courses.contains_key(&course_id) {
            let store = self.store.read().unwrap();
            let course = store
                .courses
                .get(&course_id)
                .map(|agg| agg.course.clone())
                .ok_or_else(|| {
                    DomainError::Conflict(format!("course {} does not exist", course_id))
                })?;
            drop(store);
            self.courses.insert(course_id, CourseAggregate::new(course));
        }

        self.courses
            .get_mut(&course_id)
            .ok_or_else(|| DomainError::Internal("staged course vanished".to_string()))
    }

    /// Whether `pred` holds for the committed or the staged rows of a course
    fn any_view(&self, course_id: CourseId, pred: impl Fn(&CourseAggregate) -> bool) -> bool {
        let committed = self
            .store
            .read()
            .unwrap()
            .courses
            .get(&course_id)
            .is_some_and(&pred);
        committed || self.courses.get(&course_id).is_some_and(&pred)
    }

    fn course_of_assessment(&self, id: AssessmentId) -> Option<CourseId> {
        let owns = |agg: &CourseAggregate| agg.assessments().any(|(_, a)| a.id == id);
        let store = self.store.read().unwrap();
        store
            .courses
            .values()
            .chain(self.courses.values())
            .find(|agg| owns(agg))
            .map(|agg| agg.id())
    }

    fn course_of_folder(&self, id: MaterialFolderId) -> Option<CourseId> {
        let store = self.store.read().unwrap();
        store
            .courses
            .values()
            .chain(self.courses.values())
            .find(|agg| agg.material_folders.iter().any(|f| f.id == id))
            .map(|agg| agg.id())
    }

    fn require_reference(&self, id: AttachmentReferenceId) -> Result<(), DomainError> {
        let committed = self.store.read().unwrap().references.contains_key(&id);
        if committed || self.references.contains_key(&id) {
            Ok(())
        } else {
            Err(DomainError::Conflict(format!(
                "attachment reference {} does not exist",
                id
            )))
        }
    }
}

#[async_trait]
impl CourseTransaction for InMemoryCourseTransaction {
    async fn insert_course(&mut self, course: &Course) -> Result<(), DomainError> {
        self.check_injected(EntityKind::Course)?;

        let exists = self.store.read().unwrap().courses.contains_key(&course.id);
        if exists || self.courses.contains_key(&course.id) {
            return Err(DomainError::AlreadyExists(format!("course {}", course.id)));
        }

        self.courses
            .insert(course.id, CourseAggregate::new(course.clone()));
        Ok(())
    }

    async fn insert_lesson_plan_item(&mut self, item: &LessonPlanItem) -> Result<(), DomainError> {
        self.check_injected(EntityKind::LessonPlanItem)?;
        self.staged(item.course_id)?
            .lesson_plan_items
            .push(item.clone());
        Ok(())
    }

    async fn insert_question(&mut self, question: &Question) -> Result<(), DomainError> {
        self.check_injected(EntityKind::Question)?;

        let course_id = self.course_of_assessment(question.assessment_id).ok_or_else(|| {
            DomainError::Conflict(format!("assessment {} does not exist", question.assessment_id))
        })?;
        if let QuestionActable::Programming(ProgrammingQuestion {
            attachment: Some(package),
            ..
        }) = &question.actable
        {
            self.require_reference(package.id)?;
        }

        self.staged(course_id)?.questions.push(question.clone());
        Ok(())
    }

    async fn insert_achievement(&mut self, achievement: &Achievement) -> Result<(), DomainError> {
        self.check_injected(EntityKind::Achievement)?;
        if let Some(badge) = &achievement.badge {
            self.require_reference(badge.id)?;
        }
        self.staged(achievement.course_id)?
            .achievements
            .push(achievement.clone());
        Ok(())
    }

    async fn insert_condition(&mut self, condition: &Condition) -> Result<(), DomainError> {
        self.check_injected(EntityKind::Condition)?;
        self.staged(condition.course_id)?
            .conditions
            .push(condition.clone());
        Ok(())
    }

    async fn insert_level(&mut self, level: &Level) -> Result<(), DomainError> {
        self.check_injected(EntityKind::Level)?;

        let threshold = level.experience_points_threshold;
        let taken = self.any_view(level.course_id, |agg| {
            agg.levels
                .iter()
                .any(|l| l.experience_points_threshold == threshold)
        });
        if taken {
            return Err(DomainError::AlreadyExists(format!(
                "level threshold {} in course {}",
                threshold, level.course_id
            )));
        }

        self.staged(level.course_id)?.levels.push(level.clone());
        Ok(())
    }

    async fn insert_skill_branch(&mut self, branch: &SkillBranch) -> Result<(), DomainError> {
        self.check_injected(EntityKind::SkillBranch)?;
        self.staged(branch.course_id)?
            .skill_branches
            .push(branch.clone());
        Ok(())
    }

    async fn insert_skill(&mut self, skill: &Skill) -> Result<(), DomainError> {
        self.check_injected(EntityKind::Skill)?;
        self.staged(skill.course_id)?.skills.push(skill.clone());
        Ok(())
    }

    async fn insert_material_folder(&mut self, folder: &MaterialFolder) -> Result<(), DomainError> {
        self.check_injected(EntityKind::MaterialFolder)?;
        if let Some(parent_id) = folder.parent_id {
            if self.course_of_folder(parent_id) != Some(folder.course_id) {
                return Err(DomainError::Conflict(format!(
                    "parent folder {} does not exist",
                    parent_id
                )));
            }
        }
        self.staged(folder.course_id)?
            .material_folders
            .push(folder.clone());
        Ok(())
    }

    async fn insert_material(&mut self, material: &Material) -> Result<(), DomainError> {
        self.check_injected(EntityKind::Material)?;

        let course_id = self.course_of_folder(material.folder_id).ok_or_else(|| {
            DomainError::Conflict(format!("folder {} does not exist", material.folder_id))
        })?;
        self.require_reference(material.attachment.id)?;

        self.staged(course_id)?.materials.push(material.clone());
        Ok(())
    }

    async fn insert_forum(&mut self, forum: &Forum) -> Result<(), DomainError> {
        self.check_injected(EntityKind::Forum)?;

        let taken = self.any_view(forum.course_id, |agg| {
            agg.forums.iter().any(|f| f.slug == forum.slug)
        });
        if taken {
            return Err(DomainError::AlreadyExists(format!(
                "forum slug {} in course {}",
                forum.slug, forum.course_id
            )));
        }

        self.staged(forum.course_id)?.forums.push(forum.clone());
        Ok(())
    }

    async fn attachment_content_exists(
        &mut self,
        content: &AttachmentContentId,
    ) -> Result<bool, DomainError> {
        Ok(self.store.read().unwrap().contents.contains(content))
    }

    async fn insert_attachment_reference(
        &mut self,
        reference: &AttachmentReference,
    ) -> Result<(), DomainError> {
        self.check_injected(EntityKind::AttachmentReference)?;

        if !self.store.read().unwrap().contents.contains(&reference.content) {
            return Err(DomainError::Conflict(format!(
                "attachment {} does not exist",
                reference.content
            )));
        }

        self.references.insert(reference.id, reference.clone());
        Ok(())
    }

    async fn commit(self) -> Result<(), DomainError> {
        if self.fail_commit {
            return Err(DomainError::Database("injected commit failure".to_string()));
        }

        let mut store = self.store.write().unwrap();

        for (id, staged) in self.courses {
            match store.courses.get_mut(&id) {
                Some(existing) => {
                    existing.lesson_plan_items.extend(staged.lesson_plan_items);
                    existing.questions.extend(staged.questions);
                    existing.achievements.extend(staged.achievements);
                    existing.conditions.extend(staged.conditions);
                    existing.levels.extend(staged.levels);
                    existing.skill_branches.extend(staged.skill_branches);
                    existing.skills.extend(staged.skills);
                    existing.material_folders.extend(staged.material_folders);
                    existing.materials.extend(staged.materials);
                    existing.forums.extend(staged.forums);
                }
                None => {
                    store.courses.insert(id, staged);
                }
            }
        }
        store.references.extend(self.references);

        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(self) -> Result<(), DomainError> {
        self.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
