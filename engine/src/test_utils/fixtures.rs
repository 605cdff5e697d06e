//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::app::duplication::DuplicateCourseParams;
use crate::domain::entities::{
    Achievement, AchievementId, Assessment, AssessmentId, AttachmentContentId,
    AttachmentReference, AttachmentReferenceId, AuditStamp, Condition, ConditionId,
    ConditionTarget, Conditional, Course, CourseAggregate, CourseId, Event, EventId, EventType,
    FolderOwner, Forum, ForumId, GradingScheme, LessonPlanActable, LessonPlanItem,
    LessonPlanItemId, Level, LevelId, Material, MaterialFolder, MaterialFolderId, MaterialId,
    Milestone, MilestoneId, MultipleResponseOption, MultipleResponseQuestion,
    ProgrammingQuestion, Question, QuestionActable, QuestionId, Skill, SkillBranch,
    SkillBranchId, SkillId, TextResponseQuestion, UserId,
};

/// Midnight UTC on the given day
pub fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Audit stamp of something authored well before any test run
pub fn test_audit() -> AuditStamp {
    AuditStamp {
        creator_id: UserId(Uuid::new_v4()),
        updater_id: UserId(Uuid::new_v4()),
        created_at: day(2023, 11, 1),
        updated_at: day(2023, 11, 15),
    }
}

/// Create a test course starting 2024-01-01
pub fn test_course() -> Course {
    Course {
        id: CourseId::new(),
        title: "CS1101S Programming Methodology".to_string(),
        description: Some("Introductory programming".to_string()),
        start_at: day(2024, 1, 1),
        end_at: Some(day(2024, 5, 1)),
        registration_key: Some(format!("CS1101S-{}", Uuid::new_v4().simple())),
        published: true,
        enrollable: true,
        audit: test_audit(),
    }
}

pub fn test_params(new_start_at: DateTime<Utc>) -> DuplicateCourseParams {
    DuplicateCourseParams {
        new_title: "CS1101S Programming Methodology (copy)".to_string(),
        new_start_at,
        actor: UserId(Uuid::new_v4()),
    }
}

/// Assessment item: starts 2024-01-02, bonus ends 2024-01-05, no end
pub fn test_assessment_item(course_id: CourseId, position: i32) -> LessonPlanItem {
    LessonPlanItem {
        id: LessonPlanItemId::new(),
        course_id,
        position,
        title: "Mission 1".to_string(),
        description: Some("Rune reading".to_string()),
        start_at: day(2024, 1, 2),
        bonus_end_at: Some(day(2024, 1, 5)),
        end_at: None,
        actable: LessonPlanActable::Assessment(Assessment {
            id: AssessmentId::new(),
            base_exp: 1000,
            time_bonus_exp: 200,
            published: true,
            autograded: false,
        }),
        audit: test_audit(),
    }
}

pub fn test_event_item(course_id: CourseId, position: i32) -> LessonPlanItem {
    LessonPlanItem {
        id: LessonPlanItemId::new(),
        course_id,
        position,
        title: "Lecture 1".to_string(),
        description: None,
        start_at: day(2024, 1, 8),
        bonus_end_at: None,
        end_at: Some(day(2024, 1, 8) + Duration::hours(2)),
        actable: LessonPlanActable::Event(Event {
            id: EventId::new(),
            event_type: EventType::Lecture,
            location: Some("LT27".to_string()),
        }),
        audit: test_audit(),
    }
}

pub fn test_milestone_item(course_id: CourseId, position: i32) -> LessonPlanItem {
    LessonPlanItem {
        id: LessonPlanItemId::new(),
        course_id,
        position,
        title: "Midterm".to_string(),
        description: None,
        start_at: day(2024, 3, 1),
        bonus_end_at: None,
        end_at: None,
        actable: LessonPlanActable::Milestone(Milestone {
            id: MilestoneId::new(),
        }),
        audit: test_audit(),
    }
}

pub fn test_reference(content: &AttachmentContentId, name: &str) -> AttachmentReference {
    AttachmentReference {
        id: AttachmentReferenceId::new(),
        content: content.clone(),
        name: name.to_string(),
        audit: test_audit(),
    }
}

pub fn test_question(
    assessment_id: AssessmentId,
    weight: i32,
    actable: QuestionActable,
) -> Question {
    Question {
        id: QuestionId::new(),
        assessment_id,
        title: Some(format!("Question {}", weight)),
        description: Some("Answer carefully".to_string()),
        staff_only_comments: false,
        maximum_grade: 10.0,
        weight,
        actable,
        audit: test_audit(),
    }
}

pub fn test_multiple_response() -> QuestionActable {
    QuestionActable::MultipleResponse(MultipleResponseQuestion {
        grading_scheme: GradingScheme::AnyCorrect,
        options: vec![
            MultipleResponseOption {
                option: "O(n)".to_string(),
                explanation: Some("Linear scan".to_string()),
                correct: true,
                weight: 1,
            },
            MultipleResponseOption {
                option: "O(1)".to_string(),
                explanation: None,
                correct: false,
                weight: 2,
            },
        ],
    })
}

pub fn test_programming(package: Option<AttachmentReference>) -> QuestionActable {
    QuestionActable::Programming(ProgrammingQuestion {
        language: "python3.10".to_string(),
        memory_limit: Some(64),
        time_limit: Some(10),
        attachment: package,
    })
}

pub fn test_achievement(course_id: CourseId, title: &str) -> Achievement {
    Achievement {
        id: AchievementId::new(),
        course_id,
        title: title.to_string(),
        description: Some(format!("Awarded for {}", title)),
        weight: 1,
        published: true,
        badge: None,
        audit: test_audit(),
    }
}

pub fn test_level(course_id: CourseId, threshold: i32) -> Level {
    Level {
        id: LevelId::new(),
        course_id,
        experience_points_threshold: threshold,
        audit: test_audit(),
    }
}

pub fn test_condition(
    course_id: CourseId,
    conditional: Conditional,
    target: ConditionTarget,
) -> Condition {
    Condition {
        id: ConditionId::new(),
        course_id,
        conditional,
        target,
        audit: test_audit(),
    }
}

pub fn test_skill_branch(course_id: CourseId, title: &str) -> SkillBranch {
    SkillBranch {
        id: SkillBranchId::new(),
        course_id,
        title: title.to_string(),
        description: None,
        audit: test_audit(),
    }
}

pub fn test_skill(
    course_id: CourseId,
    branch_id: Option<SkillBranchId>,
    title: &str,
) -> Skill {
    Skill {
        id: SkillId::new(),
        course_id,
        branch_id,
        title: title.to_string(),
        description: Some("Core skill".to_string()),
        audit: test_audit(),
    }
}

/// Folder opening on 2024-01-01 with no close date
pub fn test_folder(
    course_id: CourseId,
    parent_id: Option<MaterialFolderId>,
    name: &str,
) -> MaterialFolder {
    MaterialFolder {
        id: MaterialFolderId::new(),
        course_id,
        parent_id,
        owner: None,
        name: name.to_string(),
        description: None,
        can_student_upload: false,
        start_at: day(2024, 1, 1),
        end_at: None,
        audit: test_audit(),
    }
}

pub fn test_material(folder_id: MaterialFolderId, attachment: AttachmentReference) -> Material {
    Material {
        id: MaterialId::new(),
        folder_id,
        name: attachment.name.clone(),
        description: Some("Lecture notes".to_string()),
        attachment,
        audit: test_audit(),
    }
}

pub fn test_forum(course_id: CourseId, slug: &str) -> Forum {
    Forum {
        id: ForumId::new(),
        course_id,
        name: slug.replace('-', " "),
        slug: slug.to_string(),
        description: None,
        audit: test_audit(),
    }
}

/// Handles into a seeded course for assertions
pub struct SeededCourse {
    pub aggregate: CourseAggregate,
    pub achievement_a: AchievementId,
    pub achievement_b: AchievementId,
    pub level: LevelId,
    pub assessment: AssessmentId,
}

/// A course touching every entity family
///
/// Achievement B depends on achievement A, which depends on the first level.
/// The assessment is gated on the second level. Every attachment points at
/// `content`.
pub fn seeded_course(content: &AttachmentContentId) -> SeededCourse {
    let course = test_course();
    let course_id = course.id;
    let mut aggregate = CourseAggregate::new(course);

    let level_1 = test_level(course_id, 100);
    let level_2 = test_level(course_id, 300);

    let assessment_item = test_assessment_item(course_id, 0);
    let assessment_id = assessment_item.assessment().map(|a| a.id).unwrap();

    let mut achievement_a = test_achievement(course_id, "First Blood");
    achievement_a.badge = Some(test_reference(content, "badge.png"));
    let achievement_b = test_achievement(course_id, "Second Wind");

    aggregate.conditions = vec![
        test_condition(
            course_id,
            Conditional::Achievement(achievement_b.id),
            ConditionTarget::Achievement {
                achievement_id: achievement_a.id,
            },
        ),
        test_condition(
            course_id,
            Conditional::Achievement(achievement_a.id),
            ConditionTarget::Level {
                level_id: level_1.id,
            },
        ),
        test_condition(
            course_id,
            Conditional::Assessment(assessment_id),
            ConditionTarget::Level {
                level_id: level_2.id,
            },
        ),
    ];

    aggregate.questions = vec![
        test_question(assessment_id, 1, test_multiple_response()),
        test_question(
            assessment_id,
            2,
            test_programming(Some(test_reference(content, "package.zip"))),
        ),
        test_question(
            assessment_id,
            3,
            QuestionActable::TextResponse(TextResponseQuestion {
                allow_attachment: true,
                hide_text: false,
            }),
        ),
    ];

    aggregate.lesson_plan_items = vec![
        assessment_item,
        test_event_item(course_id, 1),
        test_milestone_item(course_id, 2),
    ];

    let branch = test_skill_branch(course_id, "Recursion");
    aggregate.skills = vec![
        test_skill(course_id, Some(branch.id), "Tree recursion"),
        test_skill(course_id, None, "Debugging"),
    ];
    aggregate.skill_branches = vec![branch];

    let root = test_folder(course_id, None, "Root");
    let week = test_folder(course_id, Some(root.id), "Week 1");
    let mut owned = test_folder(course_id, Some(root.id), "Mission 1 files");
    owned.owner = Some(FolderOwner::Assessment(assessment_id));
    aggregate.materials = vec![
        test_material(week.id, test_reference(content, "lecture-1.pdf")),
        test_material(week.id, test_reference(content, "lecture-1-annotated.pdf")),
    ];
    // children listed before the root on purpose
    aggregate.material_folders = vec![week, owned, root];

    aggregate.forums = vec![
        test_forum(course_id, "general"),
        test_forum(course_id, "announcements"),
    ];

    let (achievement_a_id, achievement_b_id, level_id) =
        (achievement_a.id, achievement_b.id, level_1.id);
    aggregate.achievements = vec![achievement_a, achievement_b];
    aggregate.levels = vec![level_1, level_2];

    SeededCourse {
        aggregate,
        achievement_a: achievement_a_id,
        achievement_b: achievement_b_id,
        level: level_id,
        assessment: assessment_id,
    }
}
