//! Lesson plan domain entities
//!
//! A lesson plan item is the scheduled wrapper shared by assessments,
//! events and milestones. The subtype lives in `actable`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::audit::AuditStamp;
use super::ids::{AssessmentId, CourseId, EventId, LessonPlanItemId, MilestoneId};

/// A scheduled item in a course's lesson plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonPlanItem {
    pub id: LessonPlanItemId,
    pub course_id: CourseId,
    /// Order among the course's lesson plan items
    pub position: i32,
    pub title: String,
    pub description: Option<String>,
    pub start_at: DateTime<Utc>,
    pub bonus_end_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub actable: LessonPlanActable,
    pub audit: AuditStamp,
}

impl LessonPlanItem {
    /// The assessment this item wraps, if it is one
    pub fn assessment(&self) -> Option<&Assessment> {
        match &self.actable {
            LessonPlanActable::Assessment(assessment) => Some(assessment),
            _ => None,
        }
    }
}

/// The concrete subtype behind a lesson plan item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LessonPlanActable {
    Assessment(Assessment),
    Event(Event),
    Milestone(Milestone),
}

impl LessonPlanActable {
    /// Stable type tag of the subtype
    pub fn actable_type(&self) -> &'static str {
        match self {
            LessonPlanActable::Assessment(_) => "assessment",
            LessonPlanActable::Event(_) => "event",
            LessonPlanActable::Milestone(_) => "milestone",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: AssessmentId,
    pub base_exp: i32,
    pub time_bonus_exp: i32,
    pub published: bool,
    pub autograded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub event_type: EventType,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: MilestoneId,
}

/// Kind of lesson plan event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Lecture,
    Recitation,
    Tutorial,
    Other,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::Lecture => write!(f, "lecture"),
            EventType::Recitation => write!(f, "recitation"),
            EventType::Tutorial => write!(f, "tutorial"),
            EventType::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lecture" => Ok(EventType::Lecture),
            "recitation" => Ok(EventType::Recitation),
            "tutorial" => Ok(EventType::Tutorial),
            "other" => Ok(EventType::Other),
            _ => Err(format!("Unknown event type: {}", s)),
        }
    }
}
