//! Assessment question entities

use serde::{Deserialize, Serialize};

use super::attachment::AttachmentReference;
use super::audit::AuditStamp;
use super::ids::{AssessmentId, QuestionId};

/// A question belonging to an assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub assessment_id: AssessmentId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub staff_only_comments: bool,
    pub maximum_grade: f64,
    /// Ordering weight within the assessment
    pub weight: i32,
    pub actable: QuestionActable,
    pub audit: AuditStamp,
}

/// Type-specific part of a question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionActable {
    MultipleResponse(MultipleResponseQuestion),
    TextResponse(TextResponseQuestion),
    Programming(ProgrammingQuestion),
}

impl QuestionActable {
    /// Stable type tag of the subtype
    pub fn actable_type(&self) -> &'static str {
        match self {
            QuestionActable::MultipleResponse(_) => "multiple_response",
            QuestionActable::TextResponse(_) => "text_response",
            QuestionActable::Programming(_) => "programming",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradingScheme {
    AllCorrect,
    AnyCorrect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultipleResponseQuestion {
    pub grading_scheme: GradingScheme,
    pub options: Vec<MultipleResponseOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipleResponseOption {
    pub option: String,
    pub explanation: Option<String>,
    pub correct: bool,
    pub weight: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextResponseQuestion {
    pub allow_attachment: bool,
    pub hide_text: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammingQuestion {
    pub language: String,
    /// Memory limit in MB
    pub memory_limit: Option<i32>,
    /// Time limit in seconds
    pub time_limit: Option<i32>,
    /// Starter files / test package
    pub attachment: Option<AttachmentReference>,
}
