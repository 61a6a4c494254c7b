//! Read-only session snapshots
//!
//! Views are owned clones built on demand: callers never alias session
//! internals, so a snapshot stays valid while the session moves on.

use serde::{Deserialize, Serialize};

use skillgate_models::{AnswerOption, AssessmentResult, Difficulty, QuestionKind};

use super::state::SessionPhase;

/// Snapshot of the question currently shown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionView {
    pub id: String,
    pub text: String,
    pub kind: QuestionKind,
    pub difficulty: Difficulty,
    pub points: u32,
    pub options: Vec<AnswerOption>,
    /// Option id the user has selected, if any
    pub selected_option: Option<String>,
    pub answered: bool,
}

/// Snapshot of everything the caller may render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: String,
    pub phase: SessionPhase,
    pub skill_name: Option<String>,
    pub title: Option<String>,
    pub question_count: usize,
    pub answered_count: usize,
    /// Share of questions answered, rounded percentage
    pub progress_percentage: u8,
    pub time_remaining_secs: u32,
    /// Remaining time as `M:SS`
    pub formatted_time_remaining: String,
    pub current_index: usize,
    pub at_first_question: bool,
    pub at_last_question: bool,
    pub current_question: Option<QuestionView>,
    /// Answered flag per question, in question order
    pub questions_answered: Vec<bool>,
    pub result: Option<AssessmentResult>,
    /// Failure message when the phase is failed
    pub error_message: Option<String>,
}

/// Format seconds as `M:SS`
pub(crate) fn format_time(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
