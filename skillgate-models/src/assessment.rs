//! Assessment and question definitions
//!
//! An [`Assessment`] is immutable once fetched: the engine never edits it,
//! only reads it while driving a session. Question order is significant —
//! it defines navigation order and the order answers are submitted in.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Server-reported lifecycle status of an assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    /// Created, never started
    #[default]
    Pending,
    /// Started; a session resuming this assessment goes straight to running
    InProgress,
    /// Submitted and scored
    Completed,
    /// Deadline passed without submission
    Expired,
}

/// Kind of assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentType {
    #[default]
    Quiz,
    CodingChallenge,
    Project,
    Interview,
}

/// Kind of question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    #[default]
    MultipleChoice,
    Coding,
    OpenEnded,
}

/// Question difficulty, ordered from beginner to expert
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    /// All difficulty levels in ascending order
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
        Difficulty::Expert,
    ];

    /// Default point weight for a question of this difficulty
    pub fn default_points(&self) -> u32 {
        match self {
            Difficulty::Beginner => 1,
            Difficulty::Intermediate => 2,
            Difficulty::Advanced => 3,
            Difficulty::Expert => 4,
        }
    }

    /// String representation matching the wire format
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Expert => "expert",
        }
    }
}

/// A selectable answer option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
}

/// A single assessment question
///
/// Option order is display order; option ids are unique within the question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub difficulty: Difficulty,
    #[serde(default = "default_question_points")]
    pub points: u32,
}

fn default_question_points() -> u32 {
    1
}

impl Question {
    /// Look up an option by id
    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// A timed skill assessment, immutable once fetched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub skill_id: String,
    pub skill_name: String,
    pub title: String,
    pub description: String,
    /// Time limit in minutes
    #[serde(rename = "timeLimit")]
    pub time_limit_mins: u32,
    /// Passing threshold as an integer percentage, 0-100
    pub passing_score: u8,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub status: AssessmentStatus,
    #[serde(default)]
    pub assessment_type: AssessmentType,
}

impl Assessment {
    /// Time limit converted to seconds
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_mins * 60
    }

    /// Number of questions
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Look up a question by id
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    /// Sum of all question point weights
    pub fn total_points(&self) -> u32 {
        self.questions.iter().map(|q| q.points).sum()
    }

    /// Question count per difficulty level, in ascending level order
    pub fn difficulty_counts(&self) -> Vec<(Difficulty, usize)> {
        Difficulty::ALL
            .iter()
            .map(|level| {
                let count = self.questions.iter().filter(|q| q.difficulty == *level).count();
                (*level, count)
            })
            .collect()
    }

    /// Check the structural invariants the engine relies on
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.time_limit_mins == 0 {
            return Err(ModelError::NonPositiveTimeLimit);
        }
        if self.passing_score > 100 {
            return Err(ModelError::InvalidPassingScore(self.passing_score));
        }
        if self.questions.is_empty() {
            return Err(ModelError::NoQuestions);
        }

        let mut question_ids = HashSet::new();
        for question in &self.questions {
            if !question_ids.insert(question.id.as_str()) {
                return Err(ModelError::DuplicateQuestionId(question.id.clone()));
            }
            if question.kind == QuestionKind::MultipleChoice && question.options.is_empty() {
                return Err(ModelError::NoOptions {
                    question: question.id.clone(),
                });
            }
            let mut option_ids = HashSet::new();
            for option in &question.options {
                if !option_ids.insert(option.id.as_str()) {
                    return Err(ModelError::DuplicateOptionId {
                        question: question.id.clone(),
                        option: option.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
