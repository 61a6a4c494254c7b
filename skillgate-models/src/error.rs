//! Error types for skillgate-models

use thiserror::Error;

/// Structural validation failures for fetched assessments
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("time limit must be greater than zero")]
    NonPositiveTimeLimit,

    #[error("passing score {0} is outside 0-100")]
    InvalidPassingScore(u8),

    #[error("assessment has no questions")]
    NoQuestions,

    #[error("duplicate question id: {0}")]
    DuplicateQuestionId(String),

    #[error("question {question} has no options")]
    NoOptions { question: String },

    #[error("duplicate option id {option} in question {question}")]
    DuplicateOptionId { question: String, option: String },
}
