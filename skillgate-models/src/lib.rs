//! skillgate-models: Assessment data model for the skillgate engine
//!
//! Wire-facing types shared by the engine, its providers, and any frontend
//! transport. JSON shapes mirror the talent-platform REST API: camelCase
//! field names, `_id` identifiers, time limits in minutes.

pub mod assessment;
pub mod error;
pub mod result;
pub mod wire;

// Re-export key types for convenience
pub use assessment::{
    AnswerOption, Assessment, AssessmentStatus, AssessmentType, Difficulty, Question, QuestionKind,
};
pub use error::ModelError;
pub use result::AssessmentResult;
pub use wire::{
    AnswerEntry, ApiErrorBody, AssessmentEnvelope, StartAssessmentRequest,
    StartAssessmentResponse, SubmitAssessmentRequest, SubmitAssessmentResponse,
};
