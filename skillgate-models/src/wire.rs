//! Request and response bodies of the assessment REST endpoints
//!
//! Shapes match the talent-platform API:
//!
//! - `GET  /api/talent/skills/assessment?skill=…` → [`AssessmentEnvelope`]
//! - `POST /api/talent/skills/assessment/start`   → [`StartAssessmentResponse`]
//! - `POST /api/talent/skills/assessment/submit`  → [`SubmitAssessmentResponse`]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assessment::Assessment;
use crate::result::AssessmentResult;

/// Response body of the assessment-by-skill endpoint
///
/// A missing or null `assessment` means no assessment is available for the
/// requested skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentEnvelope {
    #[serde(default)]
    pub assessment: Option<Assessment>,
}

/// Request body of the start endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAssessmentRequest {
    pub assessment_id: String,
}

/// Acknowledgement from the start endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAssessmentResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
}

/// One answered question in a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntry {
    pub question_id: String,
    pub option_id: String,
}

/// Request body of the submit endpoint
///
/// `answers` is ordered by the assessment's question order; `time_spent` is
/// in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssessmentRequest {
    pub assessment_id: String,
    pub answers: Vec<AnswerEntry>,
    pub time_spent: u32,
}

/// Response body of the submit endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssessmentResponse {
    #[serde(default)]
    pub success: bool,
    pub result: AssessmentResult,
}

/// Error payload returned by all endpoints on non-2xx responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}
