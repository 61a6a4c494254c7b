//! AssessmentProvider trait
//!
//! The provider abstraction keeps the session independent of any transport;
//! implementations handle the actual communication with the assessment
//! backend.

use async_trait::async_trait;

use skillgate_models::wire::AnswerEntry;
use skillgate_models::{Assessment, AssessmentResult};

use crate::error::ProviderError;

/// Source of assessment definitions and scoring
#[async_trait]
pub trait AssessmentProvider: Send + Sync {
    /// Fetch the assessment for a skill
    ///
    /// Returns [`ProviderError::NoAssessment`] when the skill has no
    /// assessment available.
    async fn fetch_assessment(&self, skill: &str) -> Result<Assessment, ProviderError>;

    /// Notify the backend that the assessment has begun
    ///
    /// Callers treat this as best-effort: the session proceeds locally even
    /// when the notification fails.
    async fn start_assessment(&self, assessment_id: &str) -> Result<(), ProviderError>;

    /// Submit answers for scoring
    ///
    /// `answers` is ordered by the assessment's question order;
    /// `time_spent_secs` is the elapsed share of the time limit.
    async fn submit_assessment(
        &self,
        assessment_id: &str,
        answers: &[AnswerEntry],
        time_spent_secs: u32,
    ) -> Result<AssessmentResult, ProviderError>;
}
