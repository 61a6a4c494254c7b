//! Slow mock provider for concurrency testing
//!
//! SlowMockProvider wraps MockProvider and adds a configurable delay
//! before each call. This is useful for testing in-flight submission
//! behavior and teardown while a request is pending.

use std::time::Duration;

use async_trait::async_trait;

use skillgate_models::wire::AnswerEntry;
use skillgate_models::{Assessment, AssessmentResult};

use super::mock::{MockProbe, MockProvider};
use super::traits::AssessmentProvider;
use crate::error::ProviderError;

/// MockProvider wrapper that adds configurable delay
pub struct SlowMockProvider {
    inner: MockProvider,
    delay: Duration,
}

impl SlowMockProvider {
    /// Create with the specified delay per call
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MockProvider::new(),
            delay,
        }
    }

    /// Get an observation handle (delegates to inner)
    pub fn probe(&self) -> MockProbe {
        self.inner.probe()
    }

    /// Queue an assessment (delegates to inner)
    pub fn queue_assessment(&self, assessment: Assessment) {
        self.inner.queue_assessment(assessment);
    }

    /// Queue a result (delegates to inner)
    pub fn queue_result(&self, result: AssessmentResult) {
        self.inner.queue_result(result);
    }

    /// Queue a submit failure (delegates to inner)
    pub fn queue_submit_error(&self, error: ProviderError) {
        self.inner.queue_submit_error(error);
    }
}

#[async_trait]
impl AssessmentProvider for SlowMockProvider {
    async fn fetch_assessment(&self, skill: &str) -> Result<Assessment, ProviderError> {
        tokio::time::sleep(self.delay).await;
        self.inner.fetch_assessment(skill).await
    }

    async fn start_assessment(&self, assessment_id: &str) -> Result<(), ProviderError> {
        tokio::time::sleep(self.delay).await;
        self.inner.start_assessment(assessment_id).await
    }

    async fn submit_assessment(
        &self,
        assessment_id: &str,
        answers: &[AnswerEntry],
        time_spent_secs: u32,
    ) -> Result<AssessmentResult, ProviderError> {
        tokio::time::sleep(self.delay).await;
        self.inner
            .submit_assessment(assessment_id, answers, time_spent_secs)
            .await
    }
}
