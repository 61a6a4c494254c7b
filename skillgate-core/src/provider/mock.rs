//! Mock provider for testing
//!
//! MockProvider allows scripting fetch/start/submit outcomes for unit
//! tests, enabling fast, deterministic testing of session logic. A
//! [`MockProbe`] cloned before the provider is boxed keeps call counts and
//! the last submission visible to assertions.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use skillgate_models::wire::AnswerEntry;
use skillgate_models::{Assessment, AssessmentResult};

use super::traits::AssessmentProvider;
use crate::error::ProviderError;

#[derive(Default)]
struct ProbeState {
    fetch_calls: AtomicUsize,
    start_calls: AtomicUsize,
    submit_calls: AtomicUsize,
    last_submit: Mutex<Option<RecordedSubmit>>,
}

/// The arguments of the most recent submit call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSubmit {
    pub assessment_id: String,
    pub answers: Vec<AnswerEntry>,
    pub time_spent_secs: u32,
}

/// Observation handle onto a [`MockProvider`]
///
/// Clone it before handing the provider to a session; counts stay shared.
#[derive(Clone, Default)]
pub struct MockProbe {
    state: Arc<ProbeState>,
}

impl MockProbe {
    /// Number of fetch calls made so far
    pub fn fetch_calls(&self) -> usize {
        self.state.fetch_calls.load(Ordering::SeqCst)
    }

    /// Number of start calls made so far
    pub fn start_calls(&self) -> usize {
        self.state.start_calls.load(Ordering::SeqCst)
    }

    /// Number of submit calls made so far
    pub fn submit_calls(&self) -> usize {
        self.state.submit_calls.load(Ordering::SeqCst)
    }

    /// Arguments of the most recent submit call, if any
    pub fn last_submit(&self) -> Option<RecordedSubmit> {
        self.state
            .last_submit
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or(None)
    }
}

/// Mock implementation of AssessmentProvider for testing
///
/// Queue outcomes with the `queue_*` methods before handing the provider
/// to a session. Each call consumes one queued outcome; an empty fetch or
/// submit queue yields an error, an empty start queue acknowledges.
pub struct MockProvider {
    fetches: Mutex<VecDeque<Result<Assessment, ProviderError>>>,
    starts: Mutex<VecDeque<Result<(), ProviderError>>>,
    submits: Mutex<VecDeque<Result<AssessmentResult, ProviderError>>>,
    probe: MockProbe,
}

impl MockProvider {
    /// Create a new MockProvider with empty queues
    pub fn new() -> Self {
        Self {
            fetches: Mutex::new(VecDeque::new()),
            starts: Mutex::new(VecDeque::new()),
            submits: Mutex::new(VecDeque::new()),
            probe: MockProbe::default(),
        }
    }

    /// Get an observation handle sharing this provider's counters
    pub fn probe(&self) -> MockProbe {
        self.probe.clone()
    }

    /// Queue an assessment for the next fetch
    pub fn queue_assessment(&self, assessment: Assessment) {
        self.push_fetch(Ok(assessment));
    }

    /// Queue a fetch failure
    pub fn queue_fetch_error(&self, error: ProviderError) {
        self.push_fetch(Err(error));
    }

    /// Queue a start failure (starts succeed by default)
    pub fn queue_start_error(&self, error: ProviderError) {
        if let Ok(mut starts) = self.starts.lock() {
            starts.push_back(Err(error));
        }
    }

    /// Queue a result for the next submit
    pub fn queue_result(&self, result: AssessmentResult) {
        self.push_submit(Ok(result));
    }

    /// Queue a submit failure
    pub fn queue_submit_error(&self, error: ProviderError) {
        self.push_submit(Err(error));
    }

    fn push_fetch(&self, outcome: Result<Assessment, ProviderError>) {
        if let Ok(mut fetches) = self.fetches.lock() {
            fetches.push_back(outcome);
        }
    }

    fn push_submit(&self, outcome: Result<AssessmentResult, ProviderError>) {
        if let Ok(mut submits) = self.submits.lock() {
            submits.push_back(outcome);
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssessmentProvider for MockProvider {
    async fn fetch_assessment(&self, skill: &str) -> Result<Assessment, ProviderError> {
        self.probe.state.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let queued = self.fetches.lock().ok().and_then(|mut q| q.pop_front());
        queued.unwrap_or_else(|| {
            Err(ProviderError::Request(format!(
                "no queued fetch outcome in MockProvider for skill '{skill}'"
            )))
        })
    }

    async fn start_assessment(&self, _assessment_id: &str) -> Result<(), ProviderError> {
        self.probe.state.start_calls.fetch_add(1, Ordering::SeqCst);
        let queued = self.starts.lock().ok().and_then(|mut q| q.pop_front());
        // Starts acknowledge by default
        queued.unwrap_or(Ok(()))
    }

    async fn submit_assessment(
        &self,
        assessment_id: &str,
        answers: &[AnswerEntry],
        time_spent_secs: u32,
    ) -> Result<AssessmentResult, ProviderError> {
        self.probe.state.submit_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.probe.state.last_submit.lock() {
            *last = Some(RecordedSubmit {
                assessment_id: assessment_id.to_string(),
                answers: answers.to_vec(),
                time_spent_secs,
            });
        }
        let queued = self.submits.lock().ok().and_then(|mut q| q.pop_front());
        queued.unwrap_or_else(|| {
            Err(ProviderError::Request(
                "no queued submit outcome in MockProvider".to_string(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillgate_models::{AssessmentStatus, AssessmentType, Difficulty, Question, QuestionKind};

    fn assessment() -> Assessment {
        Assessment {
            id: "a-1".to_string(),
            skill_id: "rust".to_string(),
            skill_name: "Rust".to_string(),
            title: "Rust Assessment".to_string(),
            description: "desc".to_string(),
            time_limit_mins: 1,
            passing_score: 70,
            questions: vec![Question {
                id: "q-1".to_string(),
                text: "text".to_string(),
                options: vec![],
                kind: QuestionKind::OpenEnded,
                difficulty: Difficulty::Beginner,
                points: 1,
            }],
            status: AssessmentStatus::Pending,
            assessment_type: AssessmentType::Quiz,
        }
    }

    // ==================== Queue Tests ====================

    #[tokio::test]
    async fn fetch_consumes_queued_assessment() {
        let provider = MockProvider::new();
        provider.queue_assessment(assessment());

        let fetched = provider.fetch_assessment("Rust").await.unwrap();
        assert_eq!(fetched.id, "a-1");

        // Queue is consumed; a second fetch errors
        assert!(provider.fetch_assessment("Rust").await.is_err());
    }

    #[tokio::test]
    async fn fetch_without_queued_outcome_returns_error() {
        let provider = MockProvider::new();
        let result = provider.fetch_assessment("Rust").await;
        assert!(matches!(result, Err(ProviderError::Request(_))));
    }

    #[tokio::test]
    async fn start_succeeds_by_default() {
        let provider = MockProvider::new();
        assert!(provider.start_assessment("a-1").await.is_ok());
    }

    #[tokio::test]
    async fn queued_start_error_is_consumed_first() {
        let provider = MockProvider::new();
        provider.queue_start_error(ProviderError::Request("boom".to_string()));

        assert!(provider.start_assessment("a-1").await.is_err());
        assert!(provider.start_assessment("a-1").await.is_ok());
    }

    // ==================== Probe Tests ====================

    #[tokio::test]
    async fn probe_counts_calls() {
        let provider = MockProvider::new();
        let probe = provider.probe();
        provider.queue_assessment(assessment());
        provider.queue_result(AssessmentResult {
            score: 100,
            passed: true,
            feedback: "f".to_string(),
        });

        provider.fetch_assessment("Rust").await.unwrap();
        provider.start_assessment("a-1").await.unwrap();
        provider.submit_assessment("a-1", &[], 10).await.unwrap();

        assert_eq!(probe.fetch_calls(), 1);
        assert_eq!(probe.start_calls(), 1);
        assert_eq!(probe.submit_calls(), 1);
    }

    #[tokio::test]
    async fn probe_records_last_submit_arguments() {
        let provider = MockProvider::new();
        let probe = provider.probe();
        provider.queue_result(AssessmentResult {
            score: 50,
            passed: false,
            feedback: "f".to_string(),
        });

        let answers = vec![AnswerEntry {
            question_id: "q-1".to_string(),
            option_id: "q-1-opt-0".to_string(),
        }];
        provider.submit_assessment("a-1", &answers, 60).await.unwrap();

        let recorded = probe.last_submit().unwrap();
        assert_eq!(recorded.assessment_id, "a-1");
        assert_eq!(recorded.answers, answers);
        assert_eq!(recorded.time_spent_secs, 60);
    }

    #[tokio::test]
    async fn probe_records_submit_even_when_queued_outcome_is_error() {
        let provider = MockProvider::new();
        let probe = provider.probe();
        provider.queue_submit_error(ProviderError::Request("down".to_string()));

        let result = provider.submit_assessment("a-1", &[], 5).await;
        assert!(result.is_err());
        assert_eq!(probe.submit_calls(), 1);
        assert!(probe.last_submit().is_some());
    }
}
