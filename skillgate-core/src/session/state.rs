//! AssessmentSession struct and state machine
//!
//! AssessmentSession wraps an AssessmentProvider and forwards lifecycle
//! events to the EventBus. It holds exactly one assessment at a time and
//! enforces the phase transitions around the countdown and submission:
//! fetch → not_started → running → submitting → completed, with failed as
//! the error phase (recoverable only for submit failures).

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use skillgate_models::wire::AnswerEntry;
use skillgate_models::{Assessment, AssessmentResult, AssessmentStatus};

use crate::error::SessionError;
use crate::events::{AssessmentEvent, EventBus};
use crate::provider::AssessmentProvider;
use crate::session::view::{QuestionView, SessionView, format_time};

/// Phase of an assessment session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SessionPhase {
    /// Assessment fetched, waiting for an explicit start
    NotStarted,
    /// Countdown running, answers and navigation accepted
    Running,
    /// Submission in flight
    Submitting,
    /// Result stored; terminal until the session loads a new skill
    Completed,
    /// Fetch or submit failed; recoverable only for submit failures
    Failed { message: String, recoverable: bool },
}

impl SessionPhase {
    /// Short phase name for errors and logs
    pub fn name(&self) -> &'static str {
        match self {
            SessionPhase::NotStarted => "not_started",
            SessionPhase::Running => "running",
            SessionPhase::Submitting => "submitting",
            SessionPhase::Completed => "completed",
            SessionPhase::Failed { .. } => "failed",
        }
    }
}

/// Outcome of a countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown decremented; seconds remain
    Running { remaining: u32 },
    /// The countdown just reached zero; submission must be forced
    Expired,
    /// The session is not counting down
    Idle,
}

/// One timed skill assessment from fetch to result
///
/// The session owns its assessment, answers, and countdown seconds
/// exclusively; callers observe it through owned [`SessionView`] snapshots
/// and the event bus.
pub struct AssessmentSession {
    /// Unique session identifier
    id: String,
    /// Skill the current assessment was loaded for
    skill: Option<String>,
    /// The active assessment, immutable once fetched
    assessment: Option<Assessment>,
    /// Current phase
    phase: SessionPhase,
    /// Index of the question being shown
    current_index: usize,
    /// question id -> selected option id; absence means unanswered
    selected: HashMap<String, String>,
    /// Seconds left on the countdown
    time_remaining_secs: u32,
    /// Scoring result, present once completed
    result: Option<AssessmentResult>,
    /// The provider collaborator
    provider: Box<dyn AssessmentProvider>,
    /// Event bus for broadcasting
    event_bus: Arc<dyn EventBus>,
}

impl AssessmentSession {
    /// Create a new session with no assessment loaded
    pub fn new(provider: Box<dyn AssessmentProvider>, event_bus: Arc<dyn EventBus>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            skill: None,
            assessment: None,
            phase: SessionPhase::NotStarted,
            current_index: 0,
            selected: HashMap::new(),
            time_remaining_secs: 0,
            result: None,
            provider,
            event_bus,
        }
    }

    /// Get the session ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the current phase
    pub fn phase(&self) -> SessionPhase {
        self.phase.clone()
    }

    /// Get the skill the session was loaded for
    pub fn skill(&self) -> Option<&str> {
        self.skill.as_deref()
    }

    /// Get the active assessment
    pub fn assessment(&self) -> Option<&Assessment> {
        self.assessment.as_ref()
    }

    /// Get the stored result, if submission has completed
    pub fn result(&self) -> Option<&AssessmentResult> {
        self.result.as_ref()
    }

    /// Seconds left on the countdown
    pub fn time_remaining_secs(&self) -> u32 {
        self.time_remaining_secs
    }

    /// Index of the question currently shown
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Selected option for a question, if any
    pub fn selected_option(&self, question_id: &str) -> Option<&str> {
        self.selected.get(question_id).map(String::as_str)
    }

    /// Number of answered questions
    pub fn answered_count(&self) -> usize {
        self.selected.len()
    }

    /// Share of questions answered, as a rounded percentage
    pub fn progress_percentage(&self) -> u8 {
        let total = self
            .assessment
            .as_ref()
            .map(|a| a.question_count())
            .unwrap_or(0);
        if total == 0 {
            return 0;
        }
        ((self.selected.len() * 100) as f64 / total as f64).round() as u8
    }

    /// Fetch the assessment for `skill` and re-initialize the session
    ///
    /// All prior state is discarded first, so answers never leak across
    /// assessments. On success the countdown is primed with the full time
    /// limit and the phase follows the server-reported status: an
    /// `in_progress` assessment resumes straight into running. On failure
    /// the session enters a non-recoverable failed phase.
    pub async fn load(&mut self, skill: &str) -> Result<(), SessionError> {
        if skill.trim().is_empty() {
            return Err(SessionError::EmptySkill);
        }
        self.reset(skill);

        match self.provider.fetch_assessment(skill).await {
            Ok(assessment) => {
                self.time_remaining_secs = assessment.time_limit_secs();
                self.phase = if assessment.status == AssessmentStatus::InProgress {
                    SessionPhase::Running
                } else {
                    SessionPhase::NotStarted
                };
                self.event_bus
                    .publish(AssessmentEvent::SessionLoaded {
                        session_id: self.id.clone(),
                        skill: skill.to_string(),
                        assessment_id: assessment.id.clone(),
                        question_count: assessment.question_count(),
                        time_limit_secs: assessment.time_limit_secs(),
                    })
                    .await;
                self.assessment = Some(assessment);
                self.publish_phase().await;
                Ok(())
            }
            Err(error) => {
                tracing::error!(skill, error = %error, "failed to fetch assessment");
                self.phase = SessionPhase::Failed {
                    message: error.to_string(),
                    recoverable: false,
                };
                self.publish_phase().await;
                Err(SessionError::Provider(error))
            }
        }
    }

    /// Start the assessment
    ///
    /// The start notification is best-effort: the local countdown is the
    /// authoritative deadline, so a failed notification never blocks the
    /// session.
    pub async fn start(&mut self) -> Result<(), SessionError> {
        let assessment_id = match (&self.phase, &self.assessment) {
            (SessionPhase::NotStarted, Some(a)) => a.id.clone(),
            (SessionPhase::NotStarted, None) => return Err(SessionError::NotLoaded),
            (phase, _) => {
                return Err(SessionError::InvalidState {
                    expected: "not_started".to_string(),
                    actual: phase.name().to_string(),
                });
            }
        };

        if let Err(error) = self.provider.start_assessment(&assessment_id).await {
            tracing::warn!(
                assessment = %assessment_id,
                error = %error,
                "start notification failed; continuing locally"
            );
        }

        self.phase = SessionPhase::Running;
        self.publish_phase().await;
        Ok(())
    }

    /// Select an option for a question
    ///
    /// Last write wins; re-selecting the current option is a no-op. Unknown
    /// question or option identifiers are ignored rather than surfaced.
    pub async fn select_option(
        &mut self,
        question_id: &str,
        option_id: &str,
    ) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Running {
            return Err(SessionError::InvalidState {
                expected: "running".to_string(),
                actual: self.phase.name().to_string(),
            });
        }
        let Some(assessment) = &self.assessment else {
            return Err(SessionError::NotLoaded);
        };
        let Some(question) = assessment.question(question_id) else {
            tracing::debug!(session = %self.id, question_id, "ignoring selection for unknown question");
            return Ok(());
        };
        if question.option(option_id).is_none() {
            tracing::debug!(session = %self.id, question_id, option_id, "ignoring unknown option");
            return Ok(());
        }
        if self.selected.get(question_id).map(String::as_str) == Some(option_id) {
            return Ok(());
        }

        self.selected
            .insert(question_id.to_string(), option_id.to_string());
        let progress = self.progress_percentage();
        self.event_bus
            .publish(AssessmentEvent::AnswerRecorded {
                session_id: self.id.clone(),
                question_id: question_id.to_string(),
                option_id: option_id.to_string(),
                progress,
            })
            .await;
        Ok(())
    }

    /// Jump to a question by index, clamping into range
    pub fn go_to(&mut self, index: usize) {
        if self.phase != SessionPhase::Running {
            return;
        }
        let Some(assessment) = &self.assessment else {
            return;
        };
        if assessment.questions.is_empty() {
            return;
        }
        self.current_index = index.min(assessment.question_count() - 1);
    }

    /// Advance to the next question; no-op at the last one
    pub fn next(&mut self) {
        if self.phase != SessionPhase::Running {
            return;
        }
        let Some(assessment) = &self.assessment else {
            return;
        };
        if self.current_index + 1 < assessment.question_count() {
            self.current_index += 1;
        }
    }

    /// Go back to the previous question; no-op at the first one
    pub fn previous(&mut self) {
        if self.phase != SessionPhase::Running {
            return;
        }
        if self.current_index > 0 {
            self.current_index -= 1;
        }
    }

    /// Count down one second
    ///
    /// Only a running session counts down; the 1→0 edge yields
    /// [`TickOutcome::Expired`] exactly once, and ticks at zero or in any
    /// other phase are no-ops.
    pub async fn tick(&mut self) -> TickOutcome {
        if self.phase != SessionPhase::Running {
            return TickOutcome::Idle;
        }
        if self.time_remaining_secs == 0 {
            return TickOutcome::Idle;
        }

        self.time_remaining_secs -= 1;
        if self.time_remaining_secs == 0 {
            self.event_bus
                .publish(AssessmentEvent::TimeExpired {
                    session_id: self.id.clone(),
                })
                .await;
            return TickOutcome::Expired;
        }
        TickOutcome::Running {
            remaining: self.time_remaining_secs,
        }
    }

    /// Submit the selected answers for scoring
    ///
    /// Allowed while running (manual or timer-forced) and from a
    /// recoverable failure (retry). A call that lands while a submission is
    /// already in flight is dropped without side effects. On failure every
    /// answer and the remaining-time reading are preserved so a retry loses
    /// nothing.
    pub async fn submit(&mut self) -> Result<(), SessionError> {
        match &self.phase {
            SessionPhase::Running => {}
            SessionPhase::Failed { recoverable: true, .. } => {}
            SessionPhase::Submitting => {
                tracing::debug!(session = %self.id, "submit ignored; submission already in flight");
                return Ok(());
            }
            phase => {
                return Err(SessionError::InvalidState {
                    expected: "running".to_string(),
                    actual: phase.name().to_string(),
                });
            }
        }
        let Some(assessment) = &self.assessment else {
            return Err(SessionError::NotLoaded);
        };

        let assessment_id = assessment.id.clone();
        let time_spent = assessment
            .time_limit_secs()
            .saturating_sub(self.time_remaining_secs);
        // Answers travel in question order; unanswered questions are omitted
        let answers: Vec<AnswerEntry> = assessment
            .questions
            .iter()
            .filter_map(|q| {
                self.selected.get(&q.id).map(|option_id| AnswerEntry {
                    question_id: q.id.clone(),
                    option_id: option_id.clone(),
                })
            })
            .collect();

        self.phase = SessionPhase::Submitting;
        self.publish_phase().await;

        match self
            .provider
            .submit_assessment(&assessment_id, &answers, time_spent)
            .await
        {
            Ok(result) => {
                self.event_bus
                    .publish(AssessmentEvent::ResultReceived {
                        session_id: self.id.clone(),
                        score: result.score,
                        passed: result.passed,
                    })
                    .await;
                self.result = Some(result);
                self.phase = SessionPhase::Completed;
                self.publish_phase().await;
                Ok(())
            }
            Err(error) => {
                tracing::error!(
                    session = %self.id,
                    assessment = %assessment_id,
                    error = %error,
                    "submission failed; answers retained for retry"
                );
                self.phase = SessionPhase::Failed {
                    message: error.to_string(),
                    recoverable: true,
                };
                self.publish_phase().await;
                Err(SessionError::Provider(error))
            }
        }
    }

    /// Build an owned snapshot of everything the caller may render
    pub fn view(&self) -> SessionView {
        let question_count = self
            .assessment
            .as_ref()
            .map(|a| a.question_count())
            .unwrap_or(0);
        let current_question = self.assessment.as_ref().and_then(|a| {
            a.questions.get(self.current_index).map(|q| QuestionView {
                id: q.id.clone(),
                text: q.text.clone(),
                kind: q.kind,
                difficulty: q.difficulty,
                points: q.points,
                options: q.options.clone(),
                selected_option: self.selected.get(&q.id).cloned(),
                answered: self.selected.contains_key(&q.id),
            })
        });
        let questions_answered = self
            .assessment
            .as_ref()
            .map(|a| {
                a.questions
                    .iter()
                    .map(|q| self.selected.contains_key(&q.id))
                    .collect()
            })
            .unwrap_or_default();
        let error_message = match &self.phase {
            SessionPhase::Failed { message, .. } => Some(message.clone()),
            _ => None,
        };

        SessionView {
            session_id: self.id.clone(),
            phase: self.phase.clone(),
            skill_name: self
                .assessment
                .as_ref()
                .map(|a| a.skill_name.clone())
                .or_else(|| self.skill.clone()),
            title: self.assessment.as_ref().map(|a| a.title.clone()),
            question_count,
            answered_count: self.selected.len(),
            progress_percentage: self.progress_percentage(),
            time_remaining_secs: self.time_remaining_secs,
            formatted_time_remaining: format_time(self.time_remaining_secs),
            current_index: self.current_index,
            at_first_question: self.current_index == 0,
            at_last_question: question_count > 0 && self.current_index + 1 == question_count,
            current_question,
            questions_answered,
            result: self.result.clone(),
            error_message,
        }
    }

    fn reset(&mut self, skill: &str) {
        self.skill = Some(skill.to_string());
        self.assessment = None;
        self.phase = SessionPhase::NotStarted;
        self.current_index = 0;
        self.selected.clear();
        self.time_remaining_secs = 0;
        self.result = None;
    }

    async fn publish_phase(&self) {
        self.event_bus
            .publish(AssessmentEvent::PhaseChanged {
                session_id: self.id.clone(),
                phase: self.phase.clone(),
            })
            .await;
    }
}
