//! Event type definitions

use serde::{Deserialize, Serialize};

use crate::session::SessionPhase;

/// Events emitted by assessment sessions
///
/// Per-second countdown ticks are intentionally not published; remaining
/// time is polled through the session view and only the expiry edge is an
/// event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssessmentEvent {
    /// An assessment was fetched and the session re-initialized
    SessionLoaded {
        session_id: String,
        skill: String,
        assessment_id: String,
        question_count: usize,
        time_limit_secs: u32,
    },

    /// The session phase changed
    PhaseChanged {
        session_id: String,
        phase: SessionPhase,
    },

    /// An option was selected for a question
    AnswerRecorded {
        session_id: String,
        question_id: String,
        option_id: String,
        progress: u8,
    },

    /// The countdown reached zero; submission is being forced
    TimeExpired { session_id: String },

    /// The scoring result arrived
    ResultReceived {
        session_id: String,
        score: u8,
        passed: bool,
    },
}

impl AssessmentEvent {
    /// Session the event belongs to
    pub fn session_id(&self) -> &str {
        match self {
            AssessmentEvent::SessionLoaded { session_id, .. }
            | AssessmentEvent::PhaseChanged { session_id, .. }
            | AssessmentEvent::AnswerRecorded { session_id, .. }
            | AssessmentEvent::TimeExpired { session_id }
            | AssessmentEvent::ResultReceived { session_id, .. } => session_id,
        }
    }
}
