//! Error types for skillgate-core

use thiserror::Error;

use skillgate_models::ModelError;

/// Top-level error type for skillgate-core
#[derive(Error, Debug)]
pub enum SkillgateError {
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Event bus error: {0}")]
    EventBus(#[from] EventBusError),
}

/// Errors related to assessment sessions
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid state: expected {expected}, got {actual}")]
    InvalidState { expected: String, actual: String },

    #[error("Skill identifier must not be empty")]
    EmptySkill,

    #[error("No assessment loaded")]
    NotLoaded,

    #[error("Session has been torn down")]
    Terminated,

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Errors from assessment providers
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("No assessment available for skill '{0}'")]
    NoAssessment(String),

    #[error("Assessment not found: {0}")]
    UnknownAssessment(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    #[error("Submission rejected: {0}")]
    Rejected(String),

    #[error("Invalid assessment payload: {0}")]
    Model(#[from] ModelError),
}

/// Errors from the event bus
#[derive(Error, Debug)]
pub enum EventBusError {
    #[error("Failed to publish event")]
    PublishFailed,
}
