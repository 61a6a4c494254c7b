//! Assessment sessions: state machine, derived views, countdown runner

pub mod runner;
pub mod state;
pub mod view;

// Re-export key types for convenience
pub use runner::SessionRunner;
pub use state::{AssessmentSession, SessionPhase, TickOutcome};
pub use view::{QuestionView, SessionView};
