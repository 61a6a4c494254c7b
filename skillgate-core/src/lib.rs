//! skillgate-core: Core library for the skillgate assessment engine
//!
//! This crate provides the components that drive one timed skill
//! assessment from fetch to scored result:
//!
//! - **Session state machine** - [`AssessmentSession`] owning the
//!   assessment, answers, countdown seconds, and phase transitions
//! - **Countdown driver** - [`SessionRunner`] plus the injectable
//!   [`TickSource`] clock abstraction for deterministic tests
//! - **Provider boundary** - [`AssessmentProvider`] trait with HTTP,
//!   in-process, and scripted-mock implementations
//! - **Event system** - [`EventBus`] trait and [`MemoryEventBus`] for
//!   real-time event distribution with replay
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use skillgate_core::{
//!     IntervalTicker, LocalProvider, MemoryEventBus, SessionRunner,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let runner = SessionRunner::new(
//!     Box::new(LocalProvider::new()),
//!     Arc::new(MemoryEventBus::new(100)),
//! );
//!
//! // Fetch the assessment, start it, answer, submit
//! runner.load("Rust").await?;
//! runner.start(IntervalTicker::second()).await?;
//!
//! let view = runner.view().await;
//! if let Some(question) = &view.current_question {
//!     runner.select_option(&question.id, &question.options[0].id).await?;
//! }
//! runner.submit().await?;
//!
//! if let Some(result) = runner.view().await.result {
//!     println!("score {} passed {}", result.score, result.passed);
//! }
//! runner.shutdown().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────┐
//! │                  SessionRunner                     │
//! │  ┌─────────────────────────────┐  ┌────────────┐  │
//! │  │      AssessmentSession      │  │ countdown  │  │
//! │  │  phase / answers / seconds  │◄─┤ task       │  │
//! │  └───────┬─────────────┬───────┘  │ TickSource │  │
//! │          │             │          └────────────┘  │
//! └──────────┼─────────────┼─────────────────────────-┘
//!            ▼             ▼
//!   AssessmentProvider   EventBus
//!   (http / local / mock)  (memory)
//! ```

pub mod clock;
pub mod error;
pub mod events;
pub mod provider;
pub mod session;

// Re-export key types for convenience
pub use clock::{IntervalTicker, ManualClock, ManualTicker, TickSource};
pub use error::{EventBusError, ProviderError, SessionError, SkillgateError};
pub use events::{AssessmentEvent, EventBus, EventSeq, MemoryEventBus};
pub use provider::{
    AssessmentProvider, HttpProvider, HttpProviderConfig, LocalProvider, MockProbe, MockProvider,
    SlowMockProvider,
};
pub use session::{
    AssessmentSession, QuestionView, SessionPhase, SessionRunner, SessionView, TickOutcome,
};
