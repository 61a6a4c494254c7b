//! SessionRunner: countdown driver and teardown fence
//!
//! The runner owns the shared session, at most one live countdown task,
//! and the cancellation token that fences every operation after teardown.
//! The countdown consumes an injected [`TickSource`], applies one session
//! tick per elapsed second, and forces exactly one submission when the
//! countdown expires.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::clock::TickSource;
use crate::error::SessionError;
use crate::events::EventBus;
use crate::provider::AssessmentProvider;
use crate::session::state::{AssessmentSession, SessionPhase, TickOutcome};
use crate::session::view::SessionView;

struct TimerHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Drives one [`AssessmentSession`]: countdown scheduling, forced submit,
/// and teardown.
pub struct SessionRunner {
    session: Arc<RwLock<AssessmentSession>>,
    shutdown: CancellationToken,
    timer: Mutex<Option<TimerHandle>>,
}

impl SessionRunner {
    /// Create a runner around a fresh session
    pub fn new(provider: Box<dyn AssessmentProvider>, event_bus: Arc<dyn EventBus>) -> Self {
        Self {
            session: Arc::new(RwLock::new(AssessmentSession::new(provider, event_bus))),
            shutdown: CancellationToken::new(),
            timer: Mutex::new(None),
        }
    }

    /// Get the session ID
    pub async fn id(&self) -> String {
        self.session.read().await.id().to_string()
    }

    /// Fetch the assessment for `skill`, discarding any prior session state
    ///
    /// Any live countdown is cancelled first so a stale timer can never
    /// force a submission against the new assessment.
    pub async fn load(&self, skill: &str) -> Result<(), SessionError> {
        self.ensure_active()?;
        self.stop_timer().await;
        self.session.write().await.load(skill).await
    }

    /// Start the assessment and begin the countdown on `ticker`
    pub async fn start<T: TickSource>(&self, ticker: T) -> Result<(), SessionError> {
        self.ensure_active()?;
        self.session.write().await.start().await?;
        self.spawn_countdown(ticker).await;
        Ok(())
    }

    /// Begin the countdown for an assessment that resumed straight into
    /// running (server-reported `in_progress` status)
    pub async fn resume<T: TickSource>(&self, ticker: T) -> Result<(), SessionError> {
        self.ensure_active()?;
        {
            let session = self.session.read().await;
            if session.phase() != SessionPhase::Running {
                return Err(SessionError::InvalidState {
                    expected: "running".to_string(),
                    actual: session.phase().name().to_string(),
                });
            }
        }
        self.spawn_countdown(ticker).await;
        Ok(())
    }

    /// Select an option for a question
    pub async fn select_option(
        &self,
        question_id: &str,
        option_id: &str,
    ) -> Result<(), SessionError> {
        self.ensure_active()?;
        self.session
            .write()
            .await
            .select_option(question_id, option_id)
            .await
    }

    /// Jump to a question by index, clamping into range
    pub async fn go_to(&self, index: usize) -> Result<(), SessionError> {
        self.ensure_active()?;
        self.session.write().await.go_to(index);
        Ok(())
    }

    /// Advance to the next question
    pub async fn next(&self) -> Result<(), SessionError> {
        self.ensure_active()?;
        self.session.write().await.next();
        Ok(())
    }

    /// Go back to the previous question
    pub async fn previous(&self) -> Result<(), SessionError> {
        self.ensure_active()?;
        self.session.write().await.previous();
        Ok(())
    }

    /// Submit manually
    ///
    /// The countdown is stopped afterwards regardless of outcome; a failed
    /// submission leaves the session in its recoverable failed phase with
    /// all answers intact.
    pub async fn submit(&self) -> Result<(), SessionError> {
        self.ensure_active()?;
        let outcome = self.session.write().await.submit().await;
        self.stop_timer().await;
        outcome
    }

    /// Build an owned snapshot of the session
    pub async fn view(&self) -> SessionView {
        self.session.read().await.view()
    }

    /// Tear the session down
    ///
    /// Cancels the countdown task and waits for it to finish, then fences
    /// all further operations with [`SessionError::Terminated`]. No state
    /// mutation can land after this returns.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        let handle = self.timer.lock().await.take();
        if let Some(handle) = handle {
            handle.cancel.cancel();
            handle.task.abort();
            let _ = handle.task.await;
        }
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        if self.shutdown.is_cancelled() {
            return Err(SessionError::Terminated);
        }
        Ok(())
    }

    async fn stop_timer(&self) {
        if let Some(handle) = self.timer.lock().await.take() {
            handle.cancel.cancel();
            handle.task.abort();
        }
    }

    /// Spawn the countdown task, replacing any live one
    async fn spawn_countdown<T: TickSource>(&self, mut ticker: T) {
        let mut guard = self.timer.lock().await;
        if let Some(prev) = guard.take() {
            prev.cancel.cancel();
            prev.task.abort();
        }

        let session = Arc::clone(&self.session);
        let cancel = self.shutdown.child_token();
        let task_cancel = cancel.clone();
        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = task_cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        let outcome = session.write().await.tick().await;
                        match outcome {
                            TickOutcome::Running { .. } => {}
                            // The session left the running phase; the countdown is done
                            TickOutcome::Idle => break,
                            TickOutcome::Expired => {
                                if let Err(error) = session.write().await.submit().await {
                                    tracing::error!(error = %error, "timer-forced submission failed");
                                }
                                break;
                            }
                        }
                    }
                }
            }
        });
        *guard = Some(TimerHandle { cancel, task });
    }
}

impl Drop for SessionRunner {
    fn drop(&mut self) {
        // Cancelling the parent token stops any live countdown task
        self.shutdown.cancel();
    }
}
