//! Tick sources for the countdown
//!
//! The countdown consumes an injectable [`TickSource`] rather than reading
//! the wall clock directly, so tests can advance virtual time
//! deterministically. [`IntervalTicker`] is the production source;
//! [`ManualTicker`] is driven explicitly through a [`ManualClock`] handle.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::{self, Interval};

/// Source of countdown ticks, one per elapsed second
#[async_trait]
pub trait TickSource: Send + 'static {
    /// Resolves once the next second has elapsed
    async fn tick(&mut self);
}

/// Wall-clock tick source backed by a tokio interval
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    /// One tick per second
    pub fn second() -> Self {
        Self::with_period(Duration::from_secs(1))
    }

    /// One tick per `period`
    ///
    /// The first tick fires after a full period, not immediately; missed
    /// ticks are delivered late rather than dropped so no countdown second
    /// is ever lost.
    pub fn with_period(period: Duration) -> Self {
        let interval = time::interval_at(time::Instant::now() + period, period);
        Self { interval }
    }
}

#[async_trait]
impl TickSource for IntervalTicker {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

/// Handle that drives a [`ManualTicker`]
#[derive(Clone)]
pub struct ManualClock {
    tx: mpsc::UnboundedSender<()>,
}

impl ManualClock {
    /// Advance virtual time by `seconds` ticks
    pub fn advance(&self, seconds: u32) {
        for _ in 0..seconds {
            let _ = self.tx.send(());
        }
    }
}

/// Test tick source that only ticks when its [`ManualClock`] advances
pub struct ManualTicker {
    rx: mpsc::UnboundedReceiver<()>,
}

impl ManualTicker {
    /// Create a ticker and the clock handle that drives it
    pub fn new() -> (ManualClock, ManualTicker) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ManualClock { tx }, ManualTicker { rx })
    }
}

#[async_trait]
impl TickSource for ManualTicker {
    async fn tick(&mut self) {
        if self.rx.recv().await.is_none() {
            // Clock handle dropped: time stands still
            std::future::pending::<()>().await;
        }
    }
}
