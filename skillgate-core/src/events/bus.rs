//! EventBus trait definition
//!
//! The bus decouples the session from whatever renders it: the session
//! publishes, late joiners replay from a sequence number, live observers
//! subscribe to the broadcast stream.

use async_trait::async_trait;
use tokio::sync::broadcast;

use super::AssessmentEvent;

/// Sequence number for events (monotonically increasing)
pub type EventSeq = u64;

/// Event bus for publishing and subscribing to assessment events
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Publish an event, returns its sequence number
    async fn publish(&self, event: AssessmentEvent) -> EventSeq;

    /// Subscribe to all events from now (live stream)
    fn subscribe(&self) -> broadcast::Receiver<(EventSeq, AssessmentEvent)>;

    /// Get all events starting from a sequence number (for replay)
    async fn events_from(&self, seq: EventSeq) -> Vec<(EventSeq, AssessmentEvent)>;

    /// Get all events for a specific session (for late joiners)
    async fn session_events(&self, session_id: &str) -> Vec<(EventSeq, AssessmentEvent)>;

    /// Current sequence number (high water mark)
    fn current_seq(&self) -> EventSeq;
}
