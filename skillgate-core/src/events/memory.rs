//! In-memory EventBus implementation

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::{RwLock, broadcast};

use super::AssessmentEvent;
use super::bus::{EventBus, EventSeq};

/// In-memory implementation of EventBus
///
/// Uses a Vec for historical storage (enabling replay) and a broadcast
/// channel for live subscribers. Thread-safe via RwLock and atomics.
pub struct MemoryEventBus {
    /// Stored events with sequence numbers
    events: RwLock<Vec<(EventSeq, AssessmentEvent)>>,
    /// Next sequence number to assign
    next_seq: AtomicU64,
    /// Broadcast channel for live subscribers
    tx: broadcast::Sender<(EventSeq, AssessmentEvent)>,
}

impl MemoryEventBus {
    /// Create a new MemoryEventBus with the given broadcast channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            events: RwLock::new(Vec::new()),
            next_seq: AtomicU64::new(0),
            tx,
        }
    }
}

#[async_trait]
impl EventBus for MemoryEventBus {
    async fn publish(&self, event: AssessmentEvent) -> EventSeq {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);

        // Store for replay
        self.events.write().await.push((seq, event.clone()));

        // Broadcast to live subscribers (ignore if no receivers)
        let _ = self.tx.send((seq, event));

        seq
    }

    fn subscribe(&self) -> broadcast::Receiver<(EventSeq, AssessmentEvent)> {
        self.tx.subscribe()
    }

    async fn events_from(&self, seq: EventSeq) -> Vec<(EventSeq, AssessmentEvent)> {
        self.events
            .read()
            .await
            .iter()
            .filter(|(s, _)| *s >= seq)
            .cloned()
            .collect()
    }

    async fn session_events(&self, session_id: &str) -> Vec<(EventSeq, AssessmentEvent)> {
        self.events
            .read()
            .await
            .iter()
            .filter(|(_, event)| event.session_id() == session_id)
            .cloned()
            .collect()
    }

    fn current_seq(&self) -> EventSeq {
        self.next_seq.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::super::bus::EventBus;
    use crate::events::AssessmentEvent;

    fn expired(session_id: &str) -> AssessmentEvent {
        AssessmentEvent::TimeExpired {
            session_id: session_id.to_string(),
        }
    }

    // ==================== Publish Tests ====================

    #[tokio::test]
    async fn publish_returns_incrementing_sequence_numbers() {
        let bus = super::MemoryEventBus::new(100);

        assert_eq!(bus.publish(expired("s1")).await, 0);
        assert_eq!(bus.publish(expired("s2")).await, 1);
        assert_eq!(bus.publish(expired("s3")).await, 2);
    }

    #[tokio::test]
    async fn current_seq_reflects_published_count() {
        let bus = super::MemoryEventBus::new(100);
        assert_eq!(bus.current_seq(), 0);

        bus.publish(expired("s1")).await;
        assert_eq!(bus.current_seq(), 1);

        bus.publish(expired("s2")).await;
        assert_eq!(bus.current_seq(), 2);
    }

    // ==================== Subscribe Tests ====================

    #[tokio::test]
    async fn subscribe_receives_new_events_in_order() {
        let bus = super::MemoryEventBus::new(100);
        let mut rx = bus.subscribe();

        bus.publish(expired("s1")).await;
        bus.publish(expired("s2")).await;

        let (seq1, event1) = rx.recv().await.unwrap();
        let (seq2, event2) = rx.recv().await.unwrap();

        assert_eq!(seq1, 0);
        assert_eq!(seq2, 1);
        assert_eq!(event1.session_id(), "s1");
        assert_eq!(event2.session_id(), "s2");
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_events() {
        let bus = super::MemoryEventBus::new(100);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(expired("s1")).await;

        let (seq1, _) = rx1.recv().await.unwrap();
        let (seq2, _) = rx2.recv().await.unwrap();

        assert_eq!(seq1, 0);
        assert_eq!(seq2, 0);
    }

    // ==================== Replay Tests ====================

    #[tokio::test]
    async fn events_from_returns_events_starting_at_seq() {
        let bus = super::MemoryEventBus::new(100);

        bus.publish(expired("s1")).await;
        bus.publish(expired("s2")).await;
        bus.publish(expired("s3")).await;

        let events = bus.events_from(1).await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].0, 1);
        assert_eq!(events[1].0, 2);
    }

    #[tokio::test]
    async fn events_from_beyond_current_returns_empty() {
        let bus = super::MemoryEventBus::new(100);
        bus.publish(expired("s1")).await;

        assert!(bus.events_from(100).await.is_empty());
    }

    // ==================== Session Events Tests ====================

    #[tokio::test]
    async fn session_events_filters_by_session_id() {
        let bus = super::MemoryEventBus::new(100);

        bus.publish(expired("s1")).await;
        bus.publish(expired("s2")).await;
        bus.publish(AssessmentEvent::ResultReceived {
            session_id: "s1".to_string(),
            score: 70,
            passed: true,
        })
        .await;

        assert_eq!(bus.session_events("s1").await.len(), 2);
        assert_eq!(bus.session_events("s2").await.len(), 1);
        assert!(bus.session_events("unknown").await.is_empty());
    }

    // ==================== Concurrent Access Tests ====================

    #[tokio::test]
    async fn concurrent_publish_maintains_sequence_integrity() {
        use std::sync::Arc;

        let bus = Arc::new(super::MemoryEventBus::new(1000));
        let mut handles = vec![];

        // Spawn 10 tasks each publishing 10 events
        for i in 0..10 {
            let bus = Arc::clone(&bus);
            handles.push(tokio::spawn(async move {
                for j in 0..10 {
                    bus.publish(expired(&format!("s{}-{}", i, j))).await;
                }
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(bus.current_seq(), 100);

        let all_events = bus.events_from(0).await;
        assert_eq!(all_events.len(), 100);

        let seqs: Vec<_> = all_events.iter().map(|(seq, _)| *seq).collect();
        for i in 0..100u64 {
            assert!(seqs.contains(&i), "Missing sequence {}", i);
        }
    }
}
