//! Session event types, envelope schema, and event bus.
//!
//! The optimization session emits one event per state transition so the
//! presentation layer can re-render without polling. Each emission is wrapped
//! in a [`SessionEventEnvelope`] carrying a UUIDv7 event id and timestamp.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::SuggestionCategory;

// ============================================================================
// Session Event (domain payloads)
// ============================================================================

/// Serialized with a `type` tag, e.g.
/// `{"type":"OptimizationReady","request_id":"...","category":"tags","suggestion_count":12}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    OptimizationStarted {
        request_id: Uuid,
        category: SuggestionCategory,
    },
    OptimizationReady {
        request_id: Uuid,
        category: SuggestionCategory,
        suggestion_count: usize,
    },
    OptimizationFailed {
        request_id: Uuid,
        category: SuggestionCategory,
        error: String,
    },
    /// A response arrived for a superseded request and was discarded.
    StaleResponseDiscarded {
        request_id: Uuid,
        category: SuggestionCategory,
    },
    SessionCleared,
    /// A suggestion was applied to the canonical record.
    RecordUpdated {
        category: SuggestionCategory,
        title: String,
        tag_count: usize,
    },
}

impl SessionEvent {
    /// Dot-namespaced event type for the envelope (e.g., `"optimization.ready"`).
    pub fn namespaced_event_type(&self) -> &'static str {
        match self {
            SessionEvent::OptimizationStarted { .. } => "optimization.started",
            SessionEvent::OptimizationReady { .. } => "optimization.ready",
            SessionEvent::OptimizationFailed { .. } => "optimization.failed",
            SessionEvent::StaleResponseDiscarded { .. } => "optimization.stale",
            SessionEvent::SessionCleared => "optimization.cleared",
            SessionEvent::RecordUpdated { .. } => "record.updated",
        }
    }

    /// Request ticket the event relates to, if any.
    pub fn request_id(&self) -> Option<Uuid> {
        match self {
            SessionEvent::OptimizationStarted { request_id, .. }
            | SessionEvent::OptimizationReady { request_id, .. }
            | SessionEvent::OptimizationFailed { request_id, .. }
            | SessionEvent::StaleResponseDiscarded { request_id, .. } => Some(*request_id),
            SessionEvent::SessionCleared | SessionEvent::RecordUpdated { .. } => None,
        }
    }
}

// ============================================================================
// Envelope
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SessionEventEnvelope {
    /// Unique event identifier (UUIDv7 for temporal ordering).
    pub event_id: Uuid,
    pub event_type: String,
    pub occurred_at: DateTime<Utc>,
    pub session_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Uuid>,
    pub payload: SessionEvent,
}

impl SessionEventEnvelope {
    pub fn new(session_id: Uuid, event: SessionEvent) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            event_type: event.namespaced_event_type().to_string(),
            occurred_at: Utc::now(),
            session_id,
            request_id: event.request_id(),
            payload: event,
        }
    }
}

// ============================================================================
// Event Bus
// ============================================================================

/// Broadcast-based bus distributing session events to any number of consumers.
///
/// Slow receivers that fall behind get a `Lagged` error and miss events.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SessionEventEnvelope>,
}

impl EventBus {
    /// Create a new event bus with the given buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Emit an event to all subscribers. Without subscribers the event is dropped.
    pub fn emit(&self, session_id: Uuid, event: SessionEvent) {
        let envelope = SessionEventEnvelope::new(session_id, event);
        let subscriber_count = self.tx.receiver_count();
        tracing::debug!(
            subsystem = "events",
            event_type = %envelope.event_type,
            event_id = %envelope.event_id,
            subscriber_count,
            "EventBus emit"
        );
        let _ = self.tx.send(envelope);
    }

    /// Subscribe to receive enveloped events. Each subscriber gets its own independent stream.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEventEnvelope> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(crate::defaults::EVENT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus_emit_subscribe() {
        let bus = EventBus::new(32);
        let mut rx = bus.subscribe();
        let session_id = Uuid::now_v7();
        let request_id = Uuid::now_v7();

        bus.emit(
            session_id,
            SessionEvent::OptimizationReady {
                request_id,
                category: SuggestionCategory::Tags,
                suggestion_count: 3,
            },
        );

        let envelope = rx.recv().await.unwrap();
        assert_eq!(envelope.event_type, "optimization.ready");
        assert_eq!(envelope.session_id, session_id);
        assert_eq!(envelope.request_id, Some(request_id));
        assert!(matches!(
            envelope.payload,
            SessionEvent::OptimizationReady {
                suggestion_count: 3,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_event_bus_multiple_subscribers() {
        let bus = EventBus::new(32);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.emit(Uuid::nil(), SessionEvent::SessionCleared);

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();
        assert_eq!(e1.event_type, "optimization.cleared");
        assert_eq!(e2.event_type, "optimization.cleared");
        assert!(e1.request_id.is_none());
    }

    #[tokio::test]
    async fn test_event_bus_no_subscribers_ok() {
        let bus = EventBus::new(32);
        bus.emit(Uuid::nil(), SessionEvent::SessionCleared);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_envelope_serialization() {
        let envelope = SessionEventEnvelope::new(
            Uuid::nil(),
            SessionEvent::StaleResponseDiscarded {
                request_id: Uuid::nil(),
                category: SuggestionCategory::Title,
            },
        );
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["event_type"], "optimization.stale");
        assert_eq!(json["payload"]["type"], "StaleResponseDiscarded");
        assert_eq!(json["payload"]["category"], "title");
    }

    #[test]
    fn test_namespaced_event_types_are_unique() {
        let events = [
            SessionEvent::OptimizationStarted {
                request_id: Uuid::nil(),
                category: SuggestionCategory::Title,
            },
            SessionEvent::OptimizationReady {
                request_id: Uuid::nil(),
                category: SuggestionCategory::Title,
                suggestion_count: 0,
            },
            SessionEvent::OptimizationFailed {
                request_id: Uuid::nil(),
                category: SuggestionCategory::Title,
                error: String::new(),
            },
            SessionEvent::StaleResponseDiscarded {
                request_id: Uuid::nil(),
                category: SuggestionCategory::Title,
            },
            SessionEvent::SessionCleared,
            SessionEvent::RecordUpdated {
                category: SuggestionCategory::Title,
                title: String::new(),
                tag_count: 0,
            },
        ];
        let mut types: Vec<_> = events.iter().map(|e| e.namespaced_event_type()).collect();
        types.sort_unstable();
        types.dedup();
        assert_eq!(types.len(), events.len());
    }
}
