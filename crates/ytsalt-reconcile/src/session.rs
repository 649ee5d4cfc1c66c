//! The optimization session state machine.
//!
//! ```text
//!              start_category            resolve
//!   Idle ──────────────────────▶ Loading ─────────▶ Ready
//!    ▲                             │  ▲               │
//!    │          clear              │  │ start_category│
//!    └─────────────────────────────┤  └───────────────┤
//!                                  │ reject           │
//!                                  ▼                  │
//!                                Failed ◀─────────────┘
//! ```
//!
//! At most one category is in flight or ready at a time. Each `start_category`
//! issues a fresh [`RequestTicket`]; `resolve` and `reject` are accepted only
//! for the ticket the session is currently waiting on; answers to superseded
//! tickets are discarded as stale.
//!
//! The session exclusively owns the canonical [`MetadataRecord`]. It changes
//! only through [`OptimizationSession::apply`], which routes every suggestion
//! through the [`SuggestionApplier`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use ytsalt_core::{
    ApplyError, EventBus, MetadataRecord, SessionError, SessionEvent, Suggestion,
    SuggestionCategory, SuggestionEnvelope, SuggestionRequest, Transcript, UpstreamFailure,
};

use crate::applier::SuggestionApplier;
use crate::config::ReconcileConfig;
use crate::tags::TagReconciler;

/// Observable state of the session, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Identifies one optimization request. Returned by `start_category` and
/// presented back with the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestTicket {
    id: Uuid,
    category: SuggestionCategory,
}

impl RequestTicket {
    fn issue(category: SuggestionCategory) -> Self {
        Self {
            id: Uuid::now_v7(),
            category,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn category(&self) -> SuggestionCategory {
        self.category
    }
}

/// Outcome of presenting a response to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// The response was for the in-flight ticket and changed the state.
    Accepted,
    /// The ticket was superseded or cleared; state is unchanged.
    Stale,
}

#[derive(Debug, Clone)]
enum SessionState {
    Idle,
    Loading {
        ticket: RequestTicket,
    },
    Ready {
        ticket: RequestTicket,
        suggestions: Vec<Suggestion>,
    },
    Failed {
        ticket: RequestTicket,
        error: UpstreamFailure,
    },
}

impl SessionState {
    fn status(&self) -> SessionStatus {
        match self {
            Self::Idle => SessionStatus::Idle,
            Self::Loading { .. } => SessionStatus::Loading,
            Self::Ready { .. } => SessionStatus::Ready,
            Self::Failed { .. } => SessionStatus::Failed,
        }
    }

    fn ticket(&self) -> Option<&RequestTicket> {
        match self {
            Self::Idle => None,
            Self::Loading { ticket } | Self::Ready { ticket, .. } | Self::Failed { ticket, .. } => {
                Some(ticket)
            }
        }
    }
}

/// One user's optimization session over a single video's metadata.
#[derive(Debug)]
pub struct OptimizationSession {
    id: Uuid,
    record: MetadataRecord,
    transcript: Option<Transcript>,
    applier: SuggestionApplier,
    require_transcript: bool,
    events: Option<EventBus>,
    state: SessionState,
}

impl OptimizationSession {
    /// Create a session with default limits and no event bus.
    pub fn new(record: MetadataRecord, transcript: Option<Transcript>) -> Self {
        Self::build(record, transcript, &ReconcileConfig::default())
    }

    /// Create a session from a validated `config`, publishing on an event bus
    /// sized by `config.event_capacity`.
    pub fn with_config(
        record: MetadataRecord,
        transcript: Option<Transcript>,
        config: &ReconcileConfig,
    ) -> ytsalt_core::Result<Self> {
        config.validate()?;
        Ok(Self::build(record, transcript, config).with_event_bus(config.event_bus()))
    }

    fn build(
        record: MetadataRecord,
        transcript: Option<Transcript>,
        config: &ReconcileConfig,
    ) -> Self {
        let id = Uuid::now_v7();
        info!(
            subsystem = "reconcile",
            component = "session",
            session_id = %id,
            tag_count = record.tags.len(),
            has_transcript = transcript.as_ref().is_some_and(Transcript::is_available),
            "Session created"
        );
        Self {
            id,
            record,
            transcript,
            applier: SuggestionApplier::new(TagReconciler::new(config.tag_budget)),
            require_transcript: config.require_transcript,
            events: None,
            state: SessionState::Idle,
        }
    }

    /// Publish state transitions on `bus`.
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn event_bus(&self) -> Option<&EventBus> {
        self.events.as_ref()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn record(&self) -> &MetadataRecord {
        &self.record
    }

    pub fn transcript(&self) -> Option<&Transcript> {
        self.transcript.as_ref()
    }

    /// True when a transcript with non-blank text is held.
    pub fn has_transcript(&self) -> bool {
        self.transcript.as_ref().is_some_and(Transcript::is_available)
    }

    pub fn set_transcript(&mut self, transcript: Option<Transcript>) {
        self.transcript = transcript;
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status()
    }

    /// Category of the in-flight or most recent request; `None` when idle.
    pub fn active_category(&self) -> Option<SuggestionCategory> {
        self.state.ticket().map(RequestTicket::category)
    }

    /// Ticket of the in-flight or most recent request; `None` when idle.
    pub fn active_ticket(&self) -> Option<RequestTicket> {
        self.state.ticket().copied()
    }

    /// Suggestions of the ready category.
    pub fn suggestions(&self) -> Option<&[Suggestion]> {
        match &self.state {
            SessionState::Ready { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }

    pub fn last_error(&self) -> Option<&UpstreamFailure> {
        match &self.state {
            SessionState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn budget(&self) -> usize {
        self.applier.tag_reconciler().budget()
    }

    /// Begin an optimization for `category`, discarding any previous result.
    ///
    /// Fails with `PreconditionUnmet` before anything changes when the
    /// category needs a transcript and none is held.
    #[instrument(skip(self), fields(subsystem = "reconcile", component = "session", op = "start_category", session_id = %self.id))]
    pub fn start_category(
        &mut self,
        category: SuggestionCategory,
    ) -> Result<RequestTicket, SessionError> {
        if self.require_transcript && category.requires_transcript() && !self.has_transcript() {
            warn!("Optimization rejected: transcript required");
            return Err(SessionError::PreconditionUnmet { category });
        }

        if let Some(previous) = self.state.ticket() {
            debug!(
                previous_request = %previous.id,
                previous_status = ?self.state.status(),
                "Superseding previous request"
            );
        }

        let ticket = RequestTicket::issue(category);
        self.state = SessionState::Loading { ticket };
        info!(request_id = %ticket.id, "Optimization started");
        self.emit(SessionEvent::OptimizationStarted {
            request_id: ticket.id,
            category,
        });
        Ok(ticket)
    }

    /// Snapshot of what the generation service needs for `ticket`.
    ///
    /// The transcript is attached only when it has content.
    pub fn request_snapshot(&self, ticket: &RequestTicket) -> SuggestionRequest {
        SuggestionRequest {
            request_id: ticket.id,
            category: ticket.category,
            record: self.record.clone(),
            transcript: self.transcript.clone().filter(Transcript::is_available),
        }
    }

    /// Deliver suggestions for `ticket`.
    ///
    /// Suggestions of another category are dropped.
    #[instrument(skip_all, fields(subsystem = "reconcile", component = "session", op = "resolve", session_id = %self.id, request_id = %ticket.id, category = %ticket.category))]
    pub fn resolve(&mut self, ticket: &RequestTicket, suggestions: Vec<Suggestion>) -> Resolution {
        if !self.is_current(ticket) {
            return self.discard_stale(ticket);
        }

        let received = suggestions.len();
        let suggestions: Vec<Suggestion> = suggestions
            .into_iter()
            .filter(|s| s.category() == ticket.category)
            .collect();
        if suggestions.len() != received {
            warn!(
                dropped = received - suggestions.len(),
                "Dropped suggestions of a different category"
            );
        }

        let suggestion_count = suggestions.len();
        self.state = SessionState::Ready {
            ticket: *ticket,
            suggestions,
        };
        info!(suggestion_count, "Optimization ready");
        self.emit(SessionEvent::OptimizationReady {
            request_id: ticket.id,
            category: ticket.category,
            suggestion_count,
        });
        Resolution::Accepted
    }

    /// Record a generation failure for `ticket`.
    #[instrument(skip_all, fields(subsystem = "reconcile", component = "session", op = "reject", session_id = %self.id, request_id = %ticket.id, category = %ticket.category))]
    pub fn reject(&mut self, ticket: &RequestTicket, error: UpstreamFailure) -> Resolution {
        if !self.is_current(ticket) {
            return self.discard_stale(ticket);
        }

        info!(error = %error.message, "Optimization failed");
        self.emit(SessionEvent::OptimizationFailed {
            request_id: ticket.id,
            category: ticket.category,
            error: error.message.clone(),
        });
        self.state = SessionState::Failed {
            ticket: *ticket,
            error,
        };
        Resolution::Accepted
    }

    /// Feed a raw service envelope for `ticket` through intake, then resolve
    /// or reject.
    pub fn complete(&mut self, ticket: &RequestTicket, envelope: SuggestionEnvelope) -> Resolution {
        match envelope.into_suggestions(ticket.category) {
            Ok(suggestions) => self.resolve(ticket, suggestions),
            Err(failure) => self.reject(ticket, failure),
        }
    }

    /// Return to idle from any state. A response still in flight becomes stale.
    pub fn clear(&mut self) {
        self.state = SessionState::Idle;
        info!(
            subsystem = "reconcile",
            component = "session",
            op = "clear",
            session_id = %self.id,
            "Session cleared"
        );
        self.emit(SessionEvent::SessionCleared);
    }

    /// Apply `suggestion` to the owned record.
    ///
    /// On error the record is unchanged.
    #[instrument(skip_all, fields(subsystem = "reconcile", component = "session", op = "apply", session_id = %self.id, category = %suggestion.category()))]
    pub fn apply(&mut self, suggestion: &Suggestion) -> Result<&MetadataRecord, ApplyError> {
        let updated = match self.applier.apply(&self.record, suggestion) {
            Ok(updated) => updated,
            Err(e) => {
                warn!(error = %e, "Suggestion not applied");
                return Err(e);
            }
        };

        for violation in updated.check_invariants(self.budget()) {
            warn!(?violation, "Record invariant violated after apply");
        }

        self.record = updated;
        info!(
            tag_count = self.record.tags.len(),
            title_len = self.record.title_stats().length,
            "Suggestion applied"
        );
        self.emit(SessionEvent::RecordUpdated {
            category: suggestion.category(),
            title: self.record.title.clone(),
            tag_count: self.record.tags.len(),
        });
        Ok(&self.record)
    }

    /// Apply the ready suggestion at `index`.
    pub fn apply_ready(&mut self, index: usize) -> Result<&MetadataRecord, ApplyError> {
        let suggestion = self
            .suggestions()
            .and_then(|s| s.get(index))
            .cloned()
            .ok_or(ApplyError::SuggestionNotFound(index))?;
        self.apply(&suggestion)
    }

    fn is_current(&self, ticket: &RequestTicket) -> bool {
        matches!(&self.state, SessionState::Loading { ticket: current } if current == ticket)
    }

    fn discard_stale(&self, ticket: &RequestTicket) -> Resolution {
        warn!(
            current_request = ?self.state.ticket().map(RequestTicket::id),
            status = ?self.state.status(),
            "Discarding stale response"
        );
        self.emit(SessionEvent::StaleResponseDiscarded {
            request_id: ticket.id,
            category: ticket.category,
        });
        Resolution::Stale
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(bus) = &self.events {
            bus.emit(self.id, event);
        }
    }
}
