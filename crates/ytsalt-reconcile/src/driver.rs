//! Async glue between a shared session and the suggestion provider.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{instrument, warn};
use ytsalt_core::{Result, SuggestionCategory, SuggestionProvider, UpstreamFailure};

use crate::session::{OptimizationSession, Resolution};

/// Session handle shared between the presentation layer and in-flight requests.
pub type SharedSession = Arc<Mutex<OptimizationSession>>;

pub fn shared(session: OptimizationSession) -> SharedSession {
    Arc::new(Mutex::new(session))
}

/// Run one optimization round for `category`.
///
/// The session lock is released while the provider works, so a later call
/// may supersede this one; this call then returns [`Resolution::Stale`].
/// A provider error is recorded on the session as `Failed` and is not
/// returned. Only a precondition failure is returned as `Err`, before the
/// provider is called.
#[instrument(skip_all, fields(subsystem = "reconcile", component = "driver", op = "optimize", category = %category))]
pub async fn optimize(
    session: &SharedSession,
    provider: &dyn SuggestionProvider,
    category: SuggestionCategory,
) -> Result<Resolution> {
    let (ticket, request) = {
        let mut guard = session.lock().await;
        let ticket = guard.start_category(category)?;
        let request = guard.request_snapshot(&ticket);
        (ticket, request)
    };

    let outcome = provider.suggest(&request).await;

    let mut guard = session.lock().await;
    let resolution = match outcome {
        Ok(suggestions) => guard.resolve(&ticket, suggestions),
        Err(e) => {
            warn!(request_id = %ticket.id(), error = %e, "Suggestion provider failed");
            guard.reject(&ticket, UpstreamFailure::from(&e))
        }
    };
    Ok(resolution)
}
