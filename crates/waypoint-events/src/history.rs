//! The history logger: forwards each new history entry to the store.

use waypoint_protocol::TransitionKind;

use crate::{DomainEvent, EventError, Persister, Store, Subscriber};

/// Persists the history entry written by a join or a leave.
///
/// The directory already keeps history in memory; this subscriber makes
/// it durable. It runs for vanished sessions too. Switches write no
/// history, so they are ignored, as are chat events.
pub struct HistoryLogger<S: Store> {
    persister: Persister<S>,
}

impl<S: Store> HistoryLogger<S> {
    pub fn new(persister: Persister<S>) -> Self {
        Self { persister }
    }
}

impl<S: Store> Subscriber for HistoryLogger<S> {
    fn name(&self) -> &str {
        "history"
    }

    fn on_event(&self, event: &DomainEvent) -> Result<(), EventError> {
        let expected = match event {
            DomainEvent::Join { .. } => TransitionKind::Join,
            DomainEvent::Leave { .. } => TransitionKind::Leave,
            DomainEvent::Switch { .. } | DomainEvent::Chat { .. } => {
                return Ok(());
            }
        };

        let session = event.session();
        let entry = session
            .last_history()
            .filter(|entry| entry.kind == expected)
            .ok_or_else(|| EventError::Subscriber {
                name: self.name().to_string(),
                reason: format!("no {expected} entry for {}", session.id()),
            })?;

        tracing::debug!(
            player_id = %session.id(),
            server = %entry.server,
            kind = %entry.kind,
            "history entry recorded"
        );
        self.persister.append_history(session.id(), entry.clone());
        Ok(())
    }
}
