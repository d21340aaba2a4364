//! The subscriber seam: ordered, failure-isolated handlers.
//!
//! This is a minimal in-process message bus. Subscribers are plain trait
//! objects registered under a [`Stage`]; the dispatcher calls them one by
//! one in stage order. There is no inheritance and no shared state between
//! them: a subscriber that errors or panics only loses its own update.

use std::panic::{self, AssertUnwindSafe};

use crate::{DomainEvent, EventError};

/// Where in the fan-out a subscriber runs. Stages run in declaration
/// order; subscribers within a stage run in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Friend/relationship notifications. Suppressed for vanished
    /// sessions, since telling friends would reveal the player.
    Relationships,

    /// The audit trail. Runs for vanished sessions too: history is
    /// internal, not something other players can observe.
    History,

    /// Generic hooks registered by other plugins or host code.
    Hooks,
}

impl Stage {
    /// Whether subscribers in this stage are skipped for vanished
    /// sessions.
    pub fn hidden_while_vanished(self) -> bool {
        matches!(self, Self::Relationships)
    }
}

/// A handler for domain events.
///
/// # Trait bounds
///
/// - `Send + Sync` → the host may deliver events for different players on
///   different threads at the same time.
pub trait Subscriber: Send + Sync {
    /// A short name for logs.
    fn name(&self) -> &str;

    /// Handles one event. Errors are logged by the dispatcher and never
    /// stop the remaining subscribers.
    fn on_event(&self, event: &DomainEvent) -> Result<(), EventError>;
}

impl<T: Subscriber + ?Sized> Subscriber for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_event(&self, event: &DomainEvent) -> Result<(), EventError> {
        (**self).on_event(event)
    }
}

/// Runs `f`, turning a panic into [`EventError::Panicked`] and logging any
/// failure. The caller always moves on to the next handler.
pub(crate) fn run_isolated(
    name: &str,
    event: &DomainEvent,
    f: impl FnOnce() -> Result<(), EventError>,
) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|_| Err(EventError::Panicked(name.to_string())));

    if let Err(error) = outcome {
        tracing::warn!(
            subscriber = name,
            event = %event.kind(),
            player_id = %event.session().id(),
            %error,
            "subscriber failed, continuing fan-out"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_is_relationships_history_hooks() {
        let mut stages = vec![Stage::Hooks, Stage::Relationships, Stage::History];
        stages.sort();
        assert_eq!(
            stages,
            vec![Stage::Relationships, Stage::History, Stage::Hooks]
        );
    }

    #[test]
    fn test_only_relationships_hidden_while_vanished() {
        assert!(Stage::Relationships.hidden_while_vanished());
        assert!(!Stage::History.hidden_while_vanished());
        assert!(!Stage::Hooks.hidden_while_vanished());
    }
}
