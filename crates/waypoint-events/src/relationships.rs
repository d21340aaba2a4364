//! Friend/relationship notifications.
//!
//! The relationship system itself (who is friends with whom, how they get
//! told) belongs to the host. Waypoint only tells it when a player
//! arrives, moves or leaves, through [`RelationshipTracker`].

use waypoint_protocol::ServerId;
use waypoint_session::Session;

use crate::{DomainEvent, EventError, Subscriber};

/// The host's relationship system.
pub trait RelationshipTracker: Send + Sync {
    /// The player arrived on the proxy.
    fn on_proxy_join(&self, session: &Session) -> Result<(), EventError>;

    /// The player moved to `session.connected_server` from `from`.
    fn on_server_change(
        &self,
        session: &Session,
        from: Option<&ServerId>,
    ) -> Result<(), EventError>;

    /// The player left the proxy from `server`.
    fn on_proxy_leave(
        &self,
        session: &Session,
        server: &ServerId,
    ) -> Result<(), EventError>;
}

/// Adapts a [`RelationshipTracker`] to the subscriber chain.
///
/// Register it under [`Stage::Relationships`](crate::Stage::Relationships)
/// so it is suppressed for vanished sessions.
pub struct RelationshipNotifier<T: RelationshipTracker> {
    tracker: T,
}

impl<T: RelationshipTracker> RelationshipNotifier<T> {
    pub fn new(tracker: T) -> Self {
        Self { tracker }
    }
}

impl<T: RelationshipTracker> Subscriber for RelationshipNotifier<T> {
    fn name(&self) -> &str {
        "relationships"
    }

    fn on_event(&self, event: &DomainEvent) -> Result<(), EventError> {
        match event {
            DomainEvent::Join { session } => self.tracker.on_proxy_join(session),
            DomainEvent::Switch { session, from } => {
                self.tracker.on_server_change(session, from.as_ref())
            }
            DomainEvent::Leave { session, server } => {
                self.tracker.on_proxy_leave(session, server)
            }
            DomainEvent::Chat { .. } => Ok(()),
        }
    }
}
