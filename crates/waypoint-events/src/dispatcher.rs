//! The event dispatcher: raw host signals → directory → store → subscribers.
//!
//! One call to [`EventDispatcher::handle`] processes one host signal to
//! completion on the calling thread, except for store writes, which are
//! spawned. There is no queue and no cancellation: once a signal is
//! handed in, every subscriber sees the resulting event.

use std::sync::Arc;

use waypoint_protocol::{HostPlayer, ServerId};
use waypoint_session::{
    PresenceChange, PresenceProvider, SessionDirectory, Transition,
};

use crate::subscriber::run_isolated;
use crate::{DomainEvent, Persister, RawSignal, Stage, Store, Subscriber};

/// A subscriber together with the stage it runs in.
struct Registered {
    stage: Stage,
    subscriber: Box<dyn Subscriber>,
}

/// Turns raw host signals into domain events and fans them out.
///
/// For each signal, in order:
///
/// 1. the [`SessionDirectory`] applies the transition;
/// 2. the session is saved through the [`Persister`] (in the background);
/// 3. subscribers in hidden-while-vanished stages are skipped if the
///    session is vanished;
/// 4. the remaining subscribers run in [`Stage`] order, each isolated from
///    the others' failures.
///
/// Join, switch and leave processing requires an enabled store; with a
/// disabled store those signals are ignored outright. Chat is always
/// dispatched.
pub struct EventDispatcher<P: PresenceProvider, S: Store> {
    directory: Arc<SessionDirectory<P>>,
    persister: Persister<S>,
    /// Sorted by stage; registration order within a stage.
    subscribers: Vec<Registered>,
}

impl<P: PresenceProvider, S: Store> EventDispatcher<P, S> {
    /// Creates a dispatcher with no subscribers.
    pub fn new(
        directory: Arc<SessionDirectory<P>>,
        persister: Persister<S>,
    ) -> Self {
        Self {
            directory,
            persister,
            subscribers: Vec::new(),
        }
    }

    /// Adds a subscriber to `stage`.
    ///
    /// Stages always run in their fixed order, whatever order subscribers
    /// are added in.
    pub fn subscribe(
        &mut self,
        stage: Stage,
        subscriber: impl Subscriber + 'static,
    ) -> &mut Self {
        let slot = self
            .subscribers
            .partition_point(|registered| registered.stage <= stage);
        self.subscribers.insert(
            slot,
            Registered {
                stage,
                subscriber: Box::new(subscriber),
            },
        );
        self
    }

    /// The directory this dispatcher updates.
    pub fn directory(&self) -> &Arc<SessionDirectory<P>> {
        &self.directory
    }

    /// Names of registered subscribers, in the order they run.
    pub fn subscriber_names(&self) -> Vec<&str> {
        self.subscribers
            .iter()
            .map(|registered| registered.subscriber.name())
            .collect()
    }

    /// Processes one host signal.
    ///
    /// Returns the dispatched event, or `None` when the signal was dropped
    /// (incomplete payload, duplicate disconnect, store disabled). Nothing
    /// here returns an error to the host.
    pub fn handle(&self, signal: RawSignal) -> Option<DomainEvent> {
        let event = match signal {
            RawSignal::Connected {
                player,
                server,
                previous,
            } => self.connected(player.as_ref(), server.as_ref(), previous.as_ref())?,
            RawSignal::Disconnected { player } => self.disconnected(player.as_ref())?,
            RawSignal::Chat { player, message } => {
                let Some(player) = player else {
                    tracing::debug!("chat signal without a player, dropped");
                    return None;
                };
                DomainEvent::Chat {
                    session: self.directory.observe(&player),
                    message,
                }
            }
        };

        self.fan_out(&event);
        Some(event)
    }

    // -- Pipeline steps ---------------------------------------------------

    fn connected(
        &self,
        player: Option<&HostPlayer>,
        server: Option<&ServerId>,
        previous: Option<&ServerId>,
    ) -> Option<DomainEvent> {
        if !self.presence_enabled() {
            return None;
        }

        let result = match previous {
            None => self.directory.on_join(player, server),
            Some(from) => self.directory.on_switch(player, Some(from), server),
        };
        let transition = match result {
            Ok(transition) => transition,
            Err(error) => {
                tracing::debug!(%error, "connect signal dropped");
                return None;
            }
        };

        self.persister.save(transition.session.clone());
        into_event(transition)
    }

    fn disconnected(&self, player: Option<&HostPlayer>) -> Option<DomainEvent> {
        if !self.presence_enabled() {
            return None;
        }

        let transition = match self.directory.on_leave(player) {
            Ok(transition) => transition,
            Err(error) => {
                tracing::debug!(%error, "disconnect signal dropped");
                return None;
            }
        };

        self.persister.save(transition.session.clone());
        into_event(transition)
    }

    fn presence_enabled(&self) -> bool {
        let enabled = self.persister.is_enabled();
        if !enabled {
            tracing::debug!("store disabled, presence signal ignored");
        }
        enabled
    }

    fn fan_out(&self, event: &DomainEvent) {
        let vanished = event.session().vanished;

        for registered in &self.subscribers {
            let name = registered.subscriber.name();
            if vanished && registered.stage.hidden_while_vanished() {
                tracing::debug!(
                    subscriber = name,
                    player_id = %event.session().id(),
                    "skipped for vanished player"
                );
                continue;
            }
            run_isolated(name, event, || registered.subscriber.on_event(event));
        }
    }
}

/// Maps an applied transition to the event subscribers see.
fn into_event(transition: Transition) -> Option<DomainEvent> {
    let Transition {
        change,
        session,
        previous,
    } = transition;

    match change {
        PresenceChange::Join => Some(DomainEvent::Join { session }),
        PresenceChange::Switch => Some(DomainEvent::Switch {
            session,
            from: previous,
        }),
        PresenceChange::Leave => {
            let server = previous?;
            Some(DomainEvent::Leave { session, server })
        }
    }
}
