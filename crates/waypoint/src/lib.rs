//! # Waypoint
//!
//! Live presence and visibility for a multi-server proxy.
//!
//! Waypoint tracks which player is on which backend server, fans presence
//! changes out to ordered subscribers, and answers the `find` and `list`
//! directory commands while honouring vanish state. The host supplies the
//! collaborators: a [`PresenceProvider`] over its live player list, a
//! [`Store`], a [`TemplateParser`] and an [`Outbox`] for replies.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use waypoint::prelude::*;
//!
//! // Implement PresenceProvider for your proxy, then:
//! // let waypoint = Waypoint::builder(host)
//! //     .store(my_store)
//! //     .build(my_outbox)?;
//! // waypoint.handle(RawSignal::Connected { .. });
//! // waypoint.run("find", &Channel::Player(handle), &["Bob"]);
//! ```

mod channel;
mod commands;
mod config;
mod error;
mod system;

pub use channel::{Channel, Outbox, CONSOLE_TARGET};
pub use commands::{CommandContext, CommandStatus, FindCommand, ListCommand, LIST_TOKEN};
pub use config::WaypointConfig;
pub use error::WaypointError;
pub use system::{Waypoint, WaypointBuilder};

pub use waypoint_events::{DomainEvent, RawSignal, Store};
pub use waypoint_roster::TemplateParser;
pub use waypoint_session::PresenceProvider;

/// Everything a host needs to embed Waypoint.
pub mod prelude {
    pub use crate::{
        Channel, CommandStatus, Outbox, Waypoint, WaypointConfig,
        WaypointError,
    };
    pub use waypoint_events::{
        DisabledStore, DomainEvent, EventError, EventKind, RawSignal,
        RelationshipTracker, Stage, Store, Subscriber,
    };
    pub use waypoint_protocol::{
        HistoryEntry, HostPlayer, Identity, PlayerId, ServerId,
        TransitionKind,
    };
    pub use waypoint_roster::{
        FindConfig, ListConfig, NoPlaceholders, RosterTier, TemplateParser,
    };
    pub use waypoint_session::{PresenceProvider, Session};
}
