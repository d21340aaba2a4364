//! Raw host signals and the domain events derived from them.

use std::fmt;

use waypoint_protocol::{HostPlayer, ServerId};
use waypoint_session::Session;

// ---------------------------------------------------------------------------
// RawSignal
// ---------------------------------------------------------------------------

/// A connection or chat signal as the host proxy reports it.
///
/// Every reference is optional: during shutdown races the host sometimes
/// hands over events with the player or server missing. The dispatcher
/// drops those instead of failing.
#[derive(Debug, Clone)]
pub enum RawSignal {
    /// The player finished connecting to `server`. `previous` is the
    /// server they came from, or `None` for a fresh arrival on the proxy.
    Connected {
        player: Option<HostPlayer>,
        server: Option<ServerId>,
        previous: Option<ServerId>,
    },

    /// The player disconnected from the proxy.
    Disconnected { player: Option<HostPlayer> },

    /// The player sent a chat message.
    Chat {
        player: Option<HostPlayer>,
        message: String,
    },
}

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

/// The tag of a [`DomainEvent`], used to key hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PlayerJoin,
    PlayerSwitch,
    PlayerLeave,
    PlayerChat,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayerJoin => write!(f, "PLAYER_JOIN"),
            Self::PlayerSwitch => write!(f, "PLAYER_SWITCH"),
            Self::PlayerLeave => write!(f, "PLAYER_LEAVE"),
            Self::PlayerChat => write!(f, "PLAYER_CHAT"),
        }
    }
}

// ---------------------------------------------------------------------------
// DomainEvent
// ---------------------------------------------------------------------------

/// A notification handed to subscribers.
///
/// Only the dispatcher creates these. Each carries a snapshot of the
/// session taken right after the directory applied the change.
#[derive(Debug, Clone)]
pub enum DomainEvent {
    /// Arrived on the network.
    Join { session: Session },

    /// Moved between backend servers. `from` is the server left behind.
    Switch {
        session: Session,
        from: Option<ServerId>,
    },

    /// Left the network from `server`.
    Leave { session: Session, server: ServerId },

    /// Sent a chat message.
    Chat { session: Session, message: String },
}

impl DomainEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Join { .. } => EventKind::PlayerJoin,
            Self::Switch { .. } => EventKind::PlayerSwitch,
            Self::Leave { .. } => EventKind::PlayerLeave,
            Self::Chat { .. } => EventKind::PlayerChat,
        }
    }

    /// The session that triggered the event.
    pub fn session(&self) -> &Session {
        match self {
            Self::Join { session }
            | Self::Switch { session, .. }
            | Self::Leave { session, .. }
            | Self::Chat { session, .. } => session,
        }
    }

    /// The chat message, for `Chat` events.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Chat { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_display_matches_hook_names() {
        assert_eq!(EventKind::PlayerJoin.to_string(), "PLAYER_JOIN");
        assert_eq!(EventKind::PlayerChat.to_string(), "PLAYER_CHAT");
    }
}
