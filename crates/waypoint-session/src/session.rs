//! Session types: the directory's record of one identity's presence.
//!
//! A "session" is Waypoint's record of a player it has seen. It tracks:
//! - WHO the player is (`Identity`)
//! - WHERE they are right now (`connected_server`, `None` when offline)
//! - WHETHER ordinary viewers may see them (`vanished`, `can_vanish`)
//! - WHERE they have been (`history`, append-only)
//!
//! Sessions are never deleted. A player who leaves keeps their session
//! with `connected_server == None`, so history survives for later queries.

use serde::{Deserialize, Serialize};
use waypoint_protocol::{
    HistoryEntry, HostPlayer, Identity, PlayerId, ServerId, TransitionKind,
};

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One identity's current and historical presence.
///
/// Values handed out by [`SessionDirectory`](crate::SessionDirectory) are
/// snapshots: cloning a session copies its state at the instant of the
/// read, and later transitions don't affect the copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Who this session belongs to.
    pub identity: Identity,

    /// The backend server the player is on. At most one at a time.
    pub connected_server: Option<ServerId>,

    /// Hidden from ordinary viewers. Mirrored from the host, never set by
    /// Waypoint itself.
    pub vanished: bool,

    /// Eligible to vanish. Viewers with this flag may be shown vanished
    /// peers when a command allows it.
    pub can_vanish: bool,

    /// Append-only join/leave audit trail. Private so the only way to
    /// change it is [`Session::record`], which only ever pushes.
    history: Vec<HistoryEntry>,

    /// `true` when `connected_server` was adopted from a host lookup
    /// rather than set by a join/switch transition.
    #[serde(skip)]
    adopted: bool,
}

impl Session {
    /// Creates an offline session from the host's view of the player.
    pub(crate) fn from_host(host: &HostPlayer) -> Self {
        Self {
            identity: host.identity.clone(),
            connected_server: None,
            vanished: host.vanished,
            can_vanish: host.can_vanish,
            history: Vec::new(),
            adopted: false,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.identity.id
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    /// `true` while the player is on some backend server.
    pub fn is_connected(&self) -> bool {
        self.connected_server.is_some()
    }

    /// The recorded join/leave history, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// The most recent history entry, if any.
    pub fn last_history(&self) -> Option<&HistoryEntry> {
        self.history.last()
    }

    /// Appends a history entry for `server`. Entries are never removed or
    /// reordered.
    pub(crate) fn record(&mut self, server: ServerId, kind: TransitionKind) {
        self.history.push(HistoryEntry::now(server, kind));
    }

    /// Copies host-owned fields (display name, vanish flags) from the
    /// latest host handle. The id is the key and never changes.
    pub(crate) fn refresh(&mut self, host: &HostPlayer) {
        if self.identity.name != host.identity.name {
            self.identity = host.identity.clone();
        }
        self.vanished = host.vanished;
        self.can_vanish = host.can_vanish;
    }

    /// Takes the host's server for a session that has none, without
    /// recording history. Used when a lookup finds a connected player
    /// before any transition for them has been processed.
    pub(crate) fn adopt(&mut self, server: &ServerId) {
        if self.connected_server.is_none() {
            self.connected_server = Some(server.clone());
            self.adopted = true;
        }
    }

    /// Drops a server that was only adopted, never joined. Returns whether
    /// anything was dropped.
    pub(crate) fn release_adopted(&mut self) -> bool {
        if !self.adopted {
            return false;
        }
        self.adopted = false;
        self.connected_server = None;
        true
    }

    pub(crate) fn is_adopted(&self) -> bool {
        self.adopted
    }

    /// Moves the session to `server`, returning the server it was on.
    pub(crate) fn move_to(&mut self, server: ServerId) -> Option<ServerId> {
        self.adopted = false;
        self.connected_server.replace(server)
    }

    /// Clears the connected server, returning it.
    pub(crate) fn disconnect(&mut self) -> Option<ServerId> {
        self.adopted = false;
        self.connected_server.take()
    }
}

// ---------------------------------------------------------------------------
// Transition
// ---------------------------------------------------------------------------

/// Which presence change a directory operation actually applied.
///
/// This can differ from the operation that was called: a join for a
/// session that is already on a server is applied as a `Switch`, and a
/// switch for a session the directory believed offline is applied as a
/// `Join`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceChange {
    Join,
    Switch,
    Leave,
}

impl std::fmt::Display for PresenceChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Join => write!(f, "join"),
            Self::Switch => write!(f, "switch"),
            Self::Leave => write!(f, "leave"),
        }
    }
}

/// The result of a successful directory transition.
#[derive(Debug, Clone)]
pub struct Transition {
    /// What was applied.
    pub change: PresenceChange,
    /// Snapshot of the session after the change.
    pub session: Session,
    /// The server the session was on before the change, if any. For a
    /// `Leave` this is the server that was left.
    pub previous: Option<ServerId>,
}
