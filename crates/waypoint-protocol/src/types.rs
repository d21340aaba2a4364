//! Core identity and history types for Waypoint.
//!
//! Everything in here is plain data: ids, names, and the audit entries a
//! session accumulates as it moves between backend servers. These types are
//! created by the host adapter or the session directory and passed around
//! by value (or cheap clone), with no locking, no interior mutability.

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// The stable, unique identifier of a player.
///
/// A newtype around `u64` so a `PlayerId` can never be confused with any
/// other number flowing through the system. The host assigns it; the
/// directory keys every session by it.
///
/// `#[serde(transparent)]` serializes `PlayerId(42)` as just `42`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

/// `PlayerId(42)` prints as `P-42` in logs and templates.
impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// Parses either the bare number (`42`) or the display form (`P-42`).
///
/// This is what lets `find` accept an id where a name would normally go:
/// if the argument parses, it is tried as an exact id first.
impl FromStr for PlayerId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("P-")
            .or_else(|| s.strip_prefix("p-"))
            .unwrap_or(s);
        digits
            .parse::<u64>()
            .map(PlayerId)
            .map_err(|_| ProtocolError::InvalidPlayerId(s.to_string()))
    }
}

/// An opaque identifier for a backend server (e.g. `"lobby"`, `"survival"`).
///
/// The core never inspects it beyond equality; it is whatever name the
/// host proxy registered the server under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerId(String);

impl ServerId {
    /// Creates a server id, rejecting the empty string.
    pub fn new(name: impl Into<String>) -> Result<Self, ProtocolError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ProtocolError::EmptyServerName);
        }
        Ok(Self(name))
    }

    /// The server's registered name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who a player is: their stable id plus the name they display.
///
/// Immutable once created. If the host later reports a different display
/// name for the same id, the directory replaces the whole `Identity`
/// rather than mutating it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Stable key.
    pub id: PlayerId,
    /// Display name as reported by the host.
    pub name: String,
}

impl Identity {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// The kind of presence transition recorded in a session's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitionKind {
    /// The player arrived on the proxy network at this server.
    Join,
    /// The player left the proxy network from this server.
    Leave,
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Join => write!(f, "JOIN"),
            Self::Leave => write!(f, "LEAVE"),
        }
    }
}

/// One entry in a session's append-only presence history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The server the transition happened on. Never absent: a `Leave`
    /// is always recorded against the server the player was on.
    pub server: ServerId,
    /// Whether this was a join or a leave.
    pub kind: TransitionKind,
    /// Wall-clock time the transition was observed.
    pub at: SystemTime,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current wall-clock time.
    pub fn now(server: ServerId, kind: TransitionKind) -> Self {
        Self {
            server,
            kind,
            at: SystemTime::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Host handles
// ---------------------------------------------------------------------------

/// The host proxy's view of a player at the moment it handed us an event
/// or answered a lookup.
///
/// Vanish state and vanish capability are owned by an external privilege
/// system; the host reports them here and the directory copies them into
/// the session on every observation. Nothing in Waypoint writes them back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostPlayer {
    pub identity: Identity,
    /// The server the host currently has this player on, if any.
    #[serde(default)]
    pub server: Option<ServerId>,
    /// Hidden from ordinary viewers.
    #[serde(default)]
    pub vanished: bool,
    /// Eligible to vanish. Used as a privilege proxy by the visibility
    /// policy.
    #[serde(default)]
    pub can_vanish: bool,
}

impl HostPlayer {
    /// A visible, non-privileged player with no server yet.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            identity: Identity::new(id, name),
            server: None,
            vanished: false,
            can_vanish: false,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.identity.id
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }
}

// =========================================================================
// Tests
// =========================================================================
