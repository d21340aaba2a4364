//! Unified error type for Waypoint.

use waypoint_events::EventError;
use waypoint_protocol::ProtocolError;
use waypoint_roster::RosterError;
use waypoint_session::SessionError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `waypoint` meta-crate, you deal with this single
/// error type instead of importing errors from each sub-crate.
#[derive(Debug, thiserror::Error)]
pub enum WaypointError {
    /// Bad identifier text.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A presence transition could not be applied.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Malformed roster or command configuration.
    #[error(transparent)]
    Roster(#[from] RosterError),

    /// A subscriber, hook or store failure.
    #[error(transparent)]
    Event(#[from] EventError),

    /// [`Waypoint`](crate::Waypoint) was built outside a Tokio runtime and
    /// no runtime handle was supplied.
    #[error("no Tokio runtime available for background persistence")]
    NoRuntime,
}
