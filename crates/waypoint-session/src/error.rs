//! Error types for the session layer.

use waypoint_protocol::PlayerId;

/// Reasons a presence transition could not be applied.
///
/// None of these are fatal. Host events race each other and payloads are
/// sometimes incomplete during shutdown, so the event layer logs these and
/// drops the signal. The directory's state is untouched whenever one is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The host event carried no player.
    #[error("host event carried no player")]
    AbsentPlayer,

    /// The host event carried no destination server.
    #[error("host event for player {0} carried no server")]
    AbsentServer(PlayerId),

    /// No session exists for the given player. Leaving before ever
    /// joining (a late or duplicate disconnect) ends up here.
    #[error("no session for player {0}")]
    UnknownPlayer(PlayerId),

    /// The player has a session but no connected server, so there is
    /// nothing to leave from.
    #[error("player {0} is not connected to any server")]
    NotConnected(PlayerId),
}
