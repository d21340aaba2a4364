//! Error types for the protocol layer.
//!
//! Each crate in Waypoint defines its own error enum. When you see a
//! `ProtocolError`, you know the problem is in interpreting identifiers
//! handed to us by the host or typed by a command user, not in presence
//! tracking or roster rendering.

/// Errors that can occur in the protocol layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The text is not a valid player id.
    ///
    /// Accepted forms are a bare number (`42`) or the display form
    /// (`P-42`). Anything else (a player name, for example) ends up
    /// here, which lets callers fall back to name resolution.
    #[error("invalid player id: {0:?}")]
    InvalidPlayerId(String),

    /// A server name was empty.
    #[error("server name must not be empty")]
    EmptyServerName,
}
