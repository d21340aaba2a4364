//! Shared vocabulary for Waypoint.
//!
//! This crate defines the small, immutable types every other layer talks
//! in:
//!
//! - **Identity types** ([`PlayerId`], [`ServerId`], [`Identity`]): who a
//!   player is and which backend server they are on.
//! - **History types** ([`TransitionKind`], [`HistoryEntry`]): the audit
//!   trail of joins and leaves kept per session.
//! - **Host handles** ([`HostPlayer`]): the host proxy's view of a
//!   connected player, as handed to us in raw events and lookups.
//! - **Errors** ([`ProtocolError`]): what can go wrong parsing identifiers.
//!
//! # Architecture
//!
//! ```text
//! Host proxy (raw events) → Protocol (HostPlayer) → Session directory
//! ```
//!
//! The protocol layer owns no state. It doesn't know about sessions,
//! visibility or rosters. It only describes the data that flows between
//! them.

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod error;
mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use error::ProtocolError;
pub use types::{
    HistoryEntry, HostPlayer, Identity, PlayerId, ServerId, TransitionKind,
};
