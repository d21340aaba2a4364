//! Presence tracking for Waypoint.
//!
//! This crate answers one question at any instant: which identity is on
//! which backend server?
//!
//! 1. **Host access**: reading the proxy's live player list
//!    ([`PresenceProvider`] trait)
//! 2. **Session tracking**: one [`Session`] per identity ever seen, with
//!    its current server and append-only history ([`SessionDirectory`])
//! 3. **Transitions**: join, switch and leave, each reported back as a
//!    [`Transition`] so the event layer can fan it out
//!
//! # How it fits in the stack
//!
//! ```text
//! Events / Roster layers (above)  ← read snapshots, drive transitions
//!     ↕
//! Session Layer (this crate)      ← owns presence state per identity
//!     ↕
//! Protocol Layer (below)          ← PlayerId, ServerId, HostPlayer
//! ```

mod directory;
mod error;
mod presence;
mod session;

pub use directory::SessionDirectory;
pub use error::SessionError;
pub use presence::PresenceProvider;
pub use session::{PresenceChange, Session, Transition};
