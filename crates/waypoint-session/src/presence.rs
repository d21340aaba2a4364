//! Host access hook: how Waypoint reads the proxy's live player list.
//!
//! Waypoint doesn't talk to the proxy itself; the host owns the network
//! and the authoritative list of who is connected where.
//!
//! Instead, Waypoint defines the [`PresenceProvider`] trait: a handful of
//! read-only methods the host implements over its own player registry. The
//! directory and the roster engine receive a provider explicitly instead
//! of reaching for a process-wide proxy singleton, which keeps them easy to
//! drive from tests with an in-memory fake.

use std::sync::Arc;

use waypoint_protocol::{HostPlayer, PlayerId};

/// Read-only view of the host proxy's players.
///
/// # Trait bounds
///
/// - `Send + Sync` → the provider is shared by the host's event threads
///   and by command handlers running concurrently.
/// - `'static` → it lives as long as the directory that holds it.
///
/// # Example
///
/// ```rust
/// use waypoint_protocol::{HostPlayer, PlayerId};
/// use waypoint_session::PresenceProvider;
///
/// /// A proxy with nobody online.
/// struct EmptyProxy;
///
/// impl PresenceProvider for EmptyProxy {
///     fn lookup(&self, _name_or_id: &str) -> Option<HostPlayer> {
///         None
///     }
///
///     fn list_connected(&self) -> Vec<HostPlayer> {
///         Vec::new()
///     }
///
///     fn has_permission(&self, _player: PlayerId, _permission: &str) -> bool {
///         false
///     }
/// }
/// ```
pub trait PresenceProvider: Send + Sync + 'static {
    /// Looks a player up by name or by id text.
    ///
    /// Returns `None` when the host doesn't know the player. A returned
    /// handle with `server == None` means the host knows them but they
    /// aren't on any backend right now.
    fn lookup(&self, name_or_id: &str) -> Option<HostPlayer>;

    /// Every player currently connected to the proxy.
    fn list_connected(&self) -> Vec<HostPlayer>;

    /// Evaluates a permission string for a player.
    ///
    /// Waypoint treats this as an opaque predicate; wildcard and
    /// inheritance rules are the host's business.
    fn has_permission(&self, player: PlayerId, permission: &str) -> bool;
}

/// Lets several owners (directory, tests, the host adapter) share one
/// provider.
impl<T: PresenceProvider> PresenceProvider for Arc<T> {
    fn lookup(&self, name_or_id: &str) -> Option<HostPlayer> {
        (**self).lookup(name_or_id)
    }

    fn list_connected(&self) -> Vec<HostPlayer> {
        (**self).list_connected()
    }

    fn has_permission(&self, player: PlayerId, permission: &str) -> bool {
        (**self).has_permission(player, permission)
    }
}
