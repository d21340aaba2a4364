//! Persistence hook and the background writer that calls it.
//!
//! Waypoint doesn't define a schema or a database; the host does. The
//! [`Store`] trait is the save/update call Waypoint makes when presence
//! changes. Store writes can be slow, so they never run on the thread
//! delivering host events: [`Persister`] spawns each write onto a Tokio
//! runtime and returns immediately.

use std::future::Future;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use waypoint_protocol::{HistoryEntry, PlayerId};
use waypoint_session::Session;

use crate::EventError;

/// The host's persistent store for sessions and history.
///
/// Implement the methods with `async fn`; the returned futures must be
/// `Send` because they run on the Tokio runtime.
///
/// A store that reports [`is_enabled`](Store::is_enabled) `== false`
/// turns the whole presence pathway off: the dispatcher skips join,
/// switch and leave processing up front rather than attempting and
/// failing writes.
pub trait Store: Send + Sync + 'static {
    /// Whether the store is connected and usable.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Saves (inserts or updates) a session.
    fn save(
        &self,
        session: Session,
    ) -> impl Future<Output = Result<(), EventError>> + Send;

    /// Appends one history entry for a player.
    fn append_history(
        &self,
        player_id: PlayerId,
        entry: HistoryEntry,
    ) -> impl Future<Output = Result<(), EventError>> + Send;
}

impl<T: Store> Store for Arc<T> {
    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }

    fn save(
        &self,
        session: Session,
    ) -> impl Future<Output = Result<(), EventError>> + Send {
        (**self).save(session)
    }

    fn append_history(
        &self,
        player_id: PlayerId,
        entry: HistoryEntry,
    ) -> impl Future<Output = Result<(), EventError>> + Send {
        (**self).append_history(player_id, entry)
    }
}

/// A store that is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledStore;

impl Store for DisabledStore {
    fn is_enabled(&self) -> bool {
        false
    }

    async fn save(&self, _session: Session) -> Result<(), EventError> {
        Ok(())
    }

    async fn append_history(
        &self,
        _player_id: PlayerId,
        _entry: HistoryEntry,
    ) -> Result<(), EventError> {
        Ok(())
    }
}

/// Fire-and-forget writer in front of a [`Store`].
///
/// Cheap to clone: the dispatcher and the history logger each hold one.
pub struct Persister<S: Store> {
    store: Arc<S>,
    runtime: Handle,
}

impl<S: Store> Clone for Persister<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            runtime: self.runtime.clone(),
        }
    }
}

impl<S: Store> Persister<S> {
    /// Writes will be spawned onto `runtime`.
    pub fn new(store: Arc<S>, runtime: Handle) -> Self {
        Self { store, runtime }
    }

    /// Uses the runtime of the calling context.
    ///
    /// # Panics
    /// When called outside a Tokio runtime.
    pub fn current(store: Arc<S>) -> Self {
        Self::new(store, Handle::current())
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_enabled()
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Saves a session in the background.
    ///
    /// The returned handle can be awaited, but nothing in the dispatch
    /// path does.
    pub fn save(&self, session: Session) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        self.runtime.spawn(async move {
            let player_id = session.id();
            if let Err(error) = store.save(session).await {
                tracing::error!(%player_id, %error, "session save failed");
            }
        })
    }

    /// Appends a history entry in the background.
    pub fn append_history(
        &self,
        player_id: PlayerId,
        entry: HistoryEntry,
    ) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        self.runtime.spawn(async move {
            if let Err(error) = store.append_history(player_id, entry).await {
                tracing::error!(%player_id, %error, "history append failed");
            }
        })
    }
}
