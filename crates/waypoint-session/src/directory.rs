//! The session directory: one presence record per identity.
//!
//! This is the central piece of the session layer. It's responsible for:
//! - Creating sessions the first time a player is seen
//! - Applying join / switch / leave transitions
//! - Keeping the append-only history of joins and leaves
//! - Resolving `find` targets by id or name
//! - Handing out consistent per-session snapshots for roster queries
//!
//! # Concurrency note
//!
//! Unlike a single-owner registry, the directory is shared: the host
//! delivers events for different players on its own threads while command
//! handlers read concurrently. Locking is two-level:
//!
//! - an `RwLock` over the index (id → slot) and the discovery order, held
//!   only long enough to find or insert a slot;
//! - a `Mutex` per session, held for the duration of one transition or
//!   one snapshot.
//!
//! A query never holds a lock across the whole roster. A session updated
//! mid-iteration shows either its old or its new server for that pass.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard, RwLock, RwLockReadGuard};
use waypoint_protocol::{HostPlayer, PlayerId, ServerId, TransitionKind};

use crate::{
    PresenceChange, PresenceProvider, Session, SessionError, Transition,
};

type SessionCell = Arc<Mutex<Session>>;

/// Slots in discovery order plus an index into them.
#[derive(Default)]
struct Entries {
    index: HashMap<PlayerId, usize>,
    order: Vec<SessionCell>,
}

/// Tracks every identity seen during the process lifetime.
///
/// ## Lifecycle
///
/// ```text
///             on_join()            on_switch()             on_leave()
/// [unknown] ───────────→ [on A] ───────────────→ [on B] ───────────────→ [offline]
///                           ↑  history: (A, JOIN)          history: (B, LEAVE)  │
///                           └───────────────────────── on_join() ───────────────┘
/// ```
///
/// Sessions are never removed; an offline session keeps its history.
pub struct SessionDirectory<P: PresenceProvider> {
    /// The host's live view, used for lookups and roster reconciliation.
    provider: P,

    /// Session slots. See the module-level concurrency note.
    entries: RwLock<Entries>,
}

impl<P: PresenceProvider> SessionDirectory<P> {
    /// Creates an empty directory over the given host view.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            entries: RwLock::new(Entries::default()),
        }
    }

    /// The host view this directory reads from.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    // -- Transitions ------------------------------------------------------

    /// Records a player arriving on the network at `server`.
    ///
    /// A join is only valid from the offline state. Host events race,
    /// though, so a join for a session that is already on a server is
    /// applied as a switch instead of failing.
    ///
    /// # Errors
    /// [`SessionError::AbsentPlayer`] / [`SessionError::AbsentServer`] when
    /// the host payload is incomplete. The directory is unchanged.
    pub fn on_join(
        &self,
        host: Option<&HostPlayer>,
        server: Option<&ServerId>,
    ) -> Result<Transition, SessionError> {
        let host = host.ok_or(SessionError::AbsentPlayer)?;
        let server = server.ok_or(SessionError::AbsentServer(host.id()))?;
        let player_id = host.id();

        let cell = self.cell_for(host);
        let mut session = lock(&cell);

        if session.is_connected() && !session.is_adopted() {
            let previous = session.move_to(server.clone());
            tracing::warn!(
                %player_id,
                from = ?previous,
                to = %server,
                "join for a connected player, applying as switch"
            );
            return Ok(Transition {
                change: PresenceChange::Switch,
                session: session.clone(),
                previous,
            });
        }

        session.move_to(server.clone());
        session.record(server.clone(), TransitionKind::Join);
        tracing::info!(%player_id, %server, "player joined");

        Ok(Transition {
            change: PresenceChange::Join,
            session: session.clone(),
            previous: None,
        })
    }

    /// Moves a connected player from `from` to `to`.
    ///
    /// No history entry is written for a switch; history only holds the
    /// network-level join and the final leave. If the directory believes
    /// the player is offline (their join was never seen), the switch is
    /// applied as a join at `to`. If `from` doesn't match the recorded
    /// server, the host wins and the session moves to `to` anyway.
    pub fn on_switch(
        &self,
        host: Option<&HostPlayer>,
        from: Option<&ServerId>,
        to: Option<&ServerId>,
    ) -> Result<Transition, SessionError> {
        let host = host.ok_or(SessionError::AbsentPlayer)?;
        let to = to.ok_or(SessionError::AbsentServer(host.id()))?;
        let player_id = host.id();

        let cell = self.cell_for(host);
        let mut session = lock(&cell);

        if !session.is_connected() {
            session.move_to(to.clone());
            session.record(to.clone(), TransitionKind::Join);
            tracing::warn!(
                %player_id,
                to = %to,
                "switch for an offline player, applying as join"
            );
            return Ok(Transition {
                change: PresenceChange::Join,
                session: session.clone(),
                previous: None,
            });
        }

        if let Some(from) = from {
            if session.connected_server.as_ref() != Some(from) {
                tracing::warn!(
                    %player_id,
                    expected = %from,
                    recorded = ?session.connected_server,
                    "switch origin does not match recorded server"
                );
            }
        }

        let previous = session.move_to(to.clone());
        tracing::info!(%player_id, from = ?previous, to = %to, "player switched");

        Ok(Transition {
            change: PresenceChange::Switch,
            session: session.clone(),
            previous,
        })
    }

    /// Records a player leaving the network from their current server.
    ///
    /// Appends `(server, LEAVE)` and clears `connected_server`.
    ///
    /// # Errors
    /// - [`SessionError::UnknownPlayer`]: never seen; late disconnect
    /// - [`SessionError::NotConnected`]: already offline; duplicate
    ///   disconnect
    pub fn on_leave(
        &self,
        host: Option<&HostPlayer>,
    ) -> Result<Transition, SessionError> {
        let host = host.ok_or(SessionError::AbsentPlayer)?;
        let player_id = host.id();

        let cell = self
            .cell(player_id)
            .ok_or(SessionError::UnknownPlayer(player_id))?;
        let mut session = lock(&cell);
        session.refresh(host);

        let server = session
            .disconnect()
            .ok_or(SessionError::NotConnected(player_id))?;
        session.record(server.clone(), TransitionKind::Leave);
        tracing::info!(%player_id, %server, "player left");

        Ok(Transition {
            change: PresenceChange::Leave,
            session: session.clone(),
            previous: Some(server),
        })
    }

    // -- Lookups ----------------------------------------------------------

    /// Resolves a `find` argument to a session.
    ///
    /// 1. If the text parses as a [`PlayerId`] the directory knows, that
    ///    session is used, online or not.
    /// 2. Otherwise the host is asked. A connected player is used (creating
    ///    their session lazily if needed); a player the host knows as
    ///    offline is not name-resolvable.
    /// 3. If the host doesn't know the text at all, sessions the directory
    ///    has as connected are matched by name, ignoring ASCII case.
    ///
    /// The returned snapshot's `connected_server` is always the host's:
    /// a session the host no longer lists comes back offline. A server the
    /// directory only adopted from the host is dropped at that point.
    pub fn resolve(&self, name_or_id: &str) -> Option<Session> {
        let looked_up = self.provider.lookup(name_or_id);
        let known = name_or_id
            .parse::<PlayerId>()
            .ok()
            .and_then(|id| self.cell(id));

        let cell = match (known, &looked_up) {
            (Some(cell), _) => cell,
            (None, Some(host)) if host.server.is_some() => self.cell_for(host),
            (None, Some(_)) => return None,
            (None, None) => self.connected_cell_by_name(name_or_id)?,
        };

        let player_id = lock(&cell).id();
        let host = match looked_up.filter(|h| h.id() == player_id) {
            Some(host) => Some(host),
            None => self
                .provider
                .list_connected()
                .into_iter()
                .find(|h| h.id() == player_id),
        };
        Some(reconcile(&cell, host.as_ref()))
    }

    /// Records the host's current view of a player and returns a snapshot.
    ///
    /// Creates the session on first sight. If the session has no server
    /// but the host reports one, the host's server is adopted without
    /// writing history.
    pub fn observe(&self, host: &HostPlayer) -> Session {
        let cell = self.cell_for(host);
        let mut session = lock(&cell);
        if let Some(server) = &host.server {
            session.adopt(server);
        }
        session.clone()
    }

    /// Snapshot of one session by id.
    pub fn get(&self, player_id: PlayerId) -> Option<Session> {
        self.cell(player_id).map(|cell| lock(&cell).clone())
    }

    /// Snapshots of every known session, in discovery order.
    pub fn sessions(&self) -> Vec<Session> {
        self.cells().iter().map(|cell| lock(cell).clone()).collect()
    }

    /// Snapshots of every session the host reports as connected, in
    /// discovery order.
    ///
    /// Players the host lists but the directory hasn't seen yet are
    /// observed first, so they appear at the end of the order.
    pub fn connected(&self) -> Vec<Session> {
        let live = self.provider.list_connected();
        let ids: HashSet<PlayerId> = live.iter().map(HostPlayer::id).collect();
        for host in &live {
            self.observe(host);
        }

        self.cells()
            .iter()
            .filter_map(|cell| {
                let session = lock(cell);
                ids.contains(&session.id()).then(|| session.clone())
            })
            .collect()
    }

    /// Returns the number of known sessions (online or not).
    pub fn len(&self) -> usize {
        self.read().order.len()
    }

    /// Returns `true` if no player has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.read().order.is_empty()
    }

    // -- Internals --------------------------------------------------------

    fn connected_cell_by_name(&self, name: &str) -> Option<SessionCell> {
        self.cells().into_iter().find(|cell| {
            let session = lock(cell);
            session.is_connected() && session.name().eq_ignore_ascii_case(name)
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read()
    }

    fn cell(&self, player_id: PlayerId) -> Option<SessionCell> {
        let entries = self.read();
        entries
            .index
            .get(&player_id)
            .map(|&slot| Arc::clone(&entries.order[slot]))
    }

    fn cells(&self) -> Vec<SessionCell> {
        self.read().order.clone()
    }

    /// Finds or creates the slot for `host`, refreshing host-owned fields.
    fn cell_for(&self, host: &HostPlayer) -> SessionCell {
        let cell = match self.cell(host.id()) {
            Some(cell) => cell,
            None => {
                let mut entries = self.entries.write();
                // Another thread may have inserted it between the read
                // and the write lock.
                match entries.index.get(&host.id()) {
                    Some(&slot) => Arc::clone(&entries.order[slot]),
                    None => {
                        let cell =
                            Arc::new(Mutex::new(Session::from_host(host)));
                        let slot = entries.order.len();
                        entries.index.insert(host.id(), slot);
                        entries.order.push(Arc::clone(&cell));
                        tracing::debug!(
                            player_id = %host.id(),
                            name = host.name(),
                            "session created"
                        );
                        cell
                    }
                }
            }
        };
        lock(&cell).refresh(host);
        cell
    }
}

fn lock(cell: &Mutex<Session>) -> MutexGuard<'_, Session> {
    cell.lock()
}

/// Brings a session in line with the host's handle for it (`None` when the
/// host doesn't list the player) and returns the host-true snapshot.
fn reconcile(cell: &Mutex<Session>, host: Option<&HostPlayer>) -> Session {
    let mut session = lock(cell);
    if let Some(host) = host {
        session.refresh(host);
    }

    match host.and_then(|h| h.server.as_ref()) {
        Some(server) => session.adopt(server),
        None => {
            if session.release_adopted() {
                tracing::debug!(
                    player_id = %session.id(),
                    "host no longer lists player, adopted server dropped"
                );
            }
        }
    }

    let mut snapshot = session.clone();
    snapshot.connected_server = host.and_then(|h| h.server.clone());
    snapshot
}

// =========================================================================
// Tests
// =========================================================================
