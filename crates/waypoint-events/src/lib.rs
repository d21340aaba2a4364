//! Presence event dispatch for Waypoint.
//!
//! Raw host signals go in; ordered, failure-isolated notifications come
//! out. The pipeline for every signal is:
//!
//! ```text
//! RawSignal ──→ SessionDirectory ──→ Store (async) ──→ vanish gating ──→ subscribers
//!               (join/switch/leave)  (off-thread)                        1. relationships
//!                                                                        2. history
//!                                                                        3. hooks
//! ```
//!
//! # Key types
//!
//! - [`RawSignal`]: what the host reports (connected, disconnected, chat)
//! - [`DomainEvent`]: what subscribers receive
//! - [`EventDispatcher`]: runs the pipeline
//! - [`Subscriber`] / [`Stage`]: the ordered fan-out
//! - [`Store`] / [`Persister`]: asynchronous persistence
//! - [`HookRegistry`], [`HistoryLogger`], [`RelationshipNotifier`]: the
//!   built-in subscribers

#![allow(async_fn_in_trait)]

mod dispatcher;
mod error;
mod event;
mod history;
mod hooks;
mod relationships;
mod store;
mod subscriber;

pub use dispatcher::EventDispatcher;
pub use error::EventError;
pub use event::{DomainEvent, EventKind, RawSignal};
pub use history::HistoryLogger;
pub use hooks::{Hook, HookRegistry};
pub use relationships::{RelationshipNotifier, RelationshipTracker};
pub use store::{DisabledStore, Persister, Store};
pub use subscriber::{Stage, Subscriber};
