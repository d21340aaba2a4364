//! Error types for the event layer.

/// Failures reported by subscribers, hooks and stores.
///
/// The dispatcher never propagates these: a failing subscriber is logged
/// and the rest of the chain still runs, and a failing store write is
/// logged by the background task that made it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    /// A subscriber could not handle an event.
    #[error("subscriber {name} failed: {reason}")]
    Subscriber { name: String, reason: String },

    /// A registered hook returned an error.
    #[error("hook failed: {0}")]
    Hook(String),

    /// The relationship tracker rejected a notification.
    #[error("relationship update failed: {0}")]
    Relationship(String),

    /// The persistent store rejected a write.
    #[error("store write failed: {0}")]
    Store(String),

    /// A subscriber or hook panicked. The panic was caught.
    #[error("{0} panicked")]
    Panicked(String),
}
