//! Error types for the roster layer.

/// Errors that can occur reading roster and command configuration.
///
/// A malformed tier is never fatal: the query engine logs the error and
/// skips that tier, and the rest of the roster still renders.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// The tier has no (or an empty) permission string.
    #[error("tier {0:?} has no permission")]
    MissingPermission(String),

    /// The tier has no row template, so its members can't be rendered.
    #[error("tier {0:?} has no row template")]
    MissingRowTemplate(String),

    /// The configuration text could not be parsed.
    #[cfg(feature = "json")]
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}
