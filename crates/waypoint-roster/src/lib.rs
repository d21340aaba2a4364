//! Visibility and tiered rosters for Waypoint.
//!
//! Everything a directory command needs to decide *who may be shown* and
//! *how the answer is laid out* lives here:
//!
//! # Key types
//!
//! - [`VisibilityPolicy`] / [`Viewer`]: may this viewer see that session?
//! - [`RosterTier`]: a named, permission-gated group from configuration
//! - [`RosterQueryEngine`]: builds visibility-filtered tiers from the
//!   session directory
//! - [`Roster`] / [`render_roster`]: the query result and its text form
//! - [`TemplateParser`]: the host's placeholder substitution hook
//! - [`FindConfig`] / [`ListConfig`]: per-command settings

mod config;
mod error;
mod query;
mod render;
mod template;
mod visibility;

pub use config::{ChatBotListConfig, FindConfig, ListConfig, RosterTemplates, RosterTier};
pub use error::RosterError;
pub use query::{Roster, RosterQueryEngine, RosterSection, TierMembership};
pub use render::render_roster;
pub use template::{expand_newlines, NoPlaceholders, TemplateParser, AMOUNT_TOKEN, PLAYER_TOKEN};
pub use visibility::{Viewer, VisibilityPolicy};
