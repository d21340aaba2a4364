//! The roster query engine: tiered, visibility-filtered player lists.
//!
//! A query walks the configured tiers in declared order. For each tier it
//! keeps the connected sessions that hold the tier's permission and that
//! the viewer may see, and drops the tier entirely when nobody is left.
//!
//! Tiers are exclusive: a player is listed under the first well-formed
//! tier whose permission they hold and under no later one, whether or not
//! that first tier is visible to the viewer.
//!
//! Within a tier the vanish rule is applied with
//! `allow_vanishable_peers = viewer is a member of this tier`: a staff
//! member who can vanish sees vanished staff, but not vanished players of
//! some other tier they don't belong to.

use std::collections::HashSet;

use waypoint_protocol::PlayerId;
use waypoint_session::{PresenceProvider, Session, SessionDirectory};

use crate::{RosterTier, Viewer, VisibilityPolicy};

/// Names of the tiers a viewer personally satisfies.
pub type TierMembership = HashSet<String>;

/// One non-empty tier of a roster.
#[derive(Debug, Clone)]
pub struct RosterSection {
    /// The tier as configured (header and row templates included).
    pub tier: RosterTier,
    /// Visible members in directory discovery order. Never empty.
    pub members: Vec<Session>,
}

/// The result of a roster query, ready for rendering.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    /// Non-empty tiers in declared order.
    pub sections: Vec<RosterSection>,
}

impl Roster {
    /// `true` when no tier had a visible member.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total rows across all tiers.
    pub fn total(&self) -> usize {
        self.sections.iter().map(|s| s.members.len()).sum()
    }
}

/// Builds rosters from a session directory.
///
/// Borrowing the directory (and, through it, the host's
/// [`PresenceProvider`]) keeps the engine a thin, stateless view: create
/// one per command invocation.
pub struct RosterQueryEngine<'a, P: PresenceProvider> {
    directory: &'a SessionDirectory<P>,
}

impl<'a, P: PresenceProvider> RosterQueryEngine<'a, P> {
    pub fn new(directory: &'a SessionDirectory<P>) -> Self {
        Self { directory }
    }

    /// The tiers whose permission `player` holds.
    ///
    /// Malformed tiers are never part of anyone's membership.
    pub fn membership(
        &self,
        tiers: &[RosterTier],
        player: PlayerId,
    ) -> TierMembership {
        let provider = self.directory.provider();
        tiers
            .iter()
            .filter_map(|tier| {
                let (permission, _) = tier.validate().ok()?;
                provider
                    .has_permission(player, permission)
                    .then(|| tier.name.clone())
            })
            .collect()
    }

    /// Runs the query.
    ///
    /// `membership` is ignored for [`Viewer::Console`], which sees every
    /// session regardless of vanish state.
    pub fn query(
        &self,
        tiers: &[RosterTier],
        viewer: Viewer<'_>,
        membership: &TierMembership,
    ) -> Roster {
        let provider = self.directory.provider();
        // One snapshot per query; each session is individually consistent.
        let candidates = self.directory.connected();
        let mut claimed: HashSet<PlayerId> = HashSet::new();
        let mut sections = Vec::new();

        for tier in tiers {
            let permission = match tier.validate() {
                Ok((permission, _)) => permission,
                Err(e) => {
                    tracing::warn!(tier = %tier.name, error = %e, "skipping malformed tier");
                    continue;
                }
            };

            let policy =
                VisibilityPolicy::new(membership.contains(&tier.name));
            let holders: Vec<&Session> = candidates
                .iter()
                .filter(|s| !claimed.contains(&s.id()))
                .filter(|s| provider.has_permission(s.id(), permission))
                .collect();
            claimed.extend(holders.iter().map(|s| s.id()));

            let members: Vec<Session> = holders
                .into_iter()
                .filter(|s| policy.can_see(viewer, s))
                .cloned()
                .collect();

            if members.is_empty() {
                tracing::debug!(tier = %tier.name, "no visible members, tier omitted");
                continue;
            }

            sections.push(RosterSection {
                tier: tier.clone(),
                members,
            });
        }

        Roster { sections }
    }
}
