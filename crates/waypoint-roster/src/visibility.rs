//! The vanish rule: who may observe whom.
//!
//! Vanished players are hidden from ordinary viewers. A command may be
//! configured to reveal them, but only to viewers who can vanish
//! themselves. The console sees everything.
//!
//! The decision is a pure function of its inputs and is made fresh for
//! every invocation: vanish state and capability change at runtime, so
//! nothing here is cached.

use waypoint_session::Session;

/// On whose behalf a visibility decision is made.
#[derive(Debug, Clone, Copy)]
pub enum Viewer<'a> {
    /// The operator console. Always authorized.
    Console,

    /// A viewer with no session of its own, such as a chat-bot user.
    /// Treated as an ordinary viewer without vanish capability.
    Anonymous,

    /// An in-session player.
    Player(&'a Session),
}

impl<'a> Viewer<'a> {
    /// The viewer's own session, when it is a player.
    pub fn session(&self) -> Option<&'a Session> {
        match *self {
            Self::Player(session) => Some(session),
            Self::Console | Self::Anonymous => None,
        }
    }

    /// Whether the viewer carries vanish capability.
    pub fn can_vanish(&self) -> bool {
        self.session().is_some_and(|s| s.can_vanish)
    }
}

/// The per-command visibility setting.
///
/// `find` takes it from `vanishable_players`; `list` derives it per tier
/// from whether the viewer belongs to that tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityPolicy {
    /// Reveal vanished targets to viewers who can vanish.
    pub allow_vanishable_peers: bool,
}

impl VisibilityPolicy {
    pub fn new(allow_vanishable_peers: bool) -> Self {
        Self {
            allow_vanishable_peers,
        }
    }

    /// Decides whether `viewer` may see `target`.
    ///
    /// 1. The console sees everyone.
    /// 2. A target that isn't vanished is visible.
    /// 3. A vanished target is visible only when the policy allows
    ///    vanishable peers AND the viewer can vanish.
    pub fn can_see(&self, viewer: Viewer<'_>, target: &Session) -> bool {
        if matches!(viewer, Viewer::Console) {
            return true;
        }
        if !target.vanished {
            return true;
        }
        self.allow_vanishable_peers && viewer.can_vanish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use waypoint_protocol::{HostPlayer, PlayerId};
    use waypoint_session::{PresenceProvider, SessionDirectory};

    use super::*;

    struct NoHost;

    impl PresenceProvider for NoHost {
        fn lookup(&self, _: &str) -> Option<HostPlayer> {
            None
        }
        fn list_connected(&self) -> Vec<HostPlayer> {
            Vec::new()
        }
        fn has_permission(&self, _: PlayerId, _: &str) -> bool {
            false
        }
    }

    /// Builds a session through the directory (the only public way to get
    /// one) with the given flags.
    fn session(id: u64, vanished: bool, can_vanish: bool) -> Session {
        let dir = SessionDirectory::new(Arc::new(NoHost));
        let mut host = HostPlayer::new(PlayerId(id), format!("p{id}"));
        host.vanished = vanished;
        host.can_vanish = can_vanish;
        dir.observe(&host)
    }

    #[test]
    fn test_can_see_visible_target_for_everyone() {
        let target = session(1, false, false);
        let ordinary = session(2, false, false);
        let policy = VisibilityPolicy::default();

        assert!(policy.can_see(Viewer::Player(&ordinary), &target));
        assert!(policy.can_see(Viewer::Anonymous, &target));
        assert!(policy.can_see(Viewer::Console, &target));
    }

    #[test]
    fn test_can_see_vanished_hidden_from_ordinary_viewer_under_any_policy() {
        let target = session(1, true, true);
        let ordinary = session(2, false, false);

        for allow in [false, true] {
            let policy = VisibilityPolicy::new(allow);
            assert!(!policy.can_see(Viewer::Player(&ordinary), &target));
            assert!(!policy.can_see(Viewer::Anonymous, &target));
        }
    }

    #[test]
    fn test_can_see_vanished_needs_policy_and_capability() {
        let target = session(1, true, false);
        let privileged = session(2, false, true);

        assert!(!VisibilityPolicy::new(false)
            .can_see(Viewer::Player(&privileged), &target));
        assert!(VisibilityPolicy::new(true)
            .can_see(Viewer::Player(&privileged), &target));
    }

    #[test]
    fn test_can_see_console_sees_vanished() {
        let target = session(1, true, false);
        assert!(VisibilityPolicy::new(false).can_see(Viewer::Console, &target));
    }
}
