//! Integration tests for roster queries and rendering using a fake host.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use waypoint_protocol::{HostPlayer, PlayerId, ServerId};
use waypoint_roster::{
    render_roster, NoPlaceholders, RosterQueryEngine, RosterTemplates,
    RosterTier, TierMembership, Viewer,
};
use waypoint_session::{PresenceProvider, Session, SessionDirectory};

// =========================================================================
// Fake host: connected players plus a permission table.
// =========================================================================

#[derive(Default)]
struct FakeHost {
    players: Mutex<Vec<HostPlayer>>,
    permissions: Mutex<HashMap<PlayerId, HashSet<String>>>,
}

impl FakeHost {
    fn connect(&self, id: u64, name: &str, vanished: bool, can_vanish: bool, perms: &[&str]) {
        let mut host = HostPlayer::new(PlayerId(id), name);
        host.server = Some(ServerId::new("lobby").unwrap());
        host.vanished = vanished;
        host.can_vanish = can_vanish;
        self.players.lock().unwrap().push(host);
        self.permissions
            .lock()
            .unwrap()
            .insert(PlayerId(id), perms.iter().map(|p| p.to_string()).collect());
    }
}

impl PresenceProvider for FakeHost {
    fn lookup(&self, name_or_id: &str) -> Option<HostPlayer> {
        self.players
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.name() == name_or_id)
            .cloned()
    }

    fn list_connected(&self) -> Vec<HostPlayer> {
        self.players.lock().unwrap().clone()
    }

    fn has_permission(&self, player: PlayerId, permission: &str) -> bool {
        self.permissions
            .lock()
            .unwrap()
            .get(&player)
            .is_some_and(|perms| perms.contains(permission))
    }
}

// =========================================================================
// Helpers
// =========================================================================

fn tiers() -> Vec<RosterTier> {
    vec![
        RosterTier::new("staff", "p.staff", "Staff (%amount%)", "* %player%"),
        RosterTier::new("default", "p.default", "Players (%amount%)", "- %player%"),
    ]
}

fn layout() -> RosterTemplates {
    RosterTemplates {
        header: Some("== Online ==".into()),
        footer: Some("== End ==".into()),
        list: tiers(),
    }
}

/// Two vanished staff (Sam, Sue) and three ordinary players.
fn populated() -> SessionDirectory<FakeHost> {
    let host = FakeHost::default();
    host.connect(1, "Sam", true, true, &["p.staff"]);
    host.connect(2, "Sue", true, true, &["p.staff"]);
    host.connect(3, "Ann", false, false, &["p.default"]);
    host.connect(4, "Ben", false, false, &["p.default"]);
    host.connect(5, "Cat", false, false, &["p.default"]);
    SessionDirectory::new(host)
}

fn names(section: &[Session]) -> Vec<&str> {
    section.iter().map(Session::name).collect()
}

// =========================================================================
// Tests
// =========================================================================

#[test]
fn test_console_list_shows_vanished_members_in_every_tier() {
    let dir = populated();
    let engine = RosterQueryEngine::new(&dir);

    let roster = engine.query(&tiers(), Viewer::Console, &TierMembership::new());

    assert_eq!(roster.sections.len(), 2);
    assert_eq!(roster.total(), 5);
    assert_eq!(names(&roster.sections[0].members), vec!["Sam", "Sue"]);
    assert_eq!(names(&roster.sections[1].members), vec!["Ann", "Ben", "Cat"]);

    let text = render_roster(&layout(), &roster, &NoPlaceholders, None);
    assert_eq!(
        text,
        "== Online ==\nStaff (2)\n* Sam\n* Sue\nPlayers (3)\n- Ann\n- Ben\n- Cat\n== End =="
    );
}

#[test]
fn test_player_without_membership_does_not_see_vanished_tier() {
    let dir = populated();
    let engine = RosterQueryEngine::new(&dir);
    let viewer = dir.resolve("Ann").expect("Ann is connected");
    let membership = engine.membership(&tiers(), viewer.id());
    assert!(membership.contains("default"));
    assert!(!membership.contains("staff"));

    let roster = engine.query(&tiers(), Viewer::Player(&viewer), &membership);
    let text = render_roster(&layout(), &roster, &NoPlaceholders, Some(&viewer));

    assert_eq!(roster.sections.len(), 1);
    assert_eq!(roster.sections[0].tier.name, "default");
    assert!(!text.contains("Staff"), "empty tier must emit no header");
    assert!(text.contains("Players (3)"));
}

#[test]
fn test_vanish_capable_member_sees_vanished_peers_in_own_tier() {
    let dir = populated();
    let engine = RosterQueryEngine::new(&dir);
    // Populate the directory, then take Sam as the viewer.
    engine.query(&tiers(), Viewer::Console, &TierMembership::new());
    let sam = dir.get(PlayerId(1)).unwrap();
    let membership = engine.membership(&tiers(), sam.id());

    let roster = engine.query(&tiers(), Viewer::Player(&sam), &membership);

    assert_eq!(names(&roster.sections[0].members), vec!["Sam", "Sue"]);
}

#[test]
fn test_vanish_capable_non_member_does_not_see_vanished_tier() {
    let host = FakeHost::default();
    host.connect(1, "Sam", true, true, &["p.staff"]);
    host.connect(2, "Vic", false, true, &["p.default"]);
    let dir = SessionDirectory::new(host);
    let engine = RosterQueryEngine::new(&dir);
    engine.query(&tiers(), Viewer::Console, &TierMembership::new());
    let vic = dir.get(PlayerId(2)).unwrap();

    let membership = engine.membership(&tiers(), vic.id());
    let roster = engine.query(&tiers(), Viewer::Player(&vic), &membership);

    // Vic can vanish but is not staff, so vanished staff stay hidden.
    assert_eq!(roster.sections.len(), 1);
    assert_eq!(roster.sections[0].tier.name, "default");
}

#[test]
fn test_anonymous_viewer_never_sees_vanished() {
    let dir = populated();
    let engine = RosterQueryEngine::new(&dir);
    let everyone: TierMembership = ["staff".to_string()].into_iter().collect();

    let roster = engine.query(&tiers(), Viewer::Anonymous, &everyone);

    assert_eq!(roster.total(), 3);
}

#[test]
fn test_player_with_several_tier_permissions_is_listed_once_in_first_tier() {
    let host = FakeHost::default();
    host.connect(1, "Sam", false, true, &["p.staff", "p.default"]);
    host.connect(2, "Ann", false, false, &["p.default"]);
    let dir = SessionDirectory::new(host);
    let engine = RosterQueryEngine::new(&dir);

    let roster = engine.query(&tiers(), Viewer::Console, &TierMembership::new());

    assert_eq!(roster.total(), 2);
    assert_eq!(names(&roster.sections[0].members), vec!["Sam"]);
    assert_eq!(names(&roster.sections[1].members), vec!["Ann"]);
}

#[test]
fn test_hidden_higher_tier_member_does_not_fall_through_to_lower_tier() {
    let host = FakeHost::default();
    host.connect(1, "Sam", true, true, &["p.staff", "p.default"]);
    host.connect(2, "Ann", false, false, &["p.default"]);
    let dir = SessionDirectory::new(host);
    let engine = RosterQueryEngine::new(&dir);
    engine.query(&tiers(), Viewer::Console, &TierMembership::new());
    let ann = dir.get(PlayerId(2)).unwrap();

    let membership = engine.membership(&tiers(), ann.id());
    let roster = engine.query(&tiers(), Viewer::Player(&ann), &membership);

    assert_eq!(roster.sections.len(), 1);
    assert_eq!(names(&roster.sections[0].members), vec!["Ann"]);
}

#[test]
fn test_malformed_tier_does_not_claim_its_players() {
    let dir = populated();
    let engine = RosterQueryEngine::new(&dir);
    let mut tiers = tiers();
    tiers[0].permission = Some("p.default".into());
    tiers[0].row = None;

    let roster = engine.query(&tiers, Viewer::Console, &TierMembership::new());

    assert_eq!(roster.sections.len(), 1);
    assert_eq!(names(&roster.sections[0].members), vec!["Ann", "Ben", "Cat"]);
}

#[test]
fn test_header_and_footer_render_once_even_with_no_tiers() {
    let dir = SessionDirectory::new(FakeHost::default());
    let engine = RosterQueryEngine::new(&dir);

    let roster = engine.query(&tiers(), Viewer::Console, &TierMembership::new());
    let text = render_roster(&layout(), &roster, &NoPlaceholders, None);

    assert!(roster.is_empty());
    assert_eq!(text, "== Online ==\n== End ==");
}

#[test]
fn test_malformed_tier_is_skipped_not_fatal() {
    let dir = populated();
    let engine = RosterQueryEngine::new(&dir);
    let mut broken = tiers();
    broken[0].permission = None;

    let roster = engine.query(&broken, Viewer::Console, &TierMembership::new());

    assert_eq!(roster.sections.len(), 1);
    assert_eq!(roster.sections[0].tier.name, "default");
}

#[test]
fn test_tier_without_header_still_renders_rows() {
    let dir = populated();
    let engine = RosterQueryEngine::new(&dir);
    let mut layout = layout();
    layout.header = None;
    layout.footer = None;
    layout.list[1].header = None;

    let roster = engine.query(&layout.list[1..], Viewer::Console, &TierMembership::new());
    let text = render_roster(&layout, &roster, &NoPlaceholders, None);

    assert_eq!(text, "- Ann\n- Ben\n- Cat");
}

#[test]
fn test_render_expands_newline_escape_and_calls_parser_with_subject() {
    let dir = populated();
    let engine = RosterQueryEngine::new(&dir);
    let layout = RosterTemplates {
        header: Some(r"Online\nnow".into()),
        footer: None,
        list: vec![RosterTier::new("default", "p.default", "", "%player% #%id%")],
    };
    let parser = |t: &str, _: Option<&Session>, subject: Option<&Session>| match subject {
        Some(s) => t.replace("%id%", &s.id().0.to_string()),
        None => t.to_string(),
    };

    let roster = engine.query(&layout.list, Viewer::Console, &TierMembership::new());
    let text = render_roster(&layout, &roster, &parser, None);

    assert_eq!(text, "Online\nnow\n\nAnn #3\nBen #4\nCat #5");
}
