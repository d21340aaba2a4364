//! Replays a short proxy session against Waypoint and prints the command
//! replies. Run with `RUST_LOG=debug` to see the presence pipeline.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;
use waypoint::prelude::*;

// ---------------------------------------------------------------------------
// Simulated proxy
// ---------------------------------------------------------------------------

/// The proxy's player table. Signals are replayed against it so that host
/// lookups agree with what the events say.
#[derive(Default)]
struct Proxy {
    players: Mutex<Vec<HostPlayer>>,
}

impl Proxy {
    fn connect(&self, player: &HostPlayer, server: &str) -> RawSignal {
        let server = ServerId::new(server).ok();
        let mut players = self.players.lock();
        let previous = match players.iter_mut().find(|p| p.id() == player.id()) {
            Some(existing) => {
                let previous = existing.server.take();
                existing.server = server.clone();
                previous
            }
            None => {
                let mut joined = player.clone();
                joined.server = server.clone();
                players.push(joined);
                None
            }
        };
        let mut handle = player.clone();
        handle.server = server.clone();
        RawSignal::Connected {
            player: Some(handle),
            server,
            previous,
        }
    }

    fn disconnect(&self, player: &HostPlayer) -> RawSignal {
        let mut players = self.players.lock();
        players.retain(|p| p.id() != player.id());
        RawSignal::Disconnected {
            player: Some(player.clone()),
        }
    }
}

impl PresenceProvider for Proxy {
    fn lookup(&self, name_or_id: &str) -> Option<HostPlayer> {
        let id = name_or_id.parse::<PlayerId>().ok();
        self.players
            .lock()
            .iter()
            .find(|p| Some(p.id()) == id || p.name().eq_ignore_ascii_case(name_or_id))
            .cloned()
    }

    fn list_connected(&self) -> Vec<HostPlayer> {
        self.players.lock().clone()
    }

    fn has_permission(&self, player_id: PlayerId, permission: &str) -> bool {
        match permission {
            "network.staff" => player_id.0 < 10,
            "network.default" => player_id.0 >= 10,
            _ => false,
        }
    }
}

/// Prints replies the way an in-game chat would show them.
struct Stdout;

impl Outbox for Stdout {
    fn send_to_player(&self, player_id: PlayerId, text: &str) {
        println!("[to {player_id}]\n{text}\n");
    }

    fn reply_to_bot(&self, text: &str) {
        println!("[chat-bot]\n{text}\n");
    }
}

/// Logs writes instead of storing them.
struct LogStore;

impl Store for LogStore {
    async fn save(&self, session: Session) -> Result<(), EventError> {
        tracing::info!(
            player = %session.identity,
            server = ?session.connected_server.as_ref().map(ServerId::as_str),
            "saved"
        );
        Ok(())
    }

    async fn append_history(
        &self,
        player_id: PlayerId,
        entry: HistoryEntry,
    ) -> Result<(), EventError> {
        tracing::info!(%player_id, kind = %entry.kind, server = %entry.server, "history");
        Ok(())
    }
}

struct Friends;

impl RelationshipTracker for Friends {
    fn on_proxy_join(&self, session: &Session) -> Result<(), EventError> {
        println!("(friends of {} hear they joined)", session.name());
        Ok(())
    }

    fn on_server_change(
        &self,
        session: &Session,
        from: Option<&ServerId>,
    ) -> Result<(), EventError> {
        let from = from.map_or("?", ServerId::as_str);
        println!("(friends of {} hear they left {from})", session.name());
        Ok(())
    }

    fn on_proxy_leave(
        &self,
        session: &Session,
        server: &ServerId,
    ) -> Result<(), EventError> {
        println!("(friends of {} hear they quit from {server})", session.name());
        Ok(())
    }
}

const CONFIG: &str = r#"{
    "find": {
        "not_found": "Player not found.",
        "found": "%player% is online.",
        "found_no_args": "You are online.",
        "vanishable_players": true
    },
    "list": {
        "header": "--- Online ---",
        "footer": "--------------",
        "list": [
            { "name": "staff", "permission": "network.staff", "header": "Staff (%amount%)", "section": " * %player%" },
            { "name": "default", "permission": "network.default", "header": "Players (%amount%)", "section": " - %player%" }
        ],
        "chat_bot": { "message": "```\n%list%\n```" }
    }
}"#;

// ---------------------------------------------------------------------------
// Replay
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let proxy = Arc::new(Proxy::default());
    let waypoint = Waypoint::builder(Arc::clone(&proxy))
        .store(LogStore)
        .config(WaypointConfig::from_json(CONFIG)?)
        .relationships(Friends)
        .hook(EventKind::PlayerChat, "chat-log", |event| {
            let name = event.session().name();
            println!("<{name}> {}", event.message().unwrap_or_default());
            Ok(())
        })
        .build(Stdout)?;

    let mut mira = HostPlayer::new(PlayerId(1), "Mira");
    mira.vanished = true;
    mira.can_vanish = true;
    let dana = HostPlayer::new(PlayerId(10), "Dana");
    let eli = HostPlayer::new(PlayerId(11), "Eli");

    waypoint.handle(proxy.connect(&mira, "hub"));
    waypoint.handle(proxy.connect(&dana, "hub"));
    waypoint.handle(proxy.connect(&eli, "survival"));
    waypoint.handle(proxy.connect(&dana, "creative"));
    waypoint.handle(RawSignal::Chat {
        player: Some(dana.clone()),
        message: "anyone in creative?".into(),
    });

    waypoint.run("list", &Channel::Console, &[]);
    waypoint.run("list", &Channel::Player(dana.clone()), &[]);
    waypoint.run("list", &Channel::Player(mira.clone()), &[]);
    waypoint.run("list", &Channel::ChatBot, &[]);
    waypoint.run("find", &Channel::Player(dana.clone()), &["mira"]);
    waypoint.run("find", &Channel::Player(mira.clone()), &[]);

    waypoint.handle(proxy.disconnect(&dana));
    waypoint.handle(proxy.disconnect(&dana));
    waypoint.run("find", &Channel::Player(eli.clone()), &["Dana"]);

    for session in waypoint.directory().sessions() {
        for entry in session.history() {
            println!("{} {} {}", session.name(), entry.kind, entry.server);
        }
    }

    // Let the background store writes finish before exiting.
    tokio::time::sleep(Duration::from_millis(50)).await;
    Ok(())
}
