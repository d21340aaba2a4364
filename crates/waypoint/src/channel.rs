//! Where a command's reply goes.

use waypoint_protocol::{HostPlayer, PlayerId};

/// Log target the console channel writes to.
pub const CONSOLE_TARGET: &str = "waypoint::console";

/// The host side of reply delivery.
///
/// The console needs no collaborator: its replies are log lines. Player
/// messages and chat-bot replies go through the host. Expiring chat-bot
/// replies after a while is the bot's business, not Waypoint's.
pub trait Outbox: Send + Sync {
    /// Sends a direct message to a connected player.
    fn send_to_player(&self, player_id: PlayerId, text: &str);

    /// Replies to the chat-bot interaction that issued the command.
    fn reply_to_bot(&self, text: &str);
}

/// The destination a command was issued from, and replies to.
#[derive(Debug, Clone)]
pub enum Channel {
    /// The proxy operator console.
    Console,

    /// An in-game player. Carries the host's current handle for them.
    Player(HostPlayer),

    /// A chat-bot interaction.
    ChatBot,
}

impl Channel {
    /// Delivers `text` to this channel.
    pub fn deliver(&self, outbox: &dyn Outbox, text: &str) {
        match self {
            Self::Console => {
                tracing::info!(target: CONSOLE_TARGET, "{text}");
            }
            Self::Player(host) => outbox.send_to_player(host.id(), text),
            Self::ChatBot => outbox.reply_to_bot(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recording {
        sent: Mutex<Vec<String>>,
    }

    impl Outbox for Recording {
        fn send_to_player(&self, player_id: PlayerId, text: &str) {
            self.sent.lock().unwrap().push(format!("{player_id}:{text}"));
        }

        fn reply_to_bot(&self, text: &str) {
            self.sent.lock().unwrap().push(format!("bot:{text}"));
        }
    }

    #[test]
    fn test_deliver_player_goes_to_that_player() {
        let outbox = Recording::default();
        let channel = Channel::Player(HostPlayer::new(PlayerId(3), "Ann"));

        channel.deliver(&outbox, "hi");

        assert_eq!(*outbox.sent.lock().unwrap(), vec!["P-3:hi"]);
    }

    #[test]
    fn test_deliver_chat_bot_replies_to_bot() {
        let outbox = Recording::default();

        Channel::ChatBot.deliver(&outbox, "roster");

        assert_eq!(*outbox.sent.lock().unwrap(), vec!["bot:roster"]);
    }

    #[test]
    fn test_deliver_console_bypasses_outbox() {
        let outbox = Recording::default();

        Channel::Console.deliver(&outbox, "logged");

        assert!(outbox.sent.lock().unwrap().is_empty());
    }
}
