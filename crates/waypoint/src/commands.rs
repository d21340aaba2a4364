//! The player directory commands: `find` and `list`.
//!
//! Both commands are thin adapters. They pick a [`Viewer`] for the
//! channel the command came from, ask the roster layer who that viewer
//! may see, fill in the configured templates, and hand the text to the
//! channel.

use waypoint_roster::{
    expand_newlines, render_roster, FindConfig, ListConfig, RosterQueryEngine,
    TemplateParser, TierMembership, Viewer, VisibilityPolicy, PLAYER_TOKEN,
};
use waypoint_session::{PresenceProvider, Session, SessionDirectory};

use crate::{Channel, Outbox};

/// Replaced with the rendered roster in the chat-bot `message` wrapper.
pub const LIST_TOKEN: &str = "%list%";

/// Outcome of a command invocation, reported back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// A reply was delivered.
    Success,
    /// The arguments don't make sense for this channel. Nothing was sent;
    /// the host shows its usage text.
    IncorrectArguments,
}

/// What a command needs from the running system.
pub struct CommandContext<'a, P: PresenceProvider> {
    pub directory: &'a SessionDirectory<P>,
    pub parser: &'a dyn TemplateParser,
    pub outbox: &'a dyn Outbox,
}

/// The issuing player's session, observed fresh from the host handle.
fn issuer<P: PresenceProvider>(
    directory: &SessionDirectory<P>,
    channel: &Channel,
) -> Option<Session> {
    match channel {
        Channel::Player(host) => Some(directory.observe(host)),
        Channel::Console | Channel::ChatBot => None,
    }
}

fn viewer<'a>(channel: &Channel, issuer: Option<&'a Session>) -> Viewer<'a> {
    match (channel, issuer) {
        (Channel::Console, _) => Viewer::Console,
        (_, Some(session)) => Viewer::Player(session),
        (_, None) => Viewer::Anonymous,
    }
}

// ---------------------------------------------------------------------------
// find
// ---------------------------------------------------------------------------

/// `find [player]`: reports whether a player is online.
#[derive(Debug, Clone, Default)]
pub struct FindCommand {
    config: FindConfig,
}

impl FindCommand {
    pub fn new(config: FindConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FindConfig {
        &self.config
    }

    /// Renders the reply without delivering it.
    ///
    /// Returns `None` when there is nothing to look up: no argument from a
    /// channel that has no self (console, chat-bot).
    pub fn reply<P: PresenceProvider>(
        &self,
        directory: &SessionDirectory<P>,
        parser: &dyn TemplateParser,
        channel: &Channel,
        args: &[&str],
    ) -> Option<String> {
        let me = issuer(directory, channel);
        let context = me.as_ref();

        let Some(query) = args.first() else {
            // Looking yourself up always succeeds, vanished or not.
            let me = context?;
            return Some(self.found(parser, self.config.self_template(), context, me));
        };

        let policy = VisibilityPolicy::new(self.config.vanishable_players);
        let target = directory
            .resolve(query)
            .filter(Session::is_connected)
            .filter(|target| policy.can_see(viewer(channel, context), target));

        let text = match &target {
            Some(target) => self.found(parser, &self.config.found, context, target),
            None => expand_newlines(&parser.parse(&self.config.not_found, context, None)),
        };
        tracing::info!(query = %query, found = target.is_some(), "find");
        Some(text)
    }

    /// Runs the command and delivers the reply to `channel`.
    pub fn run<P: PresenceProvider>(
        &self,
        ctx: &CommandContext<'_, P>,
        channel: &Channel,
        args: &[&str],
    ) -> CommandStatus {
        match self.reply(ctx.directory, ctx.parser, channel, args) {
            Some(text) => {
                channel.deliver(ctx.outbox, &text);
                CommandStatus::Success
            }
            None => CommandStatus::IncorrectArguments,
        }
    }

    fn found(
        &self,
        parser: &dyn TemplateParser,
        template: &str,
        context: Option<&Session>,
        target: &Session,
    ) -> String {
        let text = template.replace(PLAYER_TOKEN, target.name());
        expand_newlines(&parser.parse(&text, context, Some(target)))
    }
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

/// `list`: the tiered roster of online players.
#[derive(Debug, Clone, Default)]
pub struct ListCommand {
    config: ListConfig,
}

impl ListCommand {
    pub fn new(config: ListConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// Renders the roster as `channel` should see it.
    ///
    /// - console: every connected player, vanished included
    /// - player: tiers the player belongs to reveal their vanished peers
    ///   if the player can vanish
    /// - chat-bot: an anonymous viewer, rendered with the chat-bot layout
    ///   and wrapped in its `message` template
    pub fn reply<P: PresenceProvider>(
        &self,
        directory: &SessionDirectory<P>,
        parser: &dyn TemplateParser,
        channel: &Channel,
    ) -> String {
        let engine = RosterQueryEngine::new(directory);
        let me = issuer(directory, channel);
        let context = me.as_ref();

        let templates = match channel {
            Channel::ChatBot => self.config.chat_bot_templates(),
            Channel::Console | Channel::Player(_) => &self.config.templates,
        };
        let tiers = if templates.list.is_empty() {
            self.config.tiers()
        } else {
            &templates.list
        };

        let membership = match context {
            Some(me) => engine.membership(tiers, me.id()),
            None => TierMembership::new(),
        };
        let roster = engine.query(tiers, viewer(channel, context), &membership);
        tracing::info!(
            tiers = roster.sections.len(),
            players = roster.total(),
            "list"
        );
        let list = render_roster(templates, &roster, parser, context);

        match (channel, self.bot_message()) {
            (Channel::ChatBot, Some(message)) => expand_newlines(
                &parser.parse(message, None, None).replace(LIST_TOKEN, &list),
            ),
            _ => list,
        }
    }

    /// Runs the command and delivers the roster to `channel`.
    pub fn run<P: PresenceProvider>(
        &self,
        ctx: &CommandContext<'_, P>,
        channel: &Channel,
    ) -> CommandStatus {
        let text = self.reply(ctx.directory, ctx.parser, channel);
        channel.deliver(ctx.outbox, &text);
        CommandStatus::Success
    }

    fn bot_message(&self) -> Option<&str> {
        self.config.chat_bot.as_ref()?.message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use waypoint_protocol::{HostPlayer, PlayerId, ServerId};
    use waypoint_roster::NoPlaceholders;

    use super::*;

    struct OneOnline(HostPlayer);

    impl PresenceProvider for OneOnline {
        fn lookup(&self, name_or_id: &str) -> Option<HostPlayer> {
            self.0
                .name()
                .eq_ignore_ascii_case(name_or_id)
                .then(|| self.0.clone())
        }
        fn list_connected(&self) -> Vec<HostPlayer> {
            vec![self.0.clone()]
        }
        fn has_permission(&self, _: PlayerId, _: &str) -> bool {
            true
        }
    }

    fn online(name: &str) -> HostPlayer {
        let mut host = HostPlayer::new(PlayerId(1), name);
        host.server = Some(ServerId::new("lobby").unwrap());
        host
    }

    #[test]
    fn test_find_reply_console_without_args_is_none() {
        let dir = SessionDirectory::new(OneOnline(online("Bob")));
        let find = FindCommand::default();

        assert!(find.reply(&dir, &NoPlaceholders, &Channel::Console, &[]).is_none());
        assert!(find.reply(&dir, &NoPlaceholders, &Channel::ChatBot, &[]).is_none());
    }

    #[test]
    fn test_find_reply_substitutes_player_and_newlines() {
        let dir = SessionDirectory::new(OneOnline(online("Bob")));
        let find = FindCommand::new(FindConfig {
            found: r"%player%\nis here".into(),
            ..FindConfig::default()
        });

        let text = find.reply(&dir, &NoPlaceholders, &Channel::Console, &["bob"]);

        assert_eq!(text.as_deref(), Some("Bob\nis here"));
    }

    #[test]
    fn test_find_reply_unknown_player_is_not_found() {
        let dir = SessionDirectory::new(OneOnline(online("Bob")));
        let find = FindCommand::default();

        let text = find.reply(&dir, &NoPlaceholders, &Channel::Console, &["Zed"]);

        assert_eq!(text.as_deref(), Some("Player not found."));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_list_reply_wraps_chat_bot_message() {
        let dir = SessionDirectory::new(OneOnline(online("Bob")));
        let list = ListCommand::new(
            ListConfig::from_json(
                r#"{
                    "list": [{ "name": "all", "permission": "p", "section": "%player%" }],
                    "chat_bot": { "header": "Online:", "message": "[%list%]" }
                }"#,
            )
            .unwrap(),
        );

        let text = list.reply(&dir, &NoPlaceholders, &Channel::ChatBot);

        assert_eq!(text, "[Online:\nBob]");
    }
}
