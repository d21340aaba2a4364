//! Command configuration: `find` templates and `list` tiers.
//!
//! Waypoint doesn't load configuration files. The host does, and hands
//! the parsed values in. These types define the recognised options and
//! their defaults, and derive serde so a host can deserialize them from
//! whatever format it uses.

use serde::{Deserialize, Serialize};

use crate::RosterError;

// ---------------------------------------------------------------------------
// FindConfig
// ---------------------------------------------------------------------------

/// Settings for the `find` command.
///
/// Templates accept `%player%` and the literal escape `\n`. Everything
/// else is left to the host's [`TemplateParser`](crate::TemplateParser).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindConfig {
    /// Sent when the target can't be resolved or isn't visible.
    pub not_found: String,

    /// Sent when the target was found.
    pub found: String,

    /// Sent for a player's argument-less self lookup. Falls back to
    /// `found` when unset.
    pub found_no_args: Option<String>,

    /// Reveal vanished players to viewers who can vanish themselves.
    pub vanishable_players: bool,
}

impl FindConfig {
    /// The template for a self lookup.
    pub fn self_template(&self) -> &str {
        self.found_no_args.as_deref().unwrap_or(&self.found)
    }
}

impl Default for FindConfig {
    fn default() -> Self {
        Self {
            not_found: "Player not found.".to_string(),
            found: "%player% is online.".to_string(),
            found_no_args: None,
            vanishable_players: false,
        }
    }
}

// ---------------------------------------------------------------------------
// RosterTier
// ---------------------------------------------------------------------------

/// One named group in the `list` output.
///
/// ```text
/// name: "staff"
/// permission: "network.staff"      → who belongs in this tier
/// header: "Staff (%amount%)"       → rendered once, with the visible count
/// section: "  - %player%"          → rendered once per visible member
/// ```
///
/// Fields are optional so that a half-written entry still deserializes;
/// [`RosterTier::validate`] decides whether it is usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterTier {
    pub name: String,

    #[serde(default)]
    pub permission: Option<String>,

    #[serde(default)]
    pub header: Option<String>,

    /// Row template, one per member.
    #[serde(default, rename = "section")]
    pub row: Option<String>,
}

impl RosterTier {
    /// A complete tier.
    pub fn new(
        name: impl Into<String>,
        permission: impl Into<String>,
        header: impl Into<String>,
        row: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            permission: Some(permission.into()),
            header: Some(header.into()),
            row: Some(row.into()),
        }
    }

    /// Returns the permission and row template, or why the tier can't be
    /// used. A missing header is allowed: the rows render without one.
    pub fn validate(&self) -> Result<(&str, &str), RosterError> {
        let permission = self
            .permission
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| RosterError::MissingPermission(self.name.clone()))?;
        let row = self
            .row
            .as_deref()
            .ok_or_else(|| RosterError::MissingRowTemplate(self.name.clone()))?;
        Ok((permission, row))
    }
}

// ---------------------------------------------------------------------------
// ListConfig
// ---------------------------------------------------------------------------

/// The layout of one rendered roster: header, tiers in order, footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterTemplates {
    /// Rendered once at the top, regardless of how many tiers match.
    pub header: Option<String>,

    /// Rendered once at the bottom.
    pub footer: Option<String>,

    /// Tiers in declared order.
    pub list: Vec<RosterTier>,
}

/// Chat-bot specific layout for `list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatBotListConfig {
    #[serde(flatten)]
    pub templates: RosterTemplates,

    /// Wraps the rendered roster; `%list%` marks where it goes.
    pub message: Option<String>,
}

/// Settings for the `list` command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    #[serde(flatten)]
    pub templates: RosterTemplates,

    /// Layout used when replying through the chat-bot. When unset the
    /// chat-bot gets the same layout as everyone else.
    pub chat_bot: Option<ChatBotListConfig>,
}

impl ListConfig {
    /// The tier list that decides membership and visibility.
    pub fn tiers(&self) -> &[RosterTier] {
        &self.templates.list
    }

    /// The layout for the chat-bot channel.
    pub fn chat_bot_templates(&self) -> &RosterTemplates {
        self.chat_bot
            .as_ref()
            .map(|bot| &bot.templates)
            .unwrap_or(&self.templates)
    }
}

#[cfg(feature = "json")]
impl FindConfig {
    /// Parses a `find` section from JSON.
    pub fn from_json(text: &str) -> Result<Self, RosterError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(feature = "json")]
impl ListConfig {
    /// Parses a `list` section from JSON. Tier order is preserved.
    pub fn from_json(text: &str) -> Result<Self, RosterError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_self_template_falls_back_to_found() {
        let mut config = FindConfig::default();
        assert_eq!(config.self_template(), "%player% is online.");

        config.found_no_args = Some("You are online.".into());
        assert_eq!(config.self_template(), "You are online.");
    }

    #[test]
    fn test_find_config_default_hides_vanished() {
        assert!(!FindConfig::default().vanishable_players);
    }

    #[test]
    fn test_tier_validate_complete_tier() {
        let tier = RosterTier::new("staff", "p.staff", "Staff", "- %player%");
        assert_eq!(tier.validate().unwrap(), ("p.staff", "- %player%"));
    }

    #[test]
    fn test_tier_validate_missing_permission() {
        let mut tier = RosterTier::new("staff", "", "Staff", "- %player%");
        assert!(matches!(
            tier.validate(),
            Err(RosterError::MissingPermission(name)) if name == "staff"
        ));

        tier.permission = None;
        assert!(tier.validate().is_err());
    }

    #[test]
    fn test_tier_validate_missing_row() {
        let mut tier = RosterTier::new("staff", "p.staff", "Staff", "");
        tier.row = None;
        assert!(matches!(
            tier.validate(),
            Err(RosterError::MissingRowTemplate(_))
        ));
    }

    #[test]
    fn test_tier_validate_allows_missing_header() {
        let mut tier = RosterTier::new("staff", "p.staff", "", "- %player%");
        tier.header = None;
        assert!(tier.validate().is_ok());
    }

    #[test]
    fn test_chat_bot_templates_fall_back_to_main_layout() {
        let config = ListConfig {
            templates: RosterTemplates {
                header: Some("Online".into()),
                ..RosterTemplates::default()
            },
            chat_bot: None,
        };
        assert_eq!(config.chat_bot_templates().header.as_deref(), Some("Online"));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_list_config_from_json_keeps_tier_order() {
        let json = r#"{
            "header": "Online players",
            "footer": "---",
            "list": [
                { "name": "staff", "permission": "p.staff", "header": "Staff", "section": "%player%" },
                { "name": "default", "permission": "p.default", "section": "%player%" }
            ],
            "chat_bot": { "header": "Bot", "message": "```%list%```" }
        }"#;

        let config = ListConfig::from_json(json).unwrap();

        let names: Vec<_> = config.tiers().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["staff", "default"]);
        assert_eq!(config.templates.footer.as_deref(), Some("---"));
        assert!(config.tiers()[1].header.is_none());
        let bot = config.chat_bot.as_ref().unwrap();
        assert_eq!(bot.message.as_deref(), Some("```%list%```"));
        assert_eq!(config.chat_bot_templates().header.as_deref(), Some("Bot"));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_find_config_from_json_defaults_missing_fields() {
        let config = FindConfig::from_json(r#"{ "vanishable_players": true }"#)
            .unwrap();
        assert!(config.vanishable_players);
        assert_eq!(config.not_found, "Player not found.");
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_list_config_from_json_garbage_is_error() {
        assert!(matches!(
            ListConfig::from_json("not json"),
            Err(RosterError::InvalidConfig(_))
        ));
    }
}
