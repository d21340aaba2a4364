//! Combined command configuration.

use serde::{Deserialize, Serialize};
use waypoint_roster::{FindConfig, ListConfig};

/// Settings for both directory commands, as one document:
///
/// ```json
/// {
///   "find": { "not_found": "...", "found": "...", "vanishable_players": true },
///   "list": { "header": "...", "list": [ ... ], "chat_bot": { ... } }
/// }
/// ```
///
/// Either section may be omitted and takes its defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaypointConfig {
    pub find: FindConfig,
    pub list: ListConfig,
}

#[cfg(feature = "json")]
impl WaypointConfig {
    pub fn from_json(text: &str) -> Result<Self, crate::WaypointError> {
        serde_json::from_str(text)
            .map_err(|e| waypoint_roster::RosterError::from(e).into())
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::WaypointError;

    #[test]
    fn test_from_json_reads_both_sections() {
        let config = WaypointConfig::from_json(
            r#"{
                "find": { "vanishable_players": true },
                "list": { "header": "Online", "list": [] }
            }"#,
        )
        .unwrap();

        assert!(config.find.vanishable_players);
        assert_eq!(config.list.templates.header.as_deref(), Some("Online"));
    }

    #[test]
    fn test_from_json_empty_document_is_default() {
        assert_eq!(WaypointConfig::from_json("{}").unwrap(), WaypointConfig::default());
    }

    #[test]
    fn test_from_json_garbage_is_roster_error() {
        assert!(matches!(
            WaypointConfig::from_json("[1, 2"),
            Err(WaypointError::Roster(_))
        ));
    }
}
