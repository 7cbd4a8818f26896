//! Client configuration types.
//!
//! `ClientConfig` represents the `config.toml` in the JournaLLM data
//! directory. All fields have defaults, so an empty file is valid.

use serde::{Deserialize, Serialize};

/// What to do with a reply that arrives after the conversation was cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaleReplyPolicy {
    /// Drop the reply; the cleared conversation stays empty.
    #[default]
    Discard,
    /// Append the reply to whatever the history is now.
    Append,
}

/// Top-level configuration for the chat client.
///
/// Loaded from `~/.journallm/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the journal backend (no trailing path).
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Handling of replies that outlive a `/clear`.
    #[serde(default)]
    pub stale_replies: StaleReplyPolicy,

    /// Length of the default date window, ending today.
    #[serde(default = "default_window_days")]
    pub default_window_days: u32,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_window_days() -> u32 {
    14
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            stale_replies: StaleReplyPolicy::default(),
            default_window_days: default_window_days(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default_values() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.stale_replies, StaleReplyPolicy::Discard);
        assert_eq!(config.default_window_days, 14);
    }

    #[test]
    fn test_client_config_deserialize_with_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.default_window_days, 14);
    }

    #[test]
    fn test_client_config_deserialize_with_values() {
        let toml_str = r#"
api_url = "http://journal.local:9000"
stale_replies = "append"
default_window_days = 30
"#;
        let config: ClientConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api_url, "http://journal.local:9000");
        assert_eq!(config.stale_replies, StaleReplyPolicy::Append);
        assert_eq!(config.default_window_days, 30);
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let result = toml::from_str::<ClientConfig>(r#"stale_replies = "queue""#);
        assert!(result.is_err());
    }
}
