//! Client configuration loader for JournaLLM.
//!
//! Reads `config.toml` from the data directory (`~/.journallm/` by default)
//! and deserializes it into [`ClientConfig`]. Falls back to defaults when
//! the file is missing or malformed.

use std::path::{Path, PathBuf};

use journallm_types::config::ClientConfig;
use journallm_types::error::ConfigError;

/// Smallest date window the client will default to.
const MIN_WINDOW_DAYS: u32 = 1;

/// Resolve the data directory.
///
/// Checks `JOURNALLM_DATA_DIR` first, then `~/.journallm`, then
/// `./.journallm`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("JOURNALLM_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".journallm");
    }

    PathBuf::from(".journallm")
}

/// Load client configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ClientConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_client_config(data_dir: &Path) -> ClientConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ClientConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ClientConfig::default();
        }
    };

    match toml::from_str::<ClientConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ClientConfig::default()
        }
    }
}

/// Resolve the backend base URL.
///
/// Priority:
/// 1. Explicit override (`--api-url` or `JOURNALLM_API_URL`)
/// 2. `api_url` from `config.toml`
///
/// The result must be an absolute http(s) URL and is returned without a
/// trailing slash.
pub fn resolve_api_url(
    config: &ClientConfig,
    cli_override: Option<&str>,
) -> Result<String, ConfigError> {
    let raw = cli_override.unwrap_or(&config.api_url).trim();
    let invalid = |reason: String| ConfigError::InvalidApiUrl {
        url: raw.to_string(),
        reason,
    };

    let parsed = reqwest::Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

/// Length of the default date window, with a floor of one day.
pub fn resolve_window_days(config: &ClientConfig) -> u32 {
    config.default_window_days.max(MIN_WINDOW_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use journallm_types::config::StaleReplyPolicy;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_client_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_client_config(tmp.path()).await;
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.stale_replies, StaleReplyPolicy::Discard);
    }

    #[tokio::test]
    async fn load_client_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
api_url = "http://journal.local:9000/"
stale_replies = "append"
default_window_days = 7
"#,
        )
        .await
        .unwrap();

        let config = load_client_config(tmp.path()).await;
        assert_eq!(config.api_url, "http://journal.local:9000/");
        assert_eq!(config.stale_replies, StaleReplyPolicy::Append);
        assert_eq!(config.default_window_days, 7);
    }

    #[tokio::test]
    async fn load_client_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_client_config(tmp.path()).await;
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.default_window_days, 14);
    }

    #[test]
    fn resolve_data_dir_from_env() {
        // SAFETY: No other test in this crate reads or writes this variable,
        // and it is removed before the test returns.
        unsafe {
            std::env::set_var("JOURNALLM_DATA_DIR", "/tmp/test-journallm");
        }
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-journallm"));
        unsafe {
            std::env::remove_var("JOURNALLM_DATA_DIR");
        }
    }

    #[test]
    fn resolve_api_url_prefers_override() {
        let config = ClientConfig::default();
        let url = resolve_api_url(&config, Some("https://journal.example.com/")).unwrap();
        assert_eq!(url, "https://journal.example.com");
    }

    #[test]
    fn resolve_api_url_uses_config() {
        let config = ClientConfig {
            api_url: "http://127.0.0.1:8000/".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(resolve_api_url(&config, None).unwrap(), "http://127.0.0.1:8000");
    }

    #[test]
    fn resolve_api_url_rejects_bad_urls() {
        let config = ClientConfig::default();
        assert!(matches!(
            resolve_api_url(&config, Some("localhost:8000")),
            Err(ConfigError::InvalidApiUrl { .. })
        ));
        assert!(matches!(
            resolve_api_url(&config, Some("not a url")),
            Err(ConfigError::InvalidApiUrl { .. })
        ));
    }

    #[test]
    fn resolve_window_days_enforces_minimum() {
        let config = ClientConfig {
            default_window_days: 0,
            ..ClientConfig::default()
        };
        assert_eq!(resolve_window_days(&config), MIN_WINDOW_DAYS);
    }
}
