//! Application state shared by the CLI commands.
//!
//! AppState holds the resolved configuration and builds the concrete
//! transport and controller each command runs against.

use std::path::PathBuf;

use journallm_core::exchange::ChatController;
use journallm_infra::config::{
    load_client_config, resolve_api_url, resolve_data_dir, resolve_window_days,
};
use journallm_infra::http::HttpChatTransport;
use journallm_types::config::ClientConfig;

/// The controller pinned to the HTTP backend.
pub type ConcreteChatController = ChatController<HttpChatTransport>;

pub struct AppState {
    pub config: ClientConfig,
    pub api_url: String,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load `config.toml` and resolve the backend URL.
    ///
    /// `api_url_override` comes from `--api-url` / `JOURNALLM_API_URL`.
    pub async fn init(api_url_override: Option<&str>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = load_client_config(&data_dir).await;
        let api_url = resolve_api_url(&config, api_url_override)?;

        tracing::debug!(api_url = %api_url, data_dir = %data_dir.display(), "Client configured");

        Ok(Self {
            config,
            api_url,
            data_dir,
        })
    }

    pub fn transport(&self) -> HttpChatTransport {
        HttpChatTransport::new(self.api_url.clone())
    }

    /// A fresh controller with an empty conversation.
    pub fn controller(&self) -> ConcreteChatController {
        ChatController::with_policy(self.transport(), self.config.stale_replies)
    }

    pub fn window_days(&self) -> u32 {
        resolve_window_days(&self.config)
    }
}
