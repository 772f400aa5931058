//! Stateless control-panel HTTP transport.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use tracing::{debug, info};

use super::RemoteConsole;
use crate::config::PanelSettings;
use crate::error::{CraftopsError, Result};

/// Sends console commands through a Pterodactyl-style client API.
///
/// Each `send` is one authenticated POST bounded by the configured
/// timeout; timeout, network failure, and non-2xx status all fail the
/// call outright.
pub struct PanelConsole {
    client: reqwest::Client,
    url: String,
    token: String,
}

impl PanelConsole {
    /// Build a console for one server behind the panel.
    pub fn new(settings: &PanelSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;

        let url = format!(
            "{}/api/client/servers/{}/command",
            settings.base_url.trim_end_matches('/'),
            settings.server_id
        );

        Ok(Self {
            client,
            url,
            token: settings.token.clone(),
        })
    }
}

#[async_trait]
impl RemoteConsole for PanelConsole {
    async fn send(&mut self, command: &str) -> Result<String> {
        if command.trim().is_empty() {
            return Err(CraftopsError::EmptyCommand);
        }

        debug!(%command, url = %self.url, "posting console command");

        let response = self
            .client
            .post(&self.url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .json(&serde_json::json!({ "command": command }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CraftopsError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        info!(%command, %body, "panel response");
        Ok(body)
    }

    async fn close(&mut self) -> Result<()> {
        // Stateless transport, nothing to release
        Ok(())
    }
}
