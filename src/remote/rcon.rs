//! Stateful RCON session transport.

use async_trait::async_trait;
use rcon::Connection;
use tokio::net::TcpStream;
use tracing::{debug, info};

use super::RemoteConsole;
use crate::config::RconSettings;
use crate::error::{CraftopsError, Result};

/// An open RCON session to the game server.
///
/// The wire protocol is delegated to the `rcon` crate: plain TCP with
/// Minecraft quirks, no challenge sub-protocol.
pub struct RconConsole {
    connection: Option<Connection<TcpStream>>,
}

impl RconConsole {
    /// Connect and authenticate.
    ///
    /// Fails if the host is unreachable or the password is rejected.
    pub async fn connect(settings: &RconSettings) -> Result<Self> {
        let address = format!("{}:{}", settings.host, settings.port);
        debug!(%address, "opening rcon session");

        let connection = <Connection<TcpStream>>::builder()
            .enable_minecraft_quirks(true)
            .connect(&address, &settings.password)
            .await?;

        info!(%address, "rcon session established");
        Ok(Self {
            connection: Some(connection),
        })
    }
}

#[async_trait]
impl RemoteConsole for RconConsole {
    async fn send(&mut self, command: &str) -> Result<String> {
        if command.trim().is_empty() {
            return Err(CraftopsError::EmptyCommand);
        }

        let connection = self
            .connection
            .as_mut()
            .ok_or(CraftopsError::SessionClosed)?;

        let response = connection.cmd(command).await?;
        info!(%command, %response, "rcon response");
        Ok(response)
    }

    async fn close(&mut self) -> Result<()> {
        if self.connection.take().is_some() {
            debug!("rcon session closed");
        }
        Ok(())
    }
}
