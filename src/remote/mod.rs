//! Remote console transports.
//!
//! One capability, two interchangeable variants: a stateful RCON session
//! ([`RconConsole`]) and a stateless control-panel HTTP call
//! ([`PanelConsole`]). Given a command string, both return one textual
//! response or fail; no retry in either.

mod panel;
mod rcon;

pub use panel::PanelConsole;
pub use rcon::RconConsole;

use async_trait::async_trait;

use crate::config::{RemoteSection, TransportKind};
use crate::error::Result;

/// Capability to deliver one command string to the game server.
#[async_trait]
pub trait RemoteConsole: Send {
    /// Send one command, returning exactly one response.
    async fn send(&mut self, command: &str) -> Result<String>;

    /// Release the underlying transport. No-op for stateless variants.
    async fn close(&mut self) -> Result<()>;
}

/// Open the console selected by configuration.
///
/// Required settings for the selected transport are resolved here; a
/// missing value fails before any network activity.
pub async fn connect(remote: &RemoteSection) -> Result<Box<dyn RemoteConsole>> {
    match remote.transport {
        TransportKind::Rcon => {
            let settings = remote.rcon.resolve()?;
            Ok(Box::new(RconConsole::connect(&settings).await?))
        }
        TransportKind::Panel => {
            let settings = remote.panel.resolve()?;
            Ok(Box::new(PanelConsole::new(&settings)?))
        }
    }
}
