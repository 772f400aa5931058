//! Configuration management for craftops.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values
//!
//! Required values are not validated up front. Each operation resolves the
//! section it depends on at the point of first use and fails with a
//! [`MissingConfig`](crate::CraftopsError::MissingConfig) error naming the
//! environment variable that would have supplied the value.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::error::{CraftopsError, Result};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote console configuration.
    pub remote: RemoteSection,
    /// Backup configuration.
    pub backup: BackupSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Remote console transport selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Stateful RCON session over TCP.
    Rcon,
    /// Stateless control-panel HTTP API.
    Panel,
}

impl Default for TransportKind {
    fn default() -> Self {
        Self::Rcon
    }
}

impl std::str::FromStr for TransportKind {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rcon" => Ok(Self::Rcon),
            "panel" => Ok(Self::Panel),
            _ => Err(()),
        }
    }
}

/// Remote console configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSection {
    /// Which transport `send` uses.
    pub transport: TransportKind,
    /// RCON session settings.
    pub rcon: RconSection,
    /// Control-panel HTTP settings.
    pub panel: PanelSection,
}

/// RCON session settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RconSection {
    /// Server hostname or address.
    pub host: Option<String>,
    /// RCON port.
    pub port: Option<u16>,
    /// RCON password.
    pub password: Option<String>,
}

/// Fully resolved RCON settings.
#[derive(Debug, Clone)]
pub struct RconSettings {
    pub host: String,
    pub port: u16,
    pub password: String,
}

impl RconSection {
    /// Resolve required values, naming the missing environment variable.
    pub fn resolve(&self) -> Result<RconSettings> {
        Ok(RconSettings {
            host: self
                .host
                .clone()
                .ok_or(CraftopsError::MissingConfig("RCON_HOST"))?,
            port: self.port.ok_or(CraftopsError::MissingConfig("RCON_PORT"))?,
            password: self
                .password
                .clone()
                .ok_or(CraftopsError::MissingConfig("RCON_PASSWORD"))?,
        })
    }
}

/// Control-panel HTTP settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSection {
    /// Panel base URL, e.g. `https://panel.example.com`.
    pub base_url: Option<String>,
    /// Server identifier in the panel.
    pub server_id: Option<String>,
    /// Client API bearer token.
    pub token: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for PanelSection {
    fn default() -> Self {
        Self {
            base_url: None,
            server_id: None,
            token: None,
            timeout_ms: 1000,
        }
    }
}

/// Fully resolved panel settings.
#[derive(Debug, Clone)]
pub struct PanelSettings {
    pub base_url: String,
    pub server_id: String,
    pub token: String,
    pub timeout: Duration,
}

impl PanelSection {
    /// Resolve required values, naming the missing environment variable.
    pub fn resolve(&self) -> Result<PanelSettings> {
        Ok(PanelSettings {
            base_url: self
                .base_url
                .clone()
                .ok_or(CraftopsError::MissingConfig("PTERODACTYL_BASE_URL"))?,
            server_id: self
                .server_id
                .clone()
                .ok_or(CraftopsError::MissingConfig("PTERODACTYL_SERVER_IDENTIFIER"))?,
            token: self
                .token
                .clone()
                .ok_or(CraftopsError::MissingConfig("PTERODACTYL_TOKEN"))?,
            timeout: Duration::from_millis(self.timeout_ms),
        })
    }
}

/// Backup configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupSection {
    /// B2 key identifier.
    pub key_id: Option<String>,
    /// B2 application key (secret).
    pub application_key: Option<String>,
    /// B2 bucket name.
    pub bucket: Option<String>,
    /// Local directory to back up.
    pub source_dir: Option<String>,
    /// Force a full backup when the last full one is older than this.
    pub full_older_than_days: u32,
    /// Duplicity verbosity level.
    pub verbosity: u8,
    /// Prune backups older than this many days.
    pub retention_days: u32,
}

impl Default for BackupSection {
    fn default() -> Self {
        Self {
            key_id: None,
            application_key: None,
            bucket: None,
            source_dir: None,
            full_older_than_days: 7,
            verbosity: 8,
            retention_days: 30,
        }
    }
}

/// Fully resolved backup settings.
#[derive(Debug, Clone)]
pub struct BackupSettings {
    pub key_id: String,
    pub application_key: String,
    pub bucket: String,
    pub source_dir: String,
    pub full_older_than_days: u32,
    pub verbosity: u8,
    pub retention_days: u32,
}

impl BackupSection {
    /// Resolve required values, naming the missing environment variable.
    pub fn resolve(&self) -> Result<BackupSettings> {
        Ok(BackupSettings {
            key_id: self
                .key_id
                .clone()
                .ok_or(CraftopsError::MissingConfig("B2_KEY_ID"))?,
            application_key: self
                .application_key
                .clone()
                .ok_or(CraftopsError::MissingConfig("B2_APPLICATION_KEY"))?,
            bucket: self
                .bucket
                .clone()
                .ok_or(CraftopsError::MissingConfig("B2_BUCKET_NAME"))?,
            source_dir: self
                .source_dir
                .clone()
                .ok_or(CraftopsError::MissingConfig("DIR_TO_BACKUP"))?,
            full_older_than_days: self.full_older_than_days,
            verbosity: self.verbosity,
            retention_days: self.retention_days,
        })
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> std::result::Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("RCON_HOST") {
            self.remote.rcon.host = Some(host);
        }

        if let Ok(port) = std::env::var("RCON_PORT") {
            if let Ok(port) = port.parse() {
                self.remote.rcon.port = Some(port);
            }
        }

        if let Ok(password) = std::env::var("RCON_PASSWORD") {
            self.remote.rcon.password = Some(password);
        }

        if let Ok(url) = std::env::var("PTERODACTYL_BASE_URL") {
            self.remote.panel.base_url = Some(url);
        }

        if let Ok(id) = std::env::var("PTERODACTYL_SERVER_IDENTIFIER") {
            self.remote.panel.server_id = Some(id);
        }

        if let Ok(token) = std::env::var("PTERODACTYL_TOKEN") {
            self.remote.panel.token = Some(token);
        }

        if let Ok(key_id) = std::env::var("B2_KEY_ID") {
            self.backup.key_id = Some(key_id);
        }

        if let Ok(key) = std::env::var("B2_APPLICATION_KEY") {
            self.backup.application_key = Some(key);
        }

        if let Ok(bucket) = std::env::var("B2_BUCKET_NAME") {
            self.backup.bucket = Some(bucket);
        }

        if let Ok(dir) = std::env::var("DIR_TO_BACKUP") {
            self.backup.source_dir = Some(dir);
        }

        if let Ok(transport) = std::env::var("CRAFTOPS_TRANSPORT") {
            if let Ok(kind) = transport.parse() {
                self.remote.transport = kind;
            }
        }

        if let Ok(level) = std::env::var("CRAFTOPS_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(transport) = args.transport {
            self.remote.transport = transport;
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> std::result::Result<Self, ConfigError> {
        // Start with defaults
        let mut config = Config::default();

        // Load from config file if specified
        if let Some(ref path) = args.config {
            config = Config::from_file(path)?;
        }

        // Apply environment variable overrides
        config.apply_env();

        // Apply CLI argument overrides (highest priority)
        config.apply_args(args);

        Ok(config)
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
