//! Error types for craftops.

use thiserror::Error;

/// Main error type for craftops operations.
#[derive(Error, Debug)]
pub enum CraftopsError {
    /// A command string was empty.
    #[error("command is empty")]
    EmptyCommand,

    /// Local command execution failed.
    #[error("command execution failed: {0}")]
    ExecutionFailed(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// RCON session error (unreachable host, rejected credential, dropped
    /// connection).
    #[error("rcon error: {0}")]
    Rcon(#[from] rcon::Error),

    /// The remote session was already closed.
    #[error("session is closed")]
    SessionClosed,

    /// HTTP transport error (timeout, network failure).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote endpoint answered with a non-success status.
    #[error("remote endpoint returned {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// A required configuration value was never set.
    #[error("missing configuration: set {0}")]
    MissingConfig(&'static str),

    /// Configuration file error.
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Convenience Result type for craftops operations.
pub type Result<T> = std::result::Result<T, CraftopsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command_display() {
        let err = CraftopsError::EmptyCommand;
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_execution_failed_display() {
        let err = CraftopsError::ExecutionFailed("`ls -la /missing` (exit status: 2)".into());
        assert!(err.to_string().contains("command execution failed"));
        assert!(err.to_string().contains("ls -la /missing"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: CraftopsError = io_err.into();
        assert!(matches!(err, CraftopsError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_http_status_display() {
        let err = CraftopsError::HttpStatus {
            status: 403,
            body: "forbidden".into(),
        };
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("forbidden"));
    }

    #[test]
    fn test_missing_config_display() {
        let err = CraftopsError::MissingConfig("RCON_HOST");
        assert!(err.to_string().contains("RCON_HOST"));
        assert!(err.to_string().contains("missing configuration"));
    }

    #[test]
    fn test_session_closed_display() {
        let err = CraftopsError::SessionClosed;
        assert!(err.to_string().contains("closed"));
    }
}
