//! CLI-specific error types
//!
//! Every CLI error is fatal: it is printed and the process exits non-zero.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::seed::SeedError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file or environment error
    ConfigError,
    /// I/O error (stdout, runtime, socket)
    IoError,
    /// Seed data could not be loaded
    SeedFailed,
    /// Server failed to start or crashed
    ServeFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "BOOTCAMP_CLI_CONFIG_ERROR",
            Self::IoError => "BOOTCAMP_CLI_IO_ERROR",
            Self::SeedFailed => "BOOTCAMP_CLI_SEED_FAILED",
            Self::ServeFailed => "BOOTCAMP_CLI_SERVE_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn seed_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::SeedFailed, msg)
    }

    pub fn serve_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ServeFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<SeedError> for CliError {
    fn from(e: SeedError) -> Self {
        Self::seed_failed(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_code() {
        let err = CliError::config_error("Invalid value for PORT: abc");
        assert_eq!(
            err.to_string(),
            "BOOTCAMP_CLI_CONFIG_ERROR: Invalid value for PORT: abc"
        );
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_from_config_error() {
        let err: CliError = ConfigError::InvalidEnv {
            name: "PORT".into(),
            value: "x".into(),
        }
        .into();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
        assert!(err.message().contains("PORT"));
    }
}
