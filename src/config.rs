use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// MCP protocol revision announced during `initialize`
pub const DEFAULT_PROTOCOL_VERSION: &str = "2025-06-18";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ServerError::Configuration(format!(
                "Invalid log format '{other}'. Must be 'text' or 'json'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Log filter directive (error, warn, info, debug, trace or a full EnvFilter directive string)
    pub log_level: String,

    /// Log output format on stderr
    pub log_format: LogFormat,

    /// Protocol version reported to clients
    pub protocol_version: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            protocol_version: DEFAULT_PROTOCOL_VERSION.to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables, reading `.env` if present
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let mut config = RuntimeConfig::default();

        if let Ok(level) = env::var("MCP_LOG_LEVEL") {
            config.log_level = level;
        } else if let Ok(level) = env::var("RUST_LOG") {
            config.log_level = level;
        }

        if let Ok(format) = env::var("MCP_LOG_FORMAT") {
            config.log_format = format.parse()?;
        }

        if let Ok(version) = env::var("MCP_PROTOCOL_VERSION") {
            config.protocol_version = version;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            return Err(ServerError::Configuration(
                "Log level cannot be empty".to_string(),
            ));
        }
        if self.protocol_version.trim().is_empty() {
            return Err(ServerError::Configuration(
                "Protocol version cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var("MCP_LOG_LEVEL");
        env::remove_var("RUST_LOG");
        env::remove_var("MCP_LOG_FORMAT");
        env::remove_var("MCP_PROTOCOL_VERSION");
    }

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.protocol_version, "2025-06-18");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(" TEXT ".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        env::set_var("MCP_LOG_LEVEL", "debug");
        env::set_var("MCP_LOG_FORMAT", "json");
        env::set_var("MCP_PROTOCOL_VERSION", "2025-03-26");

        let config = RuntimeConfig::from_env().unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.protocol_version, "2025-03-26");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_rust_log_fallback() {
        clear_env();
        env::set_var("RUST_LOG", "warn");

        let config = RuntimeConfig::from_env().unwrap();
        assert_eq!(config.log_level, "warn");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_log_format() {
        clear_env();
        env::set_var("MCP_LOG_FORMAT", "xml");

        let err = RuntimeConfig::from_env().unwrap_err();
        assert!(matches!(err, ServerError::Configuration(_)));

        clear_env();
    }
}
