//! Tracing subscriber setup
//!
//! Logs always go to stderr: with the stdio transport, stdout carries
//! protocol frames and nothing else.

use crate::config::{LogFormat, RuntimeConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// Returns `false` when a subscriber was already installed (e.g. by the
/// embedding application or a test harness); that is not an error.
pub fn init_logging(config: &RuntimeConfig) -> bool {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.log_format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_tolerated() {
        let config = RuntimeConfig::default();
        init_logging(&config);
        // A subscriber is now installed either way
        assert!(!init_logging(&config));
    }

    #[test]
    fn test_invalid_filter_falls_back() {
        let config = RuntimeConfig {
            log_level: "not a [valid filter".to_string(),
            ..RuntimeConfig::default()
        };
        // Must not panic
        init_logging(&config);
    }
}
