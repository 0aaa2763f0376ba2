use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Tool already registered: {name}")]
    DuplicateTool { name: String },

    #[error("Invalid arguments for tool {tool}: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Startup hook failed: {0}")]
    StartupHook(#[source] anyhow::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ServerError::DuplicateTool {
            name: "greet".to_string(),
        };
        assert_eq!(err.to_string(), "Tool already registered: greet");

        let err = ServerError::Configuration("bad log format".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad log format");
    }

    #[test]
    fn test_invalid_arguments_keeps_source() {
        let source = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let err = ServerError::InvalidArguments {
            tool: "add".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Invalid arguments for tool add:"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
