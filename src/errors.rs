use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Failed to read resource input: {0}")]
    Input(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Failed to read local file: {0}")]
    Io(String),

    #[error("Failed to send HTTP request: {0}")]
    Network(String),

    #[error("Expected 200 response code but got {status}")]
    Protocol { status: u16, body: String },

    #[error("Failed to decode Slack API response: {0}")]
    Decode(String),

    #[error("Slack API returned 'ok': false ({code})")]
    Api { code: String, body: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<std::io::Error> for ResourceError {
    fn from(error: std::io::Error) -> Self {
        ResourceError::Io(error.to_string())
    }
}

impl From<reqwest::Error> for ResourceError {
    fn from(error: reqwest::Error) -> Self {
        ResourceError::Network(error.to_string())
    }
}

impl From<serde_json::Error> for ResourceError {
    fn from(error: serde_json::Error) -> Self {
        ResourceError::Decode(error.to_string())
    }
}

impl From<url::ParseError> for ResourceError {
    fn from(error: url::ParseError) -> Self {
        ResourceError::Config(format!("invalid URL: {error}"))
    }
}
