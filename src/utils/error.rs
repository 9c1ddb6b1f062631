use crate::domain::model::Operation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Network failure, timeout or non-2xx answer. The three are not told apart.
    #[error("API request failed [{operation}]: {source}")]
    RequestFailed {
        operation: Operation,
        /// Response body of a non-2xx answer, as sent by the server.
        body: Option<String>,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP client could not be built: {0}")]
    ClientBuildError(#[source] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl ClientError {
    pub(crate) fn request_failed(
        operation: Operation,
        source: reqwest::Error,
        body: Option<String>,
    ) -> Self {
        ClientError::RequestFailed {
            operation,
            body,
            source,
        }
    }

    /// HTTP status of a failed request, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::RequestFailed { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::RequestFailed { source, .. } if source.is_timeout())
    }

    pub fn response_body(&self) -> Option<&str> {
        match self {
            ClientError::RequestFailed { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
