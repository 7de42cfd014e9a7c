use authnlens_core::NormalizeError;
use thiserror::Error;

/// Errors returned by the AuthnLens client.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The request never produced a response (DNS, refused, reset, timeout).
    #[error("connection error: {0}")]
    Connection(String),

    /// The service answered with a non-2xx status.
    ///
    /// `message` is the body's `error` field when present, otherwise
    /// `API error: <status>`.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The service answered 2xx but the body carries an `error` field.
    #[error("{message}")]
    Api { message: String },

    /// The body was not the JSON shape expected.
    #[error("failed to decode response: {0}")]
    Deserialization(String),

    /// The body parsed but its values break the result contract.
    #[error("malformed response: {0}")]
    Malformed(#[from] NormalizeError),

    /// The client could not be built.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// The text shown to the user when a request fails.
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { message, .. } | Self::Api { message } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether the failure happened below the HTTP layer.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
