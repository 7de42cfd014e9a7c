//! AuthnLens HTTP Client
//!
//! A native Rust client for the AuthnLens detection service: health probes,
//! audio deepfake classification and claim fact-checking.
//!
//! # Quick Start
//!
//! ```no_run
//! use authnlens_client::AuthnLensClient;
//! use authnlens_core::UploadFile;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), authnlens_client::Error> {
//!     let client = AuthnLensClient::new("http://localhost:5000");
//!
//!     if client.health().await? {
//!         println!("Service is up");
//!     }
//!
//!     let file = UploadFile::new("clip.wav", "audio/wav", std::fs::read("clip.wav").unwrap());
//!     let result = client.analyze_audio(&file).await?;
//!     println!("AI generated: {}", result.summary().is_ai);
//!
//!     let reviews = client.factcheck("Wind turbines cause cancer.").await?;
//!     for entry in reviews.flatten_reviews() {
//!         println!("{:?}: {:?}", entry.publisher_name, entry.textual_rating);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! The base URL comes from the caller, or from the environment through
//! [`ClientConfig::from_env`]. No request timeout is applied unless one is
//! set on the builder:
//!
//! ```no_run
//! use authnlens_client::AuthnLensClientBuilder;
//! use std::time::Duration;
//!
//! let client = AuthnLensClientBuilder::new("http://localhost:5000")
//!     .timeout(Duration::from_secs(60))
//!     .build()
//!     .unwrap();
//! ```

mod analyze;
pub mod api;
pub mod config;
mod error;
mod factcheck;
pub mod mock;

#[cfg(test)]
mod test_support;

pub use api::DetectionApi;
pub use config::{API_URL_ENV, ClientConfig, DEFAULT_API_URL};
pub use error::Error;
pub use mock::{FailingDetectionApi, MockCall, MockDetectionApi};

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::warn;

/// HTTP client for the AuthnLens detection service.
#[derive(Debug, Clone)]
pub struct AuthnLensClient {
    client: Client,
    base_url: String,
}

/// Builder for configuring an [`AuthnLensClient`].
#[derive(Debug)]
pub struct AuthnLensClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    client: Option<Client>,
}

impl AuthnLensClientBuilder {
    /// Create a new builder with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: None,
            client: None,
        }
    }

    /// Set a request timeout. By default requests wait as long as the
    /// network stack allows.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a custom reqwest Client.
    ///
    /// Useful for configuring TLS, proxies, or other advanced settings.
    #[must_use]
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<AuthnLensClient, Error> {
        let client = match self.client {
            Some(c) => c,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder
                    .build()
                    .map_err(|e| Error::Configuration(e.to_string()))?
            }
        };

        Ok(AuthnLensClient {
            client,
            base_url: self.base_url,
        })
    }
}

impl AuthnLensClient {
    /// Create a new client with default configuration.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use authnlens_client::AuthnLensClient;
    ///
    /// let client = AuthnLensClient::new("http://localhost:5000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        AuthnLensClientBuilder::new(base_url)
            .build()
            .expect("default client configuration should not fail")
    }

    /// Create a builder for advanced configuration.
    pub fn builder(base_url: impl Into<String>) -> AuthnLensClientBuilder {
        AuthnLensClientBuilder::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Check if the service is healthy.
    ///
    /// Returns `Ok(false)` for a non-2xx status and `Err` only when no
    /// response arrived at all.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> Result<(), authnlens_client::Error> {
    /// use authnlens_client::AuthnLensClient;
    ///
    /// let client = AuthnLensClient::new("http://localhost:5000");
    /// let healthy = client.health().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn health(&self) -> Result<bool, Error> {
        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        Ok(response.status().is_success())
    }
}

/// Decode a service response, checking both the HTTP status and the
/// application-level `error` field.
async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| Error::Connection(e.to_string()))?;

    if !status.is_success() {
        let message = serde_json::from_slice::<serde_json::Value>(&body)
            .ok()
            .as_ref()
            .and_then(error_message)
            .unwrap_or_else(|| format!("API error: {}", status.as_u16()));
        warn!(status = %status, message = %message, "service returned error status");
        return Err(Error::Http {
            status: status.as_u16(),
            message,
        });
    }

    let value: serde_json::Value =
        serde_json::from_slice(&body).map_err(|e| Error::Deserialization(e.to_string()))?;

    if let Some(message) = error_message(&value) {
        warn!(message = %message, "service reported an application error");
        return Err(Error::Api { message });
    }

    serde_json::from_value(value).map_err(|e| Error::Deserialization(e.to_string()))
}

/// Extract the `error` field of a body when it is set.
///
/// `null`, `false`, `0` and the empty string count as unset.
fn error_message(value: &serde_json::Value) -> Option<String> {
    use serde_json::Value;

    match value.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockServer;
    use serde_json::json;

    #[test]
    fn client_trims_trailing_slash() {
        let client = AuthnLensClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn client_preserves_url_without_slash() {
        let client = AuthnLensClient::new("http://localhost:5000");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/health"), "http://localhost:5000/health");
    }

    #[test]
    fn error_message_follows_truthiness() {
        assert_eq!(
            error_message(&json!({"error": "model unavailable"})),
            Some("model unavailable".into())
        );
        assert_eq!(
            error_message(&json!({"error": {"code": 7}})),
            Some(r#"{"code":7}"#.into())
        );
        assert_eq!(error_message(&json!({"error": true})), Some("true".into()));
        assert_eq!(error_message(&json!({"error": null})), None);
        assert_eq!(error_message(&json!({"error": ""})), None);
        assert_eq!(error_message(&json!({"error": false})), None);
        assert_eq!(error_message(&json!({"error": 0})), None);
        assert_eq!(error_message(&json!({"claims": []})), None);
        assert_eq!(error_message(&json!([1, 2])), None);
    }

    #[tokio::test]
    async fn health_ok() {
        let server = MockServer::start().await;
        let client = AuthnLensClient::new(server.base_url.clone());
        let handle = tokio::spawn(server.respond_once(200, r#"{"status":"ok"}"#));

        assert!(client.health().await.unwrap());
        let request = handle.await.unwrap();
        assert!(request.head.starts_with("GET /health HTTP/1.1"));
    }

    #[tokio::test]
    async fn health_non_success_is_unhealthy() {
        let server = MockServer::start().await;
        let client = AuthnLensClient::new(server.base_url.clone());
        let handle = tokio::spawn(server.respond_once(503, "{}"));

        assert!(!client.health().await.unwrap());
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn health_transport_failure_is_connection_error() {
        let base_url = MockServer::closed_url().await;
        let client = AuthnLensClient::new(base_url);
        let err = client.health().await.unwrap_err();
        assert!(err.is_connectivity());
    }
}
