use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::{AuthnLensClient, Error};

/// Environment variable overriding the service base URL.
pub const API_URL_ENV: &str = "AUTHNLENS_API_URL";

/// Base URL used when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Connection settings for the detection service.
///
/// Deserializable so hosts can embed it in their own configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the service.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Request timeout in seconds. Unset means no client-side timeout.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_seconds: None,
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl ClientConfig {
    /// Read the base URL from `AUTHNLENS_API_URL`, falling back to
    /// [`DEFAULT_API_URL`] when it is unset or blank.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = match lookup(API_URL_ENV) {
            Some(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => {
                info!("{API_URL_ENV} not set, using default: {DEFAULT_API_URL}");
                default_api_url()
            }
        };
        Self {
            api_url,
            ..Self::default()
        }
    }

    /// Set the request timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Build a client from this configuration.
    pub fn into_client(self) -> Result<AuthnLensClient, Error> {
        let mut builder = AuthnLensClient::builder(self.api_url);
        if let Some(seconds) = self.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_service() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.timeout_seconds, None);
    }

    #[test]
    fn blank_override_is_ignored() {
        let config = ClientConfig::from_lookup(|_| Some("   ".into()));
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn override_is_used() {
        let config = ClientConfig::from_lookup(|key| {
            (key == API_URL_ENV).then(|| "https://lens.example.com/".to_string())
        });
        assert_eq!(config.api_url, "https://lens.example.com/");
        let client = config.into_client().unwrap();
        assert_eq!(client.base_url(), "https://lens.example.com");
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());

        let config: ClientConfig =
            serde_json::from_str(r#"{"api_url": "http://10.0.0.2:5000", "timeout_seconds": 20}"#)
                .unwrap();
        assert_eq!(config.api_url, "http://10.0.0.2:5000");
        assert_eq!(config.timeout_seconds, Some(20));
    }

    #[test]
    fn with_timeout_sets_seconds() {
        let config = ClientConfig::default().with_timeout(5);
        assert_eq!(config.timeout_seconds, Some(5));
        assert!(config.into_client().is_ok());
    }
}
