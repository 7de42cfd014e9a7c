use std::fmt;

use serde::{Deserialize, Serialize};

/// Reachability of the detection service as last observed by a probe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// No probe has settled yet.
    #[default]
    Unknown,
    /// The last probe returned a 2xx status.
    Online,
    /// The last probe failed or returned a non-2xx status.
    Offline,
}

impl HealthStatus {
    /// Map a probe outcome to a status.
    pub fn from_probe(healthy: bool) -> Self {
        if healthy { Self::Online } else { Self::Offline }
    }

    /// Only an observed `Online` permits submission; `Unknown` does not.
    pub fn allows_submission(self) -> bool {
        self == Self::Online
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unknown => "unknown",
            Self::Online => "online",
            Self::Offline => "offline",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unknown() {
        assert_eq!(HealthStatus::default(), HealthStatus::Unknown);
    }

    #[test]
    fn only_online_allows_submission() {
        assert!(HealthStatus::Online.allows_submission());
        assert!(!HealthStatus::Offline.allows_submission());
        assert!(!HealthStatus::Unknown.allows_submission());
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Offline).unwrap(),
            r#""offline""#
        );
        assert_eq!(HealthStatus::from_probe(true).to_string(), "online");
    }
}
