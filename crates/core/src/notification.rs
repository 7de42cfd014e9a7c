//! User-visible notifications raised by the flows.

use serde::{Deserialize, Serialize};

/// Fallback description when a failure carries no message.
pub const UNKNOWN_ERROR: &str = "An unknown error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational, nothing went wrong.
    Info,
    /// A failure the user should see.
    Destructive,
}

/// A transient toast-style message for the host to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }

    /// The health probe failed.
    pub fn connection_issue() -> Self {
        Self::destructive(
            "API Connection Issue",
            "Unable to connect to the detection server",
        )
    }

    /// An upload was rejected by validation.
    pub fn invalid_file(description: impl Into<String>) -> Self {
        Self::destructive("Invalid file", description)
    }

    pub fn no_audio_selected() -> Self {
        Self::destructive("No audio selected", "Please upload an audio file to analyze")
    }

    pub fn analysis_complete(verdict: impl Into<String>) -> Self {
        Self::info("Analysis complete", verdict)
    }

    pub fn analysis_failed(message: &str) -> Self {
        Self::destructive("Analysis failed", or_unknown(message))
    }

    pub fn no_claim() -> Self {
        Self::destructive("No claim", "Type or upload to verify.")
    }

    pub fn no_matches() -> Self {
        Self::info("No matches", "No reviews found.")
    }

    pub fn factcheck_failed(message: &str) -> Self {
        Self::destructive("Error", or_unknown(message))
    }
}

fn or_unknown(message: &str) -> String {
    if message.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message.to_string()
    }
}
