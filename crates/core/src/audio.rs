//! Audio classification results.

use serde::{Deserialize, Serialize};

use crate::error::NormalizeError;

/// Maximum number of ranked speakers in a result.
pub const MAX_TOP_SPEAKERS: usize = 3;

/// One candidate speaker with its match confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerScore {
    pub speaker: String,
    pub confidence: f64,
}

/// Full result of `POST /api/audio/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioAnalysisResult {
    /// Whether the audio is judged human-recorded.
    pub is_real: bool,
    /// Confidence of the real/fake verdict, in `[0, 1]`.
    pub confidence_real_fake: f64,
    /// Most likely speaker.
    pub speaker: String,
    /// Confidence of the speaker match, in `[0, 1]`.
    pub confidence_speaker: f64,
    /// Ranked candidate speakers, at most three.
    #[serde(default)]
    pub top_3_speakers: Vec<SpeakerScore>,
}

/// Simplified verdict for the headline display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionSummary {
    pub is_ai: bool,
    pub confidence: f64,
}

impl AudioAnalysisResult {
    /// Check value ranges the JSON schema cannot express.
    pub fn validate(&self) -> Result<(), NormalizeError> {
        check_confidence("confidence_real_fake", self.confidence_real_fake)?;
        check_confidence("confidence_speaker", self.confidence_speaker)?;
        if self.top_3_speakers.len() > MAX_TOP_SPEAKERS {
            return Err(NormalizeError::TooManySpeakers {
                max: MAX_TOP_SPEAKERS,
                got: self.top_3_speakers.len(),
            });
        }
        for score in &self.top_3_speakers {
            check_confidence(&format!("speaker {}", score.speaker), score.confidence)?;
        }
        Ok(())
    }

    pub fn summary(&self) -> DetectionSummary {
        DetectionSummary {
            is_ai: !self.is_real,
            confidence: self.confidence_real_fake,
        }
    }

    /// Headline sentence shown once an analysis completes.
    pub fn verdict_text(&self) -> &'static str {
        if self.is_real {
            "This audio appears to be human-created"
        } else {
            "This audio appears to be AI-generated"
        }
    }
}

fn check_confidence(field: &str, value: f64) -> Result<(), NormalizeError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(NormalizeError::ConfidenceOutOfRange {
            field: field.to_string(),
            value,
        })
    }
}
