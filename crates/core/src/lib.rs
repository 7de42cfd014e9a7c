//! Core types for the AuthnLens detection client.
//!
//! Everything here is pure data and pure functions: upload validation, the
//! audio and fact-check result models, the rating lookup, view states and
//! notifications. Network I/O lives in `authnlens-client`; the stateful
//! flows live in `authnlens-flow`.

pub mod audio;
pub mod error;
pub mod factcheck;
pub mod health;
pub mod notification;
pub mod rating;
pub mod upload;
pub mod view;

pub use audio::{AudioAnalysisResult, DetectionSummary, MAX_TOP_SPEAKERS, SpeakerScore};
pub use error::{NormalizeError, ValidationError};
pub use factcheck::{
    Claim, ClaimReview, FactCheckRequest, FactCheckResponse, Publisher, ReviewEntry,
};
pub use health::HealthStatus;
pub use notification::{Notification, Severity, UNKNOWN_ERROR};
pub use rating::{RATING_FALLBACK, explain_rating, is_known_rating};
pub use upload::{AcceptPattern, UploadFile, UploadPolicy};
pub use view::{Phase, ViewState};
