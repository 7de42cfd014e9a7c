use authnlens_core::{HealthStatus, ViewState};
use thiserror::Error;

/// Why a submission was refused before any request was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// No file or claim text is staged.
    #[error("nothing staged to submit")]
    NothingStaged,

    /// The health probe has not settled yet.
    #[error("service health not yet known")]
    HealthUnknown,

    /// The last health probe failed.
    #[error("service is offline")]
    Offline,

    /// A request from this flow is already in flight.
    #[error("a request is already in flight")]
    InFlight,
}

/// How an accepted submission ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement<T> {
    /// The request succeeded and its result was applied.
    Completed(T),
    /// The request failed; the message was shown to the user.
    Failed(String),
    /// The flow was reset or its input changed while the request was in
    /// flight, so the outcome was dropped.
    Discarded,
}

impl<T> Settlement<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_discarded(&self) -> bool {
        matches!(self, Self::Discarded)
    }
}

/// Refuse a submission while one is in flight or the service is not known
/// to be online.
pub(crate) fn check_gate<T>(health: HealthStatus, view: &ViewState<T>) -> Result<(), SubmitError> {
    if view.is_analyzing() {
        return Err(SubmitError::InFlight);
    }
    match health {
        HealthStatus::Online => Ok(()),
        HealthStatus::Unknown => Err(SubmitError::HealthUnknown),
        HealthStatus::Offline => Err(SubmitError::Offline),
    }
}
