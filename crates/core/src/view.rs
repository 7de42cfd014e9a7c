use std::fmt;

/// UI state of a detection flow. Exactly one holds at a time; errors are
/// reported as notifications and never stored here.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState<T> {
    /// Nothing staged.
    #[default]
    Idle,
    /// Input staged, not yet submitted.
    Ready,
    /// A request is in flight.
    Analyzing,
    /// The last request succeeded.
    Complete(T),
}

/// Field-less discriminant of a [`ViewState`], for logging and comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Ready,
    Analyzing,
    Complete,
}

impl<T> ViewState<T> {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Idle => Phase::Idle,
            Self::Ready => Phase::Ready,
            Self::Analyzing => Phase::Analyzing,
            Self::Complete(_) => Phase::Complete,
        }
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self, Self::Analyzing)
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            Self::Complete(result) => Some(result),
            _ => None,
        }
    }

    /// Input was staged or changed. Any completed result is dropped.
    pub fn stage(&mut self) {
        *self = Self::Ready;
    }

    /// Move to `Analyzing` if the state allows a submission.
    ///
    /// Returns the displaced state so the caller can keep a previous result
    /// around, or `None` when the state refuses (`Idle` or `Analyzing`).
    pub fn begin(&mut self) -> Option<Self> {
        match self {
            Self::Ready | Self::Complete(_) => Some(std::mem::replace(self, Self::Analyzing)),
            Self::Idle | Self::Analyzing => None,
        }
    }

    pub fn complete(&mut self, result: T) {
        *self = Self::Complete(result);
    }

    /// Back to an actionable state after a failed request.
    pub fn fail(&mut self) {
        *self = Self::Ready;
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Ready => "ready",
            Self::Analyzing => "analyzing",
            Self::Complete => "complete",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_only_from_ready_or_complete() {
        let mut state: ViewState<u8> = ViewState::Idle;
        assert!(state.begin().is_none());
        assert_eq!(state.phase(), Phase::Idle);

        state.stage();
        assert_eq!(state.begin(), Some(ViewState::Ready));
        assert!(state.is_analyzing());
        assert!(state.begin().is_none());

        state.complete(7);
        assert_eq!(state.result(), Some(&7));
        assert_eq!(state.begin(), Some(ViewState::Complete(7)));
        assert_eq!(state.result(), None);
    }

    #[test]
    fn staging_discards_completed_result() {
        let mut state = ViewState::Complete("old");
        state.stage();
        assert_eq!(state, ViewState::Ready);
    }

    #[test]
    fn failure_returns_to_ready_and_reset_to_idle() {
        let mut state: ViewState<()> = ViewState::Analyzing;
        state.fail();
        assert_eq!(state.phase(), Phase::Ready);
        state.reset();
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.phase().to_string(), "idle");
    }
}
