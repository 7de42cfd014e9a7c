//! The audio deepfake detection flow.
//!
//! One [`AudioFlow`] backs one detector page: a staged audio file with its
//! local preview, the service health gate, and at most one analysis in
//! flight. Handles are cheap clones over shared state, so the host can keep
//! one in its event loop and hand another to the task awaiting
//! [`AudioFlow::analyze`].

use std::sync::Arc;

use authnlens_client::DetectionApi;
use authnlens_core::{
    AudioAnalysisResult, DetectionSummary, HealthStatus, Notification, Phase, UploadFile,
    UploadPolicy, ValidationError, ViewState,
};
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::error::{Settlement, SubmitError, check_gate};
use crate::health::HealthMonitor;
use crate::notify::Notifier;
use crate::preview::{PreviewRef, PreviewRegistry};
use crate::token::Generation;

#[derive(Debug)]
struct AudioState {
    file: Option<UploadFile>,
    preview: Option<PreviewRef>,
    view: ViewState<AudioAnalysisResult>,
    /// Result of the last completed analysis while a re-analysis runs or
    /// after it failed.
    previous: Option<AudioAnalysisResult>,
    health: HealthStatus,
    generation: Generation,
    previews: Arc<PreviewRegistry>,
}

impl AudioState {
    fn release_preview(&mut self) {
        if let Some(preview) = self.preview.take() {
            self.previews.revoke(preview);
        }
    }
}

// Teardown of the last handle releases a preview still held.
impl Drop for AudioState {
    fn drop(&mut self) {
        self.release_preview();
    }
}

/// Controller for the audio detection page.
#[derive(Debug, Clone)]
pub struct AudioFlow {
    api: Arc<dyn DetectionApi>,
    monitor: HealthMonitor,
    notifier: Notifier,
    policy: Arc<UploadPolicy>,
    previews: Arc<PreviewRegistry>,
    state: Arc<Mutex<AudioState>>,
}

impl AudioFlow {
    /// Create a flow accepting any audio type up to 10 MB.
    pub fn new(
        api: Arc<dyn DetectionApi>,
        previews: Arc<PreviewRegistry>,
        notifier: Notifier,
    ) -> Self {
        Self::with_policy(api, previews, notifier, UploadPolicy::audio())
    }

    pub fn with_policy(
        api: Arc<dyn DetectionApi>,
        previews: Arc<PreviewRegistry>,
        notifier: Notifier,
        policy: UploadPolicy,
    ) -> Self {
        let state = AudioState {
            file: None,
            preview: None,
            view: ViewState::Idle,
            previous: None,
            health: HealthStatus::Unknown,
            generation: Generation::default(),
            previews: Arc::clone(&previews),
        };
        Self {
            monitor: HealthMonitor::new(Arc::clone(&api), notifier.clone()),
            api,
            notifier,
            policy: Arc::new(policy),
            previews,
            state: Arc::new(Mutex::new(state)),
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Probe service health. Call once when the page activates, and again
    /// only when the user asks to retry.
    pub async fn check_health(&self) -> HealthStatus {
        let status = self.monitor.probe().await;
        self.state.lock().health = status;
        status
    }

    /// Stage a user-selected file.
    ///
    /// A rejected file raises an "Invalid file" notification and leaves the
    /// previously staged file, preview and result untouched. An accepted
    /// file replaces the previous one, releases its preview, drops any
    /// result and invalidates an analysis in flight.
    pub fn select_file(&self, file: UploadFile) -> Result<(), ValidationError> {
        let file = match self.policy.check(file) {
            Ok(file) => file,
            Err(e) => {
                warn!(error = %e, "rejected audio file");
                self.notifier.notify(Notification::invalid_file(e.to_string()));
                return Err(e);
            }
        };

        let preview = self.previews.create(&file);
        info!(file_name = %file.name, size = file.size(), "staged audio file");

        let replaced = {
            let mut state = self.state.lock();
            state.generation.advance();
            state.view.stage();
            state.previous = None;
            state.file = Some(file);
            state.preview.replace(preview)
        };
        if let Some(old) = replaced {
            self.previews.revoke(old);
        }
        Ok(())
    }

    /// Submit the staged file for analysis and apply the outcome.
    ///
    /// Refusals return `Err` without contacting the service; only the
    /// "nothing staged" refusal notifies, since the host disables the
    /// control in every other case. Once accepted, the request always
    /// settles back to an actionable state. If the flow was reset or the
    /// file replaced meanwhile, the outcome is dropped.
    pub async fn analyze(&self) -> Result<Settlement<AudioAnalysisResult>, SubmitError> {
        let (token, file) = {
            let mut state = self.state.lock();
            let Some(file) = state.file.clone() else {
                drop(state);
                self.notifier.notify(Notification::no_audio_selected());
                return Err(SubmitError::NothingStaged);
            };
            check_gate(state.health, &state.view)?;

            if let Some(ViewState::Complete(previous)) = state.view.begin() {
                state.previous = Some(previous);
            }
            (state.generation.current(), file)
        };

        info!(file_name = %file.name, token = token.value(), "analyzing audio");
        let outcome = self.api.analyze_audio(&file).await;

        let mut state = self.state.lock();
        if !state.generation.is_current(token) {
            warn!(token = token.value(), "discarding stale audio analysis");
            return Ok(Settlement::Discarded);
        }

        match outcome {
            Ok(result) => {
                state.view.complete(result.clone());
                state.previous = None;
                drop(state);
                info!(
                    is_real = result.is_real,
                    confidence = result.confidence_real_fake,
                    "audio analysis complete"
                );
                self.notifier
                    .notify(Notification::analysis_complete(result.verdict_text()));
                Ok(Settlement::Completed(result))
            }
            Err(e) => {
                state.view.fail();
                drop(state);
                let message = e.user_message();
                warn!(error = %e, "audio analysis failed");
                self.notifier.notify(Notification::analysis_failed(&message));
                Ok(Settlement::Failed(message))
            }
        }
    }

    /// Return to idle: release the preview, drop the file and any result.
    /// A request in flight keeps running but its outcome is discarded.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.generation.advance();
        state.view.reset();
        state.file = None;
        state.previous = None;
        state.release_preview();
        info!("audio flow reset");
    }

    // =========================================================================
    // View
    // =========================================================================

    pub fn phase(&self) -> Phase {
        self.state.lock().view.phase()
    }

    pub fn health(&self) -> HealthStatus {
        self.state.lock().health
    }

    /// Whether the analyze control should be enabled.
    pub fn can_submit(&self) -> bool {
        let state = self.state.lock();
        state.file.is_some() && check_gate(state.health, &state.view).is_ok()
    }

    /// Whether the reset control should be shown.
    pub fn can_reset(&self) -> bool {
        let state = self.state.lock();
        state.file.is_some() || state.view.result().is_some()
    }

    pub fn file_name(&self) -> Option<String> {
        self.state.lock().file.as_ref().map(|f| f.name.clone())
    }

    /// URL of the staged file's local preview.
    pub fn preview_url(&self) -> Option<String> {
        self.state.lock().preview.as_ref().map(PreviewRef::url)
    }

    /// The full result, while the flow is complete.
    pub fn result(&self) -> Option<AudioAnalysisResult> {
        self.state.lock().view.result().cloned()
    }

    /// The headline verdict, while the flow is complete.
    pub fn summary(&self) -> Option<DetectionSummary> {
        self.state
            .lock()
            .view
            .result()
            .map(AudioAnalysisResult::summary)
    }

    /// The last completed result, kept while a re-analysis is running or
    /// after it failed. Cleared by reset and by selecting another file.
    pub fn previous_result(&self) -> Option<AudioAnalysisResult> {
        self.state.lock().previous.clone()
    }
}
