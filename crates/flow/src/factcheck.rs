//! The claim fact-check flow.
//!
//! Claims are typed in directly or loaded from a `.txt` / `.pdf` document.
//! Documents decode in the background; the decoded text replaces the claim
//! text only if the same document is still staged when decoding finishes.

use std::sync::{Arc, Weak};

use authnlens_client::DetectionApi;
use authnlens_core::{
    HealthStatus, Notification, Phase, ReviewEntry, UploadFile, UploadPolicy, ValidationError,
    ViewState,
};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{Settlement, SubmitError, check_gate};
use crate::health::HealthMonitor;
use crate::notify::Notifier;
use crate::token::Generation;

/// Claims offered as one-click examples.
pub const EXAMPLE_CLAIMS: [&str; 3] = [
    "COVID-19 vaccines contain microchips.",
    "The moon landing was staged in a studio.",
    "Wind turbines cause cancer.",
];

const EXAMPLE_LABEL_CHARS: usize = 25;

/// Short button label for an example claim.
pub fn example_label(claim: &str) -> String {
    if claim.chars().count() > EXAMPLE_LABEL_CHARS {
        let head: String = claim.chars().take(EXAMPLE_LABEL_CHARS).collect();
        format!("{head}…")
    } else {
        claim.to_string()
    }
}

/// How the claim is being entered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Type,
    Upload,
}

#[derive(Debug)]
struct StagedDocument {
    id: u64,
    file: UploadFile,
}

#[derive(Debug, Default)]
struct FactCheckState {
    mode: InputMode,
    text: String,
    document: Option<StagedDocument>,
    next_document_id: u64,
    view: ViewState<Vec<ReviewEntry>>,
    health: HealthStatus,
    generation: Generation,
}

impl FactCheckState {
    /// The staged input changed: drop results and outstanding requests.
    /// Non-blank text or an accepted document counts as staged.
    fn restage(&mut self) {
        self.generation.advance();
        if self.text.trim().is_empty() && self.document.is_none() {
            self.view.reset();
        } else {
            self.view.stage();
        }
    }
}

/// Background decode of a staged claim document.
#[derive(Debug)]
pub enum DocumentDecode {
    /// Decoding on the runtime. Yields `true` if the text was applied.
    Pending(JoinHandle<bool>),
    /// No runtime was available, so the text was decoded and applied
    /// before `select_file` returned.
    Applied,
}

impl DocumentDecode {
    /// Wait for the decode to settle. Returns whether the decoded text
    /// became the claim text.
    pub async fn finished(self) -> bool {
        match self {
            Self::Pending(task) => task.await.unwrap_or_else(|e| {
                warn!(error = %e, "claim document decode task failed");
                false
            }),
            Self::Applied => true,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

/// Controller for the fact-check page.
#[derive(Debug, Clone)]
pub struct FactCheckFlow {
    api: Arc<dyn DetectionApi>,
    monitor: HealthMonitor,
    notifier: Notifier,
    policy: Arc<UploadPolicy>,
    state: Arc<Mutex<FactCheckState>>,
}

impl FactCheckFlow {
    /// Create a flow accepting plain text and PDF documents up to 10 MB.
    pub fn new(api: Arc<dyn DetectionApi>, notifier: Notifier) -> Self {
        Self {
            monitor: HealthMonitor::new(Arc::clone(&api), notifier.clone()),
            api,
            notifier,
            policy: Arc::new(UploadPolicy::documents()),
            state: Arc::new(Mutex::new(FactCheckState::default())),
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Probe service health once for this activation.
    pub async fn check_health(&self) -> HealthStatus {
        let status = self.monitor.probe().await;
        self.state.lock().health = status;
        status
    }

    pub fn set_mode(&self, mode: InputMode) {
        self.state.lock().mode = mode;
    }

    /// Replace the claim text. Clearing it returns the flow to idle.
    pub fn set_text(&self, text: impl Into<String>) {
        let mut state = self.state.lock();
        state.text = text.into();
        state.restage();
    }

    /// Stage one of [`EXAMPLE_CLAIMS`] in typing mode.
    pub fn use_example(&self, index: usize) -> Option<&'static str> {
        let claim = EXAMPLE_CLAIMS.get(index).copied()?;
        let mut state = self.state.lock();
        state.mode = InputMode::Type;
        state.text = claim.to_string();
        state.restage();
        Some(claim)
    }

    /// Stage a claim document and start decoding it.
    ///
    /// Inside a Tokio runtime this returns immediately and the claim text
    /// keeps its current value until the returned decode finishes; the
    /// decoded text is dropped if the document was replaced or the flow
    /// reset first. Without a runtime the document is decoded inline.
    pub fn select_file(&self, file: UploadFile) -> Result<DocumentDecode, ValidationError> {
        let file = match self.policy.check(file) {
            Ok(file) => file,
            Err(e) => {
                warn!(error = %e, "rejected claim document");
                let description = match e {
                    ValidationError::UnsupportedType { .. } => "Only .txt or .pdf allowed.".to_string(),
                    ValidationError::TooLarge { .. } => e.to_string(),
                };
                self.notifier.notify(Notification::invalid_file(description));
                return Err(e);
            }
        };

        let data = file.data.clone();
        let id = {
            let mut state = self.state.lock();
            state.next_document_id += 1;
            let id = state.next_document_id;
            info!(file_name = %file.name, document = id, "staged claim document");
            state.document = Some(StagedDocument { id, file });
            state.restage();
            id
        };

        let state = Arc::downgrade(&self.state);
        let Ok(runtime) = Handle::try_current() else {
            debug!(document = id, "no runtime, decoding claim document inline");
            apply_decoded(&state, id, decode_text(&data));
            return Ok(DocumentDecode::Applied);
        };

        Ok(DocumentDecode::Pending(runtime.spawn(async move {
            let decoded = tokio::task::spawn_blocking(move || decode_text(&data)).await;
            match decoded {
                Ok(text) => apply_decoded(&state, id, text),
                Err(e) => {
                    warn!(error = %e, document = id, "claim document decode failed");
                    false
                }
            }
        })))
    }

    /// Fact-check the staged claim and apply the outcome.
    ///
    /// An empty claim raises a "No claim" notification. An empty review list
    /// completes normally with a "No matches" notification. On failure the
    /// previously shown reviews, if any, stay shown.
    pub async fn verify(&self) -> Result<Settlement<Vec<ReviewEntry>>, SubmitError> {
        let (token, text, previous) = {
            let mut state = self.state.lock();
            if state.text.trim().is_empty() {
                drop(state);
                self.notifier.notify(Notification::no_claim());
                return Err(SubmitError::NothingStaged);
            }
            check_gate(state.health, &state.view)?;

            let previous = match state.view.begin() {
                Some(ViewState::Complete(entries)) => Some(entries),
                Some(_) => None,
                None => return Err(SubmitError::NothingStaged),
            };
            (state.generation.current(), state.text.clone(), previous)
        };

        debug!(token = token.value(), "verifying claim");
        let outcome = self.api.factcheck(&text).await;

        let mut state = self.state.lock();
        if !state.generation.is_current(token) {
            warn!(token = token.value(), "discarding stale fact-check");
            return Ok(Settlement::Discarded);
        }

        match outcome {
            Ok(response) => {
                let entries = response.flatten_reviews();
                state.view.complete(entries.clone());
                drop(state);
                info!(reviews = entries.len(), "fact-check complete");
                if entries.is_empty() {
                    self.notifier.notify(Notification::no_matches());
                }
                Ok(Settlement::Completed(entries))
            }
            Err(e) => {
                match previous {
                    Some(entries) => state.view.complete(entries),
                    None => state.view.fail(),
                }
                drop(state);
                let message = e.user_message();
                warn!(error = %e, "fact-check failed");
                self.notifier.notify(Notification::factcheck_failed(&message));
                Ok(Settlement::Failed(message))
            }
        }
    }

    /// Clear the claim, the document and the results.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.text.clear();
        state.document = None;
        state.generation.advance();
        state.view.reset();
        info!("fact-check flow reset");
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

    pub fn mode(&self) -> InputMode {
        self.state.lock().mode
    }

    pub fn text(&self) -> String {
        self.state.lock().text.clone()
    }

    pub fn file_name(&self) -> Option<String> {
        self.state
            .lock()
            .document
            .as_ref()
            .map(|d| d.file.name.clone())
    }

    /// Whether the verify control should be enabled.
    pub fn can_submit(&self) -> bool {
        let state = self.state.lock();
        !state.text.trim().is_empty() && check_gate(state.health, &state.view).is_ok()
    }

    /// Reviews to display; empty unless the flow is complete.
    pub fn results(&self) -> Vec<ReviewEntry> {
        self.state
            .lock()
            .view
            .result()
            .cloned()
            .unwrap_or_default()
    }
}

fn decode_text(data: &[u8]) -> String {
    String::from_utf8_lossy(data).into_owned()
}

fn apply_decoded(state: &Weak<Mutex<FactCheckState>>, id: u64, text: String) -> bool {
    let Some(state) = state.upgrade() else {
        return false;
    };
    let mut state = state.lock();
    if state.document.as_ref().map(|d| d.id) != Some(id) {
        debug!(document = id, "dropping decode for replaced document");
        return false;
    }
    state.text = text;
    state.restage();
    true
}
