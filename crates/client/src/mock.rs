use std::sync::Arc;

use async_trait::async_trait;
use authnlens_core::{AudioAnalysisResult, FactCheckResponse, UploadFile};
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::api::DetectionApi;
use crate::error::Error;

/// A mock detection service returning configurable responses.
///
/// Calls are recorded so tests can assert on what was sent. A mock built
/// with [`MockDetectionApi::gated`] holds every analysis and fact-check
/// response until the gate is notified, one response per notification.
#[derive(Debug, Clone)]
pub struct MockDetectionApi {
    healthy: Result<bool, Error>,
    audio: Result<AudioAnalysisResult, Error>,
    factcheck: Result<FactCheckResponse, Error>,
    gate: Option<Arc<Notify>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

/// A request the mock received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Health,
    AnalyzeAudio { file_name: String, size: u64 },
    FactCheck { text: String },
}

impl Default for MockDetectionApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDetectionApi {
    /// A healthy service that answers an empty fact-check and fails audio
    /// analysis until a result is configured.
    pub fn new() -> Self {
        Self {
            healthy: Ok(true),
            audio: Err(Error::Api {
                message: "no audio result configured".into(),
            }),
            factcheck: Ok(FactCheckResponse::default()),
            gate: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the health probe outcome.
    #[must_use]
    pub fn with_health(mut self, healthy: Result<bool, Error>) -> Self {
        self.healthy = healthy;
        self
    }

    /// Set the audio analysis outcome.
    #[must_use]
    pub fn with_audio(mut self, audio: Result<AudioAnalysisResult, Error>) -> Self {
        self.audio = audio;
        self
    }

    /// Set the fact-check outcome.
    #[must_use]
    pub fn with_factcheck(mut self, factcheck: Result<FactCheckResponse, Error>) -> Self {
        self.factcheck = factcheck;
        self
    }

    /// Hold responses until the returned gate is notified.
    #[must_use]
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    /// All calls received so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    async fn wait_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl DetectionApi for MockDetectionApi {
    async fn health(&self) -> Result<bool, Error> {
        self.calls.lock().push(MockCall::Health);
        self.healthy.clone()
    }

    async fn analyze_audio(&self, file: &UploadFile) -> Result<AudioAnalysisResult, Error> {
        self.calls.lock().push(MockCall::AnalyzeAudio {
            file_name: file.name.clone(),
            size: file.size(),
        });
        self.wait_gate().await;
        self.audio.clone()
    }

    async fn factcheck(&self, text: &str) -> Result<FactCheckResponse, Error> {
        self.calls.lock().push(MockCall::FactCheck {
            text: text.to_string(),
        });
        self.wait_gate().await;
        self.factcheck.clone()
    }
}

/// A mock detection service whose every call fails to connect.
#[derive(Debug, Clone)]
pub struct FailingDetectionApi {
    error_message: String,
}

impl FailingDetectionApi {
    /// Create a failing service with the given transport error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error_message: message.into(),
        }
    }

    fn error(&self) -> Error {
        Error::Connection(self.error_message.clone())
    }
}

#[async_trait]
impl DetectionApi for FailingDetectionApi {
    async fn health(&self) -> Result<bool, Error> {
        Err(self.error())
    }

    async fn analyze_audio(&self, _file: &UploadFile) -> Result<AudioAnalysisResult, Error> {
        Err(self.error())
    }

    async fn factcheck(&self, _text: &str) -> Result<FactCheckResponse, Error> {
        Err(self.error())
    }
}
