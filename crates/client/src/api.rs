use async_trait::async_trait;
use authnlens_core::{AudioAnalysisResult, FactCheckResponse, UploadFile};

use crate::{AuthnLensClient, Error};

/// The detection service as seen by the flows.
///
/// [`AuthnLensClient`] is the HTTP implementation; [`crate::mock`] has
/// in-memory ones for tests.
#[async_trait]
pub trait DetectionApi: Send + Sync + std::fmt::Debug {
    /// Probe `/health`. `Ok(false)` means the service answered non-2xx.
    async fn health(&self) -> Result<bool, Error>;

    /// Classify an audio file.
    async fn analyze_audio(&self, file: &UploadFile) -> Result<AudioAnalysisResult, Error>;

    /// Fact-check a claim.
    async fn factcheck(&self, text: &str) -> Result<FactCheckResponse, Error>;
}

#[async_trait]
impl DetectionApi for AuthnLensClient {
    async fn health(&self) -> Result<bool, Error> {
        AuthnLensClient::health(self).await
    }

    async fn analyze_audio(&self, file: &UploadFile) -> Result<AudioAnalysisResult, Error> {
        AuthnLensClient::analyze_audio(self, file).await
    }

    async fn factcheck(&self, text: &str) -> Result<FactCheckResponse, Error> {
        AuthnLensClient::factcheck(self, text).await
    }
}
