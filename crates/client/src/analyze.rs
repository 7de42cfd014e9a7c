use authnlens_core::{AudioAnalysisResult, UploadFile};
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::{AuthnLensClient, Error, decode_response};

impl AuthnLensClient {
    /// Classify an audio file as human-recorded or AI-generated.
    ///
    /// The file is sent as a single multipart part named `file`. A 2xx
    /// response whose body carries an `error` field is reported as
    /// [`Error::Api`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> Result<(), authnlens_client::Error> {
    /// use authnlens_client::AuthnLensClient;
    /// use authnlens_core::UploadFile;
    ///
    /// let client = AuthnLensClient::new("http://localhost:5000");
    /// let file = UploadFile::new("clip.wav", "audio/wav", vec![0u8; 44]);
    /// let result = client.analyze_audio(&file).await?;
    /// println!("speaker: {} ({:.0}%)", result.speaker, result.confidence_speaker * 100.0);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn analyze_audio(&self, file: &UploadFile) -> Result<AudioAnalysisResult, Error> {
        let form = Form::new().part("file", file_part(file)?);

        debug!(file_name = %file.name, size = file.size(), "sending audio analysis request");

        let response = self
            .client
            .post(self.url("/api/audio/analyze"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let result: AudioAnalysisResult = decode_response(response).await?;
        result.validate()?;
        Ok(result)
    }
}

fn file_part(file: &UploadFile) -> Result<Part, Error> {
    let part = Part::bytes(file.data.to_vec()).file_name(file.name.clone());
    if file.mime.is_empty() {
        return Ok(part);
    }
    part.mime_str(&file.mime)
        .map_err(|e| Error::Configuration(format!("invalid MIME type {:?}: {e}", file.mime)))
}
