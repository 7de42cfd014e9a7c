use authnlens_core::{FactCheckRequest, FactCheckResponse};
use tracing::debug;

use crate::{AuthnLensClient, Error, decode_response};

impl AuthnLensClient {
    /// Look up publisher reviews for a claim.
    ///
    /// Returns the raw claim/review structure; use
    /// [`FactCheckResponse::flatten_reviews`] for display.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> Result<(), authnlens_client::Error> {
    /// use authnlens_client::AuthnLensClient;
    ///
    /// let client = AuthnLensClient::new("http://localhost:5000");
    /// let response = client.factcheck("The moon landing was staged in a studio.").await?;
    /// println!("{} reviews", response.review_count());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn factcheck(&self, text: &str) -> Result<FactCheckResponse, Error> {
        let body = FactCheckRequest {
            text: text.to_string(),
        };

        debug!(chars = text.chars().count(), "sending fact-check request");

        let response = self
            .client
            .post(self.url("/api/factcheck"))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        decode_response(response).await
    }
}
