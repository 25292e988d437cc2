use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use symbiosis_common::{GenerationError, Result};
use tracing::{debug, info};

use crate::generator::TextGenerator;
use crate::types::{GenerateContentRequest, GenerateContentResponse};

/// Extra time the HTTP client waits beyond the caller's deadline
///
/// The request scope owns the deadline; the transport timeout only catches
/// calls made without one.
pub const TRANSPORT_TIMEOUT_GRACE: Duration = Duration::from_secs(5);

/// Gemini generateContent API client
#[derive(Clone)]
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    transport_timeout: Duration,
    client: Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("transport_timeout", &self.transport_timeout)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create new Gemini client
    ///
    /// `timeout` is the generation deadline; the underlying HTTP client waits
    /// [`TRANSPORT_TIMEOUT_GRACE`] longer.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        let transport_timeout = timeout.saturating_add(TRANSPORT_TIMEOUT_GRACE);
        let client = Client::builder()
            .timeout(transport_timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        info!("Gemini client initialized: {} (model: {})", base_url, model);
        Ok(Self {
            base_url,
            model,
            api_key: api_key.into(),
            transport_timeout,
            client,
        })
    }

    /// Timeout applied by the HTTP client itself
    pub fn transport_timeout(&self) -> Duration {
        self.transport_timeout
    }

    /// generateContent endpoint for the configured model
    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    /// Single attempt to generate text
    async fn try_generate(&self, prompt: &str) -> std::result::Result<String, GenerationError> {
        let request = GenerateContentRequest::user_prompt(prompt);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(format!("Failed to send request: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Transport(format!("Failed to read response body: {}", e)))?;

        parse_response(status, &body)
    }
}

/// Turn an HTTP status and body into generated text
pub fn parse_response(status: u16, body: &str) -> std::result::Result<String, GenerationError> {
    if !(200..300).contains(&status) {
        return Err(GenerationError::Status {
            status,
            body: body.to_string(),
        });
    }

    let parsed: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::Malformed(e.to_string()))?;

    Ok(parsed.into_answer())
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> std::result::Result<String, GenerationError> {
        debug!(
            "Sending generate request to Gemini - Model: {}, Prompt length: {}",
            self.model,
            prompt.len()
        );

        let answer = self.try_generate(prompt).await?;

        debug!("Received response from Gemini - Length: {}", answer.len());
        Ok(answer)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
