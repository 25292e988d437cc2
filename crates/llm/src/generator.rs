use async_trait::async_trait;
use std::time::Duration;
use symbiosis_common::GenerationError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Common trait for text-generation backends
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete a prompt into text
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Model identifier, for logging and health reporting
    fn model_name(&self) -> &str;
}

/// Per-request limits for a generation call
#[derive(Debug, Clone, Default)]
pub struct RequestScope {
    /// Deadline for the call; `None` waits for the backend
    pub timeout: Option<Duration>,

    /// Cancelled when the caller gives up on the request
    pub cancel: CancellationToken,
}

impl RequestScope {
    /// Scope with a deadline and a fresh cancellation token
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            cancel: CancellationToken::new(),
        }
    }

    /// Run one generation call inside this scope
    ///
    /// No retry is attempted: failures surface to the caller as-is.
    pub async fn generate(
        &self,
        generator: &dyn TextGenerator,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        debug!(
            "Generation call - Model: {}, Prompt length: {}, Timeout: {:?}",
            generator.model_name(),
            prompt.len(),
            self.timeout
        );

        let call = async {
            match self.timeout {
                Some(limit) => match tokio::time::timeout(limit, generator.generate(prompt)).await {
                    Ok(result) => result,
                    Err(_) => Err(GenerationError::Timeout(limit)),
                },
                None => generator.generate(prompt).await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                warn!("Generation call cancelled - Model: {}", generator.model_name());
                Err(GenerationError::Cancelled)
            }
            result = call => result,
        }
    }
}
