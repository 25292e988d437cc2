use std::time::Duration;

/// Failure of the external text-generation capability
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Upstream answered with a non-success HTTP status
    #[error("generation API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Upstream body could not be parsed
    #[error("malformed generation response: {0}")]
    Malformed(String),

    /// Request never produced a response (connect, TLS, body read)
    #[error("generation request failed: {0}")]
    Transport(String),

    /// Caller-supplied deadline elapsed
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),

    /// Request scope was cancelled before the call finished
    #[error("generation cancelled")]
    Cancelled,
}

impl GenerationError {
    /// Upstream HTTP status, when the failure carried one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Upstream response body, when the failure carried one
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Symbiosis error types
#[derive(Debug, thiserror::Error)]
pub enum SymbiosisError {
    /// Invalid input (dimension mismatch, missing field, unknown topic)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Text generation failed
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SymbiosisError {
    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

// HTTP response conversion (used by the actix-web boundary)
impl SymbiosisError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::NotFound(_) => 404,
            Self::Generation(GenerationError::Timeout(_)) => 504,
            Self::Generation(GenerationError::Cancelled) => 503,
            Self::Generation(_) => 502,
            Self::Config(_) => 500,
            Self::Internal(_) => 500,
            Self::Io(_) => 500,
            Self::Json(_) => 400,
            Self::Other(_) => 500,
        }
    }
}
