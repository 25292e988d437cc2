use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use symbiosis_common::{Result, SymbiosisError};

/// Chunk ingestion request
#[derive(Debug, Deserialize)]
pub struct AddChunkRequest {
    /// Chunk ID (generated when absent)
    pub id: Option<String>,

    /// Passage text
    pub text: Option<String>,
}

/// Topic-scoped question request
#[derive(Debug, Deserialize)]
pub struct AskTopicRequest {
    pub topic: Option<String>,
    pub question: Option<String>,
}

/// Similarity search query
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Search query text
    pub q: String,

    /// Top K results (negative values return nothing)
    #[serde(default = "default_top_k")]
    pub top_k: i64,
}

fn default_top_k() -> i64 {
    5
}

/// Extract a required, non-blank field from a request payload
pub fn require(field: Option<String>, name: &str) -> Result<String> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(SymbiosisError::invalid_input(format!(
            "missing required field '{}'",
            name
        ))),
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub results: Vec<SearchResultItem>,
}

#[derive(Debug, Serialize)]
pub struct SearchResultItem {
    pub id: String,
    pub text: String,
    pub score: f64,
}

/// Stored chunk without its embedding
#[derive(Debug, Serialize)]
pub struct ChunkSummary {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TopicSummary {
    pub topic: String,
    pub reference_count: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub started_at: DateTime<Utc>,
    pub chunks: usize,
    pub topics: usize,
    pub articles: usize,
    pub model: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
}
