use serde::{Deserialize, Serialize};

/// Stored unit of text plus its embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk ID (unique within a store)
    pub id: String,

    /// Passage text
    pub text: String,

    /// Embedding vector
    pub embedding: Vec<f64>,
}

impl Chunk {
    pub fn new(id: impl Into<String>, text: impl Into<String>, embedding: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            embedding,
        }
    }
}

/// Search result
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Matched chunk
    pub chunk: Chunk,

    /// Cosine similarity to the query
    pub score: f64,
}

impl SearchResult {
    pub fn new(chunk: Chunk, score: f64) -> Self {
        Self { chunk, score }
    }
}

/// Outcome of ingesting a text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestOutcome {
    /// Assigned or supplied chunk ID
    pub id: String,

    /// An existing chunk with this ID was replaced
    pub replaced: bool,
}

/// Engine statistics
#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub chunk_count: usize,
    pub embedding_model: String,
    pub dimension: usize,
}
