//! Symbiosis Vector Search Engine
//!
//! Deterministic text embedding, cosine similarity and top-K chunk retrieval

mod embedding;
mod engine;
mod similarity;
mod store;
mod types;

pub use embedding::{EmbeddingProvider, HashEmbedder, DEFAULT_EMBEDDING_DIM};
pub use engine::VectorSearchEngine;
pub use similarity::{cosine_similarity, SIMILARITY_EPSILON};
pub use store::{InMemoryVectorStore, VectorStore};
pub use types::{Chunk, EngineStats, IngestOutcome, SearchResult};
