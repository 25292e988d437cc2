use std::sync::Arc;
use symbiosis_common::{Result, SymbiosisError};
use tracing::{debug, info};
use uuid::Uuid;

use crate::embedding::EmbeddingProvider;
use crate::store::VectorStore;
use crate::types::{Chunk, EngineStats, IngestOutcome, SearchResult};

/// Vector search engine: embeds text and ranks it against the store
pub struct VectorSearchEngine {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl VectorSearchEngine {
    /// Create new vector search engine
    pub fn new(
        store: Arc<dyn VectorStore>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self> {
        if store.dimension() != embedder.dimension() {
            return Err(SymbiosisError::config(format!(
                "embedder '{}' produces dimension {}, store expects {}",
                embedder.model_id(),
                embedder.dimension(),
                store.dimension()
            )));
        }

        info!(
            "Vector search engine initialized - model: {}, dimension: {}",
            embedder.model_id(),
            embedder.dimension()
        );

        Ok(Self { store, embedder })
    }

    /// Embed and store a text chunk
    ///
    /// A missing or blank id gets a fresh UUID.
    pub async fn add_text(&self, id: Option<String>, text: &str) -> Result<IngestOutcome> {
        if text.trim().is_empty() {
            return Err(SymbiosisError::invalid_input("chunk text cannot be empty"));
        }

        let id = id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let embedding = self.embedder.embed(text);
        let replaced = self
            .store
            .add_chunk(Chunk::new(id.clone(), text, embedding))
            .await?;

        info!(
            "Chunk {} to store: {} ({} chars)",
            if replaced { "replaced" } else { "added" },
            id,
            text.len()
        );

        Ok(IngestOutcome { id, replaced })
    }

    /// Search for chunks similar to a query text
    pub async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        debug!("Searching for: {} (top_k={})", query, top_k);

        let query_embedding = self.embedder.embed(query);
        let results = self.store.query_scored(&query_embedding, top_k).await?;

        info!("Search completed - {} results", results.len());
        Ok(results)
    }

    /// All stored chunks in insertion order
    pub async fn all_chunks(&self) -> Vec<Chunk> {
        self.store.all_chunks().await
    }

    /// Get engine statistics
    pub async fn stats(&self) -> EngineStats {
        EngineStats {
            chunk_count: self.store.len().await,
            embedding_model: self.embedder.model_id().to_string(),
            dimension: self.store.dimension(),
        }
    }
}
