use async_trait::async_trait;
use std::collections::HashMap;
use symbiosis_common::{Result, SymbiosisError};
use tokio::sync::RwLock;
use tracing::debug;

use crate::similarity::cosine_similarity;
use crate::types::{Chunk, SearchResult};

/// Chunk storage with top-K similarity ranking
///
/// The in-memory implementation scans linearly; an indexed structure can be
/// substituted behind this trait without touching callers.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Dimension every stored and query vector must have
    fn dimension(&self) -> usize;

    /// Insert a chunk, replacing any chunk with the same id
    ///
    /// Returns `true` when an existing chunk was replaced.
    async fn add_chunk(&self, chunk: Chunk) -> Result<bool>;

    /// Top `top_k` chunks by descending cosine similarity
    async fn query(&self, query: &[f64], top_k: usize) -> Result<Vec<Chunk>> {
        let results = self.query_scored(query, top_k).await?;
        Ok(results.into_iter().map(|r| r.chunk).collect())
    }

    /// Same ranking as [`VectorStore::query`], with scores
    async fn query_scored(&self, query: &[f64], top_k: usize) -> Result<Vec<SearchResult>>;

    /// All chunks in insertion order
    async fn all_chunks(&self) -> Vec<Chunk>;

    /// Number of stored chunks
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[derive(Debug, Default)]
struct Inner {
    chunks: Vec<Chunk>,
    // id -> position in `chunks`
    positions: HashMap<String, usize>,
}

/// In-memory vector store guarded by a reader/writer lock
#[derive(Debug)]
pub struct InMemoryVectorStore {
    dimension: usize,
    inner: RwLock<Inner>,
}

impl InMemoryVectorStore {
    /// Create new empty store for vectors of `dimension`
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            inner: RwLock::new(Inner::default()),
        }
    }

    fn check_vector(&self, what: &str, vector: &[f64]) -> Result<()> {
        if vector.len() != self.dimension {
            return Err(SymbiosisError::invalid_input(format!(
                "{} has dimension {}, store expects {}",
                what,
                vector.len(),
                self.dimension
            )));
        }
        if vector.iter().any(|v| !v.is_finite()) {
            return Err(SymbiosisError::invalid_input(format!(
                "{} contains non-finite values",
                what
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn add_chunk(&self, chunk: Chunk) -> Result<bool> {
        self.check_vector(&format!("chunk '{}'", chunk.id), &chunk.embedding)?;

        let mut inner = self.inner.write().await;
        match inner.positions.get(&chunk.id).copied() {
            Some(position) => {
                debug!("Replacing chunk {} at position {}", chunk.id, position);
                inner.chunks[position] = chunk;
                Ok(true)
            }
            None => {
                let position = inner.chunks.len();
                inner.positions.insert(chunk.id.clone(), position);
                inner.chunks.push(chunk);
                Ok(false)
            }
        }
    }

    async fn query_scored(&self, query: &[f64], top_k: usize) -> Result<Vec<SearchResult>> {
        self.check_vector("query vector", query)?;

        if top_k == 0 {
            return Ok(Vec::new());
        }

        let inner = self.inner.read().await;

        let mut scored = Vec::with_capacity(inner.chunks.len());
        for (position, chunk) in inner.chunks.iter().enumerate() {
            let score = cosine_similarity(query, &chunk.embedding)?;
            scored.push((position, score));
        }

        // Descending score; equal scores keep insertion order
        scored.sort_by(|(pos_a, score_a), (pos_b, score_b)| {
            score_b.total_cmp(score_a).then(pos_a.cmp(pos_b))
        });
        scored.truncate(top_k);

        debug!(
            "Ranked {} chunks, returning {} (top_k={})",
            inner.chunks.len(),
            scored.len(),
            top_k
        );

        Ok(scored
            .into_iter()
            .map(|(position, score)| SearchResult::new(inner.chunks[position].clone(), score))
            .collect())
    }

    async fn all_chunks(&self) -> Vec<Chunk> {
        self.inner.read().await.chunks.clone()
    }

    async fn len(&self) -> usize {
        self.inner.read().await.chunks.len()
    }
}
