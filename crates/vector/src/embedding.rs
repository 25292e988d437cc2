use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

/// Dimension of the reference embedding
pub const DEFAULT_EMBEDDING_DIM: usize = 128;

/// Maps text to a fixed-dimension vector
///
/// Implementations must be deterministic: the same text always yields the
/// same vector of length [`EmbeddingProvider::dimension`].
pub trait EmbeddingProvider: Send + Sync {
    /// Identifier reported in stats
    fn model_id(&self) -> &str;

    /// Length of every vector this provider returns
    fn dimension(&self) -> usize;

    /// Embed a single text
    fn embed(&self, text: &str) -> Vec<f64>;
}

/// Placeholder embedder seeded from a hash of the text
///
/// Carries no semantic signal; it only guarantees determinism and a fixed
/// dimension.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    model: String,
    dimension: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            model: "sha256-seeded".to_string(),
            dimension,
        }
    }

    fn seed_for(text: &str) -> u64 {
        let digest = Sha256::digest(text.as_bytes());
        let mut seed = [0u8; 8];
        seed.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(seed)
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_EMBEDDING_DIM)
    }
}

impl EmbeddingProvider for HashEmbedder {
    fn model_id(&self) -> &str {
        &self.model
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(Self::seed_for(text));
        (0..self.dimension).map(|_| rng.gen::<f64>()).collect()
    }
}
