use chrono::{DateTime, Utc};
use std::sync::Arc;
use symbiosis_common::{AppConfig, Result};
use symbiosis_llm::{GeminiClient, RequestScope, TextGenerator};
use symbiosis_rag::{RagOrchestrator, TopicIndex};
use symbiosis_vector::{HashEmbedder, InMemoryVectorStore, VectorSearchEngine};

use crate::coords::CoordinateIndex;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Chunk ingestion and similarity search
    pub vector_search: VectorSearchEngine,

    /// Topic classification and answering
    pub rag: RagOrchestrator,

    /// Article layout coordinates
    pub coords: Arc<CoordinateIndex>,

    /// Process start time
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create new application state
    ///
    /// Loads the topic and coordinate files; any failure here is fatal.
    pub fn new(config: AppConfig) -> Result<Self> {
        let topics = TopicIndex::from_path(&config.topics_path)?;
        let coords = CoordinateIndex::from_path(&config.coords_path)?;
        let generator = GeminiClient::new(
            config.gemini_base_url.clone(),
            config.gemini_model.clone(),
            config.gemini_api_key.clone(),
            config.generation_timeout(),
        )?;

        Self::from_parts(config, Arc::new(generator), topics, coords)
    }

    /// Assemble state from already-loaded components
    pub fn from_parts(
        config: AppConfig,
        generator: Arc<dyn TextGenerator>,
        topics: TopicIndex,
        coords: CoordinateIndex,
    ) -> Result<Self> {
        let vector_search = VectorSearchEngine::new(
            Arc::new(InMemoryVectorStore::new(config.embedding_dim)),
            Arc::new(HashEmbedder::new(config.embedding_dim)),
        )?;
        let rag = RagOrchestrator::new(Arc::new(topics), generator);

        Ok(Self {
            config,
            vector_search,
            rag,
            coords: Arc::new(coords),
            started_at: Utc::now(),
        })
    }

    /// Fresh generation scope carrying the configured deadline
    pub fn request_scope(&self) -> RequestScope {
        RequestScope::with_timeout(self.config.generation_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symbiosis_common::SymbiosisError;

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_new_loads_topic_and_coordinate_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            topics_path: write(&dir, "topics.json", r#"{"Radiation": ["1", "2"], "Bone Loss": ["3"]}"#),
            coords_path: write(&dir, "umap.json", r#"[{"id": "1", "title": "t", "x": 0.0, "y": 1.0, "z": 2.0}]"#),
            gemini_api_key: "key".to_string(),
            ..AppConfig::default()
        };

        let state = AppState::new(config).unwrap();

        assert_eq!(state.rag.topics().all_topics(), vec!["Bone Loss", "Radiation"]);
        assert_eq!(state.coords.len(), 1);
        assert_eq!(state.rag.model_name(), "gemini-2.5-flash");
        assert_eq!(state.request_scope().timeout, Some(state.config.generation_timeout()));
    }

    #[test]
    fn test_new_fails_on_missing_or_empty_files() {
        let dir = tempfile::tempdir().unwrap();
        let coords_path = write(&dir, "umap.json", "[]");

        let missing = AppConfig {
            topics_path: dir.path().join("absent.json"),
            coords_path: coords_path.clone(),
            ..AppConfig::default()
        };
        assert!(matches!(AppState::new(missing), Err(SymbiosisError::Config(_))));

        let empty = AppConfig {
            topics_path: write(&dir, "topics.json", "{}"),
            coords_path,
            ..AppConfig::default()
        };
        assert!(matches!(AppState::new(empty), Err(SymbiosisError::Config(_))));
    }
}
