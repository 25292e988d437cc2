use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use symbiosis_common::{Result, SymbiosisError};
use tracing::info;

/// Article position in the 3D layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleCoords {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Immutable id → coordinates lookup, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct CoordinateIndex {
    articles: HashMap<String, ArticleCoords>,
}

impl CoordinateIndex {
    /// Build from a list; later duplicates replace earlier ones
    pub fn from_articles(articles: impl IntoIterator<Item = ArticleCoords>) -> Self {
        let articles = articles
            .into_iter()
            .map(|article| (article.id.clone(), article))
            .collect();
        Self { articles }
    }

    /// Parse a JSON array of `{id, title, x, y, z}`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let articles: Vec<ArticleCoords> = serde_json::from_str(json)?;
        Ok(Self::from_articles(articles))
    }

    /// Load from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            SymbiosisError::config(format!(
                "Failed to read coordinates {}: {}",
                path.display(),
                e
            ))
        })?;

        let index = Self::from_json_str(&data)?;
        info!("Loaded {} articles into memory from {}", index.len(), path.display());
        Ok(index)
    }

    pub fn get(&self, id: &str) -> Option<&ArticleCoords> {
        self.articles.get(id)
    }

    /// All articles sorted by id
    pub fn all(&self) -> Vec<&ArticleCoords> {
        let mut articles: Vec<_> = self.articles.values().collect();
        articles.sort_by(|a, b| a.id.cmp(&b.id));
        articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
