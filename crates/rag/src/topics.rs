use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use symbiosis_common::{Result, SymbiosisError};
use tracing::info;

/// Topic name with its reference ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicEntry {
    pub topic: String,
    pub reference_ids: Vec<String>,
}

/// Immutable topic → reference ids mapping, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct TopicIndex {
    topics: BTreeMap<String, Vec<String>>,
}

impl TopicIndex {
    /// Build from `(topic, reference ids)` pairs; later duplicates win
    pub fn from_entries<I, T, R>(entries: I) -> Self
    where
        I: IntoIterator<Item = (T, Vec<R>)>,
        T: Into<String>,
        R: Into<String>,
    {
        let topics = entries
            .into_iter()
            .map(|(topic, ids)| (topic.into(), ids.into_iter().map(Into::into).collect()))
            .collect();
        Self { topics }
    }

    /// Parse a JSON object of `{"topic": ["id", ...]}`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let topics: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        if topics.is_empty() {
            return Err(SymbiosisError::config("topic index contains no topics"));
        }
        Ok(Self { topics })
    }

    /// Load from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            SymbiosisError::config(format!(
                "Failed to read topic index {}: {}",
                path.display(),
                e
            ))
        })?;

        let index = Self::from_json_str(&data)?;
        info!(
            "Loaded {} topics ({} references) from {}",
            index.len(),
            index.reference_count(),
            path.display()
        );
        Ok(index)
    }

    /// Reference ids for a topic; empty for unknown topics
    pub fn references_for(&self, topic: &str) -> &[String] {
        self.topics.get(topic).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Topic names in ascending order
    pub fn all_topics(&self) -> Vec<&str> {
        self.topics.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.topics.contains_key(topic)
    }

    pub fn entries(&self) -> Vec<TopicEntry> {
        self.topics
            .iter()
            .map(|(topic, ids)| TopicEntry {
                topic: topic.clone(),
                reference_ids: ids.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Total reference ids across all topics
    pub fn reference_count(&self) -> usize {
        self.topics.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "Space Biology": ["4136787", "3630201"],
        "Microbiology": ["5587110"],
        "Bone Loss": []
    }"#;

    #[test]
    fn test_references_for_known_topic() {
        let index = TopicIndex::from_json_str(SAMPLE).unwrap();
        assert_eq!(index.references_for("Space Biology"), ["4136787", "3630201"]);
        assert!(index.references_for("Bone Loss").is_empty());
    }

    #[test]
    fn test_unknown_topic_is_empty() {
        let index = TopicIndex::from_json_str(SAMPLE).unwrap();
        assert!(index.references_for("Unknown Topic").is_empty());
        assert!(!index.contains("Unknown Topic"));
    }

    #[test]
    fn test_all_topics_sorted() {
        let index = TopicIndex::from_json_str(SAMPLE).unwrap();
        assert_eq!(index.all_topics(), vec!["Bone Loss", "Microbiology", "Space Biology"]);
        assert_eq!(index.reference_count(), 3);
    }

    #[test]
    fn test_from_entries() {
        let index = TopicIndex::from_entries([("Radiation", vec!["1", "2"])]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.entries()[0].reference_ids, vec!["1", "2"]);
    }

    #[test]
    fn test_invalid_sources_rejected() {
        assert!(matches!(
            TopicIndex::from_json_str("{}"),
            Err(SymbiosisError::Config(_))
        ));
        assert!(matches!(
            TopicIndex::from_json_str(r#"{"a": "not a list"}"#),
            Err(SymbiosisError::Json(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let index = TopicIndex::from_path(file.path()).unwrap();
        assert_eq!(index.len(), 3);

        let missing = TopicIndex::from_path(Path::new("/nonexistent/topics.json"));
        assert!(matches!(missing, Err(SymbiosisError::Config(_))));
    }
}
