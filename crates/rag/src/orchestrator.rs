use std::sync::Arc;
use symbiosis_common::Result;
use symbiosis_llm::{answer_prompt, classification_prompt, reference_context, RequestScope, TextGenerator};
use tracing::{info, warn};

use crate::resolve::resolve_topic;
use crate::topics::TopicIndex;

/// Topic classification and topic-scoped question answering
///
/// Stateless per call. Generation failures propagate unchanged and are
/// never retried.
pub struct RagOrchestrator {
    topics: Arc<TopicIndex>,
    generator: Arc<dyn TextGenerator>,
}

impl RagOrchestrator {
    pub fn new(topics: Arc<TopicIndex>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { topics, generator }
    }

    pub fn topics(&self) -> &TopicIndex {
        &self.topics
    }

    pub fn model_name(&self) -> &str {
        self.generator.model_name()
    }

    pub fn build_classification_prompt(&self, question: &str) -> String {
        classification_prompt(&self.topics.all_topics(), question)
    }

    pub fn build_answer_prompt(&self, topic: &str, question: &str) -> String {
        let context = reference_context(self.topics.references_for(topic));
        answer_prompt(topic, &context, question)
    }

    /// Ask the model which known topic a question belongs to
    ///
    /// Returns the model's text unmodified; it is not checked against the
    /// topic index. Use [`RagOrchestrator::classify_topic_strict`] for that.
    pub async fn classify_topic(&self, question: &str, scope: &RequestScope) -> Result<String> {
        let prompt = self.build_classification_prompt(question);
        let answer = scope.generate(self.generator.as_ref(), &prompt).await?;

        info!("Classified question into '{}'", answer.trim());
        Ok(answer)
    }

    /// Classify, then map the answer onto a known topic name
    pub async fn classify_topic_strict(
        &self,
        question: &str,
        scope: &RequestScope,
    ) -> Result<String> {
        let raw = self.classify_topic(question, scope).await?;
        resolve_topic(&self.topics, &raw).map_err(|e| {
            warn!("Rejected classification answer '{}': {}", raw.trim(), e);
            e
        })
    }

    /// Answer a question using only the topic's reference context
    pub async fn answer_in_topic(
        &self,
        topic: &str,
        question: &str,
        scope: &RequestScope,
    ) -> Result<String> {
        let references = self.topics.references_for(topic).len();
        if references == 0 {
            warn!("Topic '{}' has no references, answering without context", topic);
        }

        let prompt = self.build_answer_prompt(topic, question);
        let answer = scope.generate(self.generator.as_ref(), &prompt).await?;

        info!(
            "Answered question in topic '{}' ({} references, {} chars)",
            topic,
            references,
            answer.len()
        );
        Ok(answer)
    }
}
