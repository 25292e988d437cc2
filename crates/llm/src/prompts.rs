//! Prompt templates for topic classification and topic-scoped answers

/// Canonical article URL for a PubMed Central reference id
pub fn reference_url(reference_id: &str) -> String {
    format!("https://pmc.ncbi.nlm.nih.gov/articles/PMC{}/", reference_id.trim())
}

/// Newline-separated article URLs
pub fn reference_context<S: AsRef<str>>(reference_ids: &[S]) -> String {
    reference_ids
        .iter()
        .map(|id| reference_url(id.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompt asking the model to pick exactly one known topic
pub fn classification_prompt<S: AsRef<str>>(topics: &[S], question: &str) -> String {
    let topic_list = topics
        .iter()
        .map(|t| format!("- {}", t.as_ref()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Please categorize the following question in the most related topic of the following list:\n{}\n\n\
         ONLY ANSWER THE TOPIC NAME, exactly as written in the list, with no punctuation or other symbols \
         that do not match that name exactly. The question is: {}",
        topic_list, question
    )
}

/// Prompt asking the model to answer from the topic's references
pub fn answer_prompt(topic: &str, context: &str, question: &str) -> String {
    format!(
        "You're an expert on {}. This is your information:\n{}\n\n\
         Please don't go over 40 lines. Include quotes and references to the information \
         (every reference must be linked). Answer to: {}",
        topic, context, question
    )
}
