//! Maps free-form classification answers onto known topic names

use std::collections::HashSet;
use symbiosis_common::{Result, SymbiosisError};

use crate::topics::TopicIndex;

/// Minimum token overlap (Jaccard) accepted by the last-resort match
const MIN_TOKEN_OVERLAP: f64 = 0.5;

/// Resolve a model's answer to the canonical name of a known topic
///
/// Tries, in order: exact match, normalized match, a known topic contained
/// in the answer (longest wins), then best token overlap.
pub fn resolve_topic(index: &TopicIndex, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if index.contains(trimmed) {
        return Ok(trimmed.to_string());
    }

    let answer = normalize(trimmed);
    if answer.is_empty() {
        return Err(SymbiosisError::invalid_input("classification answer is empty"));
    }

    let topics: Vec<(&str, String)> = index
        .all_topics()
        .into_iter()
        .map(|topic| (topic, normalize(topic)))
        .filter(|(_, normalized)| !normalized.is_empty())
        .collect();

    if let Some((topic, _)) = topics.iter().find(|(_, normalized)| *normalized == answer) {
        return Ok(topic.to_string());
    }

    let padded_answer = format!(" {} ", answer);
    let contained = topics
        .iter()
        .filter(|(_, normalized)| padded_answer.contains(&format!(" {} ", normalized)))
        .max_by_key(|(_, normalized)| normalized.len());
    if let Some((topic, _)) = contained {
        return Ok(topic.to_string());
    }

    let answer_tokens: HashSet<&str> = answer.split(' ').collect();
    let mut best: Option<(&str, f64)> = None;
    for (topic, normalized) in &topics {
        let topic_tokens: HashSet<&str> = normalized.split(' ').collect();
        let shared = answer_tokens.intersection(&topic_tokens).count() as f64;
        let union = answer_tokens.union(&topic_tokens).count() as f64;
        let overlap = shared / union;
        if overlap >= MIN_TOKEN_OVERLAP && best.map_or(true, |(_, score)| overlap > score) {
            best = Some((*topic, overlap));
        }
    }

    best.map(|(topic, _)| topic.to_string()).ok_or_else(|| {
        SymbiosisError::invalid_input(format!("no known topic matches '{}'", trimmed))
    })
}

/// Lowercase, punctuation to spaces, whitespace collapsed
fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(|c| {
            let keep = c.is_alphanumeric();
            c.to_lowercase().map(move |l| if keep { l } else { ' ' })
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
