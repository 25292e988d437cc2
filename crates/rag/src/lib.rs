//! Symbiosis topic-scoped RAG
//!
//! Topic index, classification answer resolution and the orchestrator that
//! turns topic references into prompts for the generation backend

mod orchestrator;
mod resolve;
mod topics;

pub use orchestrator::RagOrchestrator;
pub use resolve::resolve_topic;
pub use topics::{TopicEntry, TopicIndex};
