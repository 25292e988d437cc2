//! Symbiosis LLM Integration
//!
//! Gemini API client, generation scoping and prompt templates

mod client;
mod generator;
mod prompts;
mod types;

pub use client::{parse_response, GeminiClient, TRANSPORT_TIMEOUT_GRACE};
pub use generator::{RequestScope, TextGenerator};
pub use prompts::{answer_prompt, classification_prompt, reference_context, reference_url};
pub use types::{Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part, NO_ANSWER};
