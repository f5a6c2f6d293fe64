// AI-assisted stages: text parsing and content customization.
// All LLM calls go through llm_client; nothing here talks HTTP directly.

pub mod assistant;
pub mod customizer;
pub mod jd_parser;
pub mod prompts;

pub use assistant::{ContentAssistant, LlmAssistant};
pub use customizer::Customization;
