// Compose: AI draft generation in a user's voice, and draft scoring.
// All LLM calls go through llm_client.

pub mod drafts;
pub mod handlers;
pub mod prompts;
pub mod score;
