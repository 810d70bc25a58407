// Résumé roasting: prompt building, reply parsing, rating verdicts, and the
// interaction state machine behind the roast page.
// All LLM calls go through llm_client, never direct HTTP.

pub mod analyzer;
pub mod handlers;
pub mod parser;
pub mod prompts;
pub mod rating;
pub mod session;
pub mod view;
