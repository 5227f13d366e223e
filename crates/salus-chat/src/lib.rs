//! Salus chat crate - the conversation engine.
//!
//! Formats a fixed instruction preamble plus user text into a single
//! prompt and forwards it to a generative-text service. Each call is
//! stateless from the model's perspective; the session layer owns the
//! displayed history. A separate fixed prompt covers lab-report
//! summarization.

pub mod backend;
pub mod engine;
pub mod error;
pub mod prompts;

pub use backend::{GeminiClient, GenerativeBackend, MockBackend};
pub use engine::{apologetic_message, ConversationEngine};
pub use error::ChatError;
