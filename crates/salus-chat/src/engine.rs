//! The conversation engine: prompt assembly plus backend dispatch.

use std::sync::Arc;

use tracing::debug;

use crate::backend::GenerativeBackend;
use crate::error::ChatError;
use crate::prompts;

/// Formats prompts and forwards them to the generative backend.
///
/// Stateless: no conversation-history window is passed to the model even
/// though the UI displays cumulative history.
pub struct ConversationEngine {
    backend: Arc<dyn GenerativeBackend>,
}

impl ConversationEngine {
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        Self { backend }
    }

    /// Answer one health question.
    pub async fn respond(&self, user_text: &str) -> Result<String, ChatError> {
        let prompt = prompts::chat_prompt(user_text);
        debug!(prompt_len = prompt.len(), "Dispatching chat prompt");
        self.backend.generate(&prompt).await
    }

    /// Summarize and interpret one lab report.
    pub async fn analyze_lab_report(&self, report_text: &str) -> Result<String, ChatError> {
        let prompt = prompts::lab_report_prompt(report_text);
        debug!(prompt_len = prompt.len(), "Dispatching lab-report prompt");
        self.backend.generate(&prompt).await
    }
}

/// User-visible fallback text for a failed generation, embedding the error
/// detail. Rendered at the boundary so the session continues.
pub fn apologetic_message(err: &ChatError) -> String {
    format!(
        "I apologize, but I encountered an error: {}. Please try again or contact support if the issue persists.",
        err
    )
}
