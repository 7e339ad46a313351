//! Conversation domain model.

use serde::{Deserialize, Serialize};

/// One question/answer exchange, immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub question: String,
    pub answer: String,
    /// Supporting text excerpt used to produce the answer, when the backend
    /// supplies one.
    pub relevant_context: Option<String>,
}

impl ConversationTurn {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        relevant_context: Option<String>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            relevant_context,
        }
    }
}
