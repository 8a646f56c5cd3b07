//! Ledger advisor
//!
//! Answers free-form questions about the ledger by sending the chat model
//! three messages, in order:
//! 1. the system instruction from the prompt library
//! 2. a system message carrying the ledger snapshot as JSON
//! 3. the user's question
//!
//! The model's text comes back verbatim.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ai::{AIClient, ChatBackend, ChatMessage};
use crate::db::Database;
use crate::error::{Error, Result};
use crate::prompts::{PromptId, PromptLibrary};
use crate::snapshot::{SnapshotBuilder, DEFAULT_RECENT_LIMIT};

/// Answer from the chat model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorReply {
    pub reply: String,
    /// Model that produced the reply
    pub model: String,
}

pub struct LedgerAdvisor<'a> {
    db: &'a Database,
    client: &'a AIClient,
    prompts: &'a PromptLibrary,
    recent_limit: i64,
}

impl<'a> LedgerAdvisor<'a> {
    pub fn new(db: &'a Database, client: &'a AIClient, prompts: &'a PromptLibrary) -> Self {
        Self {
            db,
            client,
            prompts,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    pub fn with_recent_limit(mut self, limit: i64) -> Self {
        self.recent_limit = limit;
        self
    }

    /// Build the message sequence for `question` without sending it
    pub fn build_messages(&self, question: &str) -> Result<Vec<ChatMessage>> {
        let question = question.trim();
        if question.is_empty() {
            return Err(Error::InvalidData("Question must not be empty".into()));
        }

        let prompt = self.prompts.get(PromptId::LedgerAdvisor)?;
        let snapshot = SnapshotBuilder::new(self.db)
            .with_recent_limit(self.recent_limit)
            .build()?;

        Ok(vec![
            ChatMessage::system(prompt.system_section()),
            ChatMessage::system(snapshot.to_prompt_text()?),
            ChatMessage::user(question),
        ])
    }

    /// Ask a question about the ledger
    pub async fn ask(&self, question: &str) -> Result<AdvisorReply> {
        let messages = self.build_messages(question)?;
        self.send(&messages).await
    }

    /// Send an already built conversation to the chat model
    pub async fn send(&self, messages: &[ChatMessage]) -> Result<AdvisorReply> {
        let reply = self.client.chat(messages).await.map_err(|e| {
            warn!(host = %self.client.host(), error = %e, "Chat request failed");
            e
        })?;

        info!(model = %self.client.model(), "Advisor answered question");
        Ok(AdvisorReply {
            reply,
            model: self.client.model().to_string(),
        })
    }
}
