//! Mock backend for testing
//!
//! Useful for unit tests and for running the server without a chat API.

use async_trait::async_trait;

use crate::error::Result;

use super::types::{ChatMessage, ChatRole};
use super::ChatBackend;

/// Mock chat backend
///
/// Replies deterministically by echoing the last user message.
#[derive(Clone, Default)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self { healthy: true }
    }

    /// Create an unhealthy mock backend
    pub fn unhealthy() -> Self {
        Self { healthy: false }
    }
}

#[async_trait]
impl ChatBackend for MockBackend {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
        let question = messages
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        let context = messages
            .iter()
            .filter(|m| m.role == ChatRole::System)
            .count();

        Ok(format!(
            "Mock answer to \"{}\" (with {} context messages)",
            question, context
        ))
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
