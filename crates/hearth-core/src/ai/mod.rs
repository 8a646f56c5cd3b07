//! Pluggable chat backend abstraction
//!
//! # Architecture
//!
//! - `ChatBackend` trait: the interface every chat backend implements
//! - `AIClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `OpenAICompatibleBackend`, `MockBackend`
//!
//! # Usage
//!
//! ```rust,ignore
//! let config = Config::load(None)?;
//! if let Some(client) = AIClient::from_config(&config.chat) {
//!     let reply = client.chat(&[ChatMessage::user("Hello")]).await?;
//! }
//! ```
//!
//! Backends never read the environment themselves; everything comes from
//! `ChatConfig`.

mod mock;
mod openai_compatible;
pub mod types;

pub use mock::MockBackend;
pub use openai_compatible::OpenAICompatibleBackend;
pub use types::*;

use async_trait::async_trait;

use crate::config::ChatConfig;
use crate::error::Result;

/// Trait defining the interface for all chat backends
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send a conversation and return the assistant's reply text
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;

    /// Get the model name
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete chat client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AIClient {
    /// OpenAI-compatible backend (OpenAI, vLLM, LocalAI, llama-server, etc.)
    OpenAICompatible(OpenAICompatibleBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AIClient {
    /// Create a chat client from configuration
    ///
    /// Returns None when no chat host is configured.
    pub fn from_config(config: &ChatConfig) -> Option<Self> {
        if !config.is_enabled() {
            return None;
        }
        let host = config.host.as_deref()?.trim();

        let backend = match config.api_key.as_deref() {
            Some(key) if !key.is_empty() => {
                OpenAICompatibleBackend::with_api_key(host, &config.model, key)
            }
            _ => OpenAICompatibleBackend::new(host, &config.model),
        };

        tracing::info!(host = %host, model = %config.model, "Chat backend configured");
        Some(AIClient::OpenAICompatible(
            backend.with_temperature(config.temperature),
        ))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AIClient::Mock(MockBackend::new())
    }
}

// Implement ChatBackend for AIClient by delegating to the inner backend
#[async_trait]
impl ChatBackend for AIClient {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
        match self {
            AIClient::OpenAICompatible(b) => b.chat(messages).await,
            AIClient::Mock(b) => b.chat(messages).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AIClient::OpenAICompatible(b) => b.health_check().await,
            AIClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AIClient::OpenAICompatible(b) => b.model(),
            AIClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AIClient::OpenAICompatible(b) => b.host(),
            AIClient::Mock(b) => b.host(),
        }
    }
}
