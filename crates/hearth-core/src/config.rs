//! Application configuration
//!
//! Configuration is resolved once at process start and then passed
//! explicitly to the store, the chat client and the server:
//!
//! 1. Built-in defaults
//! 2. `hearth.toml` (explicit path, or `~/.config/hearth/hearth.toml` if present)
//! 3. Environment overrides (`HEARTH_DB`, `HEARTH_CHAT_HOST`,
//!    `HEARTH_CHAT_MODEL`, `HEARTH_CHAT_API_KEY`)
//!
//! Command-line flags are applied on top by the CLI.
//!
//! ```toml
//! prompts_dir = "/home/me/.local/share/hearth/prompts"
//!
//! [database]
//! path = "hearth.db"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 3000
//! allowed_origins = ["http://localhost:5173"]
//!
//! [chat]
//! host = "https://api.openai.com"
//! model = "gpt-4o-mini"
//! api_key = "sk-..."
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable overriding the database path
pub const DB_PATH_ENV: &str = "HEARTH_DB";
/// Environment variable overriding the chat API base URL
pub const CHAT_HOST_ENV: &str = "HEARTH_CHAT_HOST";
/// Environment variable overriding the chat model
pub const CHAT_MODEL_ENV: &str = "HEARTH_CHAT_MODEL";
/// The single secret: chat API key
pub const CHAT_API_KEY_ENV: &str = "HEARTH_CHAT_API_KEY";

/// Default chat model when only a host is configured
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerSettings,
    pub chat: ChatConfig,
    /// Directory holding prompt overrides (`<prompt_id>.md`)
    pub prompts_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("hearth.db"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            allowed_origins: Vec::new(),
        }
    }
}

/// Chat completions API settings
///
/// Chat is disabled when `host` is unset.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChatConfig {
    pub host: Option<String>,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    /// How many recent records go into the snapshot
    pub recent_limit: i64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            host: None,
            model: DEFAULT_CHAT_MODEL.to_string(),
            api_key: None,
            temperature: 0.3,
            recent_limit: 20,
        }
    }
}

impl ChatConfig {
    pub fn is_enabled(&self) -> bool {
        self.host.as_deref().is_some_and(|h| !h.trim().is_empty())
    }
}

impl Config {
    /// Load configuration: defaults, then file, then environment
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used only if the file is there.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(p) => Self::from_file(&p)?,
                None => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "Loaded config file");
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config: {}", e)))
    }

    /// Apply environment overrides through a lookup function
    ///
    /// Taking the lookup as a parameter keeps tests away from the real
    /// process environment.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = get(DB_PATH_ENV) {
            self.database.path = PathBuf::from(path);
        }
        if let Some(host) = get(CHAT_HOST_ENV) {
            self.chat.host = Some(host);
        }
        if let Some(model) = get(CHAT_MODEL_ENV) {
            self.chat.model = model;
        }
        if let Some(key) = get(CHAT_API_KEY_ENV) {
            self.chat.api_key = Some(key);
        }
    }
}

/// Default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hearth").join("hearth.toml"))
}
