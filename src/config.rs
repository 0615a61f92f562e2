//! Configuration management for DramaShorts
//!
//! Handles config file loading and Gemini credential resolution.
//! Config is read from ~/.config/dramashorts/config.toml and never written:
//! session state (coins, unlocks, comments) lives only in memory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::api::gemini::{self, GeminiClient};
use crate::api::ChatBridge;
use crate::catalog::STARTING_COINS;

/// Environment variables checked for the Gemini key, in order
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

pub const DEFAULT_CHARACTER: &str = "Sofia";
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Gemini API key (environment takes precedence)
    pub gemini_api_key: Option<String>,
    /// Gemini model name
    pub gemini_model: Option<String>,
    /// Gemini endpoint base URL
    pub gemini_base_url: Option<String>,
    /// Character the chat tab talks to
    pub character: Option<String>,
    /// Coin balance at session start
    pub starting_coins: Option<u32>,
    /// Attempt to autoplay on episode change
    pub autoplay: Option<bool>,
    /// Chat request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// Most recent transcript turns sent with each chat request
    pub history_limit: Option<usize>,
}

impl Config {
    /// Get config file path (~/.config/dramashorts/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dramashorts").join("config.toml"))
    }

    /// Load config from the default path, or return default if absent or unreadable
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Load config from an explicitly named file; failures are errors
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` if given, else from the default location
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load_from(p),
            None => Ok(Self::load()),
        }
    }

    /// Get the Gemini API key with fallback chain:
    /// 1. Environment variable GEMINI_API_KEY
    /// 2. Environment variable API_KEY
    /// 3. Key from config file
    ///
    /// Empty values count as absent.
    pub fn gemini_api_key(&self) -> Option<String> {
        self.api_key_from(|name| std::env::var(name).ok())
    }

    /// Credential resolution against an arbitrary environment lookup
    pub fn api_key_from(&self, env: impl Fn(&str) -> Option<String>) -> Option<String> {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| env(name))
            .chain(self.gemini_api_key.clone())
            .map(|k| k.trim().to_string())
            .find(|k| !k.is_empty())
    }

    pub fn character(&self) -> &str {
        self.character
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_CHARACTER)
    }

    pub fn starting_coins(&self) -> u32 {
        self.starting_coins.unwrap_or(STARTING_COINS)
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay.unwrap_or(true)
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(gemini::DEFAULT_TIMEOUT)
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT)
    }

    /// Build a Gemini client for the given key using configured overrides
    pub fn gemini_client(&self, api_key: String) -> GeminiClient {
        let base_url = self
            .gemini_base_url
            .as_deref()
            .unwrap_or(gemini::DEFAULT_BASE_URL);
        let model = self.gemini_model.as_deref().unwrap_or(gemini::DEFAULT_MODEL);

        GeminiClient::with_base_url(api_key, base_url)
            .model(model)
            .timeout(self.request_timeout())
    }

    /// Chat bridge wired to the resolved credential, if any
    pub fn chat_bridge(&self) -> ChatBridge {
        ChatBridge::new(self.gemini_api_key().map(|key| self.gemini_client(key)))
    }
}
