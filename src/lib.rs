//! DramaShorts - short-form drama streaming in the terminal
//!
//! A vertical-video player for a serialized drama: free and premium
//! episodes, a coin paywall, comments, and a chat with one of the characters
//! played by Gemini.
//!
//! # Modules
//!
//! - `models` - Series, episodes, comments, coin packages, chat turns
//! - `catalog` - Seed catalogue and business constants
//! - `api` - Gemini client and the character chat bridge
//! - `stream` - Simulated player surface
//! - `panel` - Catalogue panel (episodes, details, comments, AI chat)
//! - `paywall` - Unlock modal state
//! - `app` - Root coordinator and key handling
//! - `ui` - TUI rendering
//! - `config` / `cli` / `commands` - Configuration and scriptable CLI

pub mod models;
pub mod catalog;
pub mod api;
pub mod stream;
pub mod panel;
pub mod paywall;
pub mod app;
pub mod ui;
pub mod config;
pub mod cli;
pub mod commands;

// Re-export commonly used types
pub use models::{ChatMessage, ChatRole, CoinPackage, Comment, Episode, Series, Tab};

pub use api::{ChatBridge, GeminiClient, GeminiError};
pub use app::{App, InputMode};
pub use config::Config;
pub use panel::{CataloguePanel, ChatRequest, PanelIntent};
pub use paywall::{Paywall, PaywallIntent};
pub use stream::{PlaybackState, PlayerEvent, PlayerSurface};
