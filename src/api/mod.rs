//! API clients for external services
//!
//! - Gemini: hosted text generation
//! - Bridge: character chat on top of Gemini, infallible by construction

pub mod bridge;
pub mod gemini;

pub use bridge::ChatBridge;
pub use gemini::{GeminiClient, GeminiError};
