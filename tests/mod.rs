//! Integration tests for DramaShorts
//!
//! Tests are organized by component:
//! - app_test: Root coordinator (selection, unlock, coins, comments, end of episode)
//! - gemini_test: Gemini client and chat bridge against a mock endpoint
//! - cli_test: Argument parsing, JSON envelope, command handlers
//! - ui_test: Full-screen rendering with TestBackend
//! - e2e_test: Key-driven flows (browse -> unlock -> watch, comments, chat)

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
