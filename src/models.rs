//! Data structures and types for DramaShorts
//!
//! Contains all shared models used across the application organized by domain:
//! - **Catalogue**: series, episodes and comments
//! - **Paywall**: coin packages offered when the balance is short
//! - **Chat**: transcript turns exchanged with a character
//! - **Panel**: the tab discriminant for the catalogue panel

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Fallback episode length when the duration label cannot be parsed
pub const DEFAULT_EPISODE_SECS: u64 = 90;

// =============================================================================
// Catalogue Models
// =============================================================================

/// A single short episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Sequence position, dense from 1
    pub id: u32,
    pub title: String,
    pub thumbnail: String,
    pub video_url: String,
    pub locked: bool,
    /// Display string, e.g. "12.3k"
    pub views: String,
    /// Display string, e.g. "1:30"
    pub duration: String,
}

impl Episode {
    /// Parse the `m:ss` (or `h:mm:ss`) duration label into seconds
    pub fn duration_secs(&self) -> Option<u64> {
        parse_clock(&self.duration)
    }

    /// Playback length, falling back to the default episode length
    pub fn runtime(&self) -> Duration {
        Duration::from_secs(self.duration_secs().unwrap_or(DEFAULT_EPISODE_SECS))
    }
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lock = if self.locked { " 🔒" } else { "" };
        write!(f, "Ep {:02} - {} [{}]{}", self.id, self.title, self.duration, lock)
    }
}

/// A viewer comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Creation timestamp (ms since epoch for local comments)
    pub id: u64,
    pub user: String,
    pub avatar: String,
    pub text: String,
    pub likes: u32,
    /// Relative label, e.g. "2h atrás"
    pub timestamp: String,
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.user, self.timestamp, self.text)
    }
}

/// The series catalogue snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub cast: Vec<String>,
    /// Advertised episode count (display only)
    pub total_episodes: u32,
    pub rating: f32,
    pub episodes: Vec<Episode>,
    /// Newest first once local comments are added
    pub comments: Vec<Comment>,
}

impl Series {
    pub fn episode(&self, id: u32) -> Option<&Episode> {
        self.episodes.iter().find(|e| e.id == id)
    }

    pub fn episode_index(&self, id: u32) -> Option<usize> {
        self.episodes.iter().position(|e| e.id == id)
    }

    /// Episode that follows `id` in sequence order
    pub fn next_episode(&self, id: u32) -> Option<&Episode> {
        let idx = self.episode_index(id)?;
        self.episodes.get(idx + 1)
    }

    /// Flip the lock flag of `id` to false. Returns false if no such episode.
    pub fn unlock(&mut self, id: u32) -> bool {
        match self.episodes.iter_mut().find(|e| e.id == id) {
            Some(ep) => {
                ep.locked = false;
                true
            }
            None => false,
        }
    }

    /// Insert a comment at the head of the collection
    pub fn prepend_comment(&mut self, comment: Comment) {
        self.comments.insert(0, comment);
    }

    pub fn locked_count(&self) -> usize {
        self.episodes.iter().filter(|e| e.locked).count()
    }

    /// Largest comment id currently held
    pub fn max_comment_id(&self) -> u64 {
        self.comments.iter().map(|c| c.id).max().unwrap_or(0)
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} episodes - ⭐ {:.1}",
            self.title, self.total_episodes, self.rating
        )
    }
}

// =============================================================================
// Paywall Models
// =============================================================================

/// Purchasable coin bundle (display only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoinPackage {
    pub amount: u32,
    pub price: &'static str,
    pub bonus: u32,
}

impl CoinPackage {
    pub fn total(&self) -> u32 {
        self.amount + self.bonus
    }
}

impl fmt::Display for CoinPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Moedas", self.amount)?;
        if self.bonus > 0 {
            write!(f, " (+{} Bônus)", self.bonus)?;
        }
        write!(f, " - {}", self.price)
    }
}

// =============================================================================
// Chat Models
// =============================================================================

/// Who authored a transcript turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One transcript turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == ChatRole::User
    }
}

// =============================================================================
// Panel Models
// =============================================================================

/// Catalogue panel tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Episodes,
    Details,
    Comments,
    AiChat,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Episodes, Tab::Details, Tab::Comments, Tab::AiChat];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Episodes => "Episódios",
            Tab::Details => "Detalhes",
            Tab::Comments => "Comentários",
            Tab::AiChat => "Chat IA",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Episodes => 0,
            Tab::Details => 1,
            Tab::Comments => 2,
            Tab::AiChat => 3,
        }
    }

    pub fn from_index(idx: usize) -> Option<Tab> {
        Self::ALL.get(idx).copied()
    }

    pub fn next(&self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Tabs with a text input field
    pub fn accepts_text(&self) -> bool {
        matches!(self, Tab::Comments | Tab::AiChat)
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Parse a clock label (`m:ss` or `h:mm:ss`) into seconds
pub fn parse_clock(label: &str) -> Option<u64> {
    let parts: Vec<&str> = label.trim().split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    let mut total = 0u64;
    for part in parts {
        let value: u64 = part.parse().ok()?;
        total = total * 60 + value;
    }
    Some(total)
}

/// Format a duration as MM:SS (or HH:MM:SS past the hour)
pub fn format_clock(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
