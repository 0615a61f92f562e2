//! Catalogue panel state
//!
//! Four tabs switched by one `Tab` discriminant. Every tab keeps its own
//! interaction state for the whole session, so switching tabs never loses a
//! draft, a scroll position or the chat transcript.
//!
//! The panel never mutates the catalogue. It reports intents upward and the
//! app decides what they mean.

use tracing::debug;

use crate::models::{ChatMessage, Series, Tab};

/// Greeting the character opens every chat session with
pub fn chat_greeting(character: &str) -> String {
    format!(
        "Olá! Eu sou {}. Você não acredita no que acabei de descobrir sobre meu pai...",
        character
    )
}

/// Columns in the episode grid
pub const GRID_COLUMNS: usize = 3;

// =============================================================================
// Intents
// =============================================================================

/// What the panel asks the app to do
#[derive(Debug, Clone, PartialEq)]
pub enum PanelIntent {
    /// User picked an episode from the grid
    SelectEpisode(u32),
    /// User submitted a non-empty comment
    SubmitComment(String),
}

/// One outbound chat request
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub character: String,
    /// Transcript before the new user turn, bounded to the history limit
    pub history: Vec<ChatMessage>,
    pub message: String,
}

// =============================================================================
// Text Input
// =============================================================================

/// Single-line text field; the cursor counts characters, not bytes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    fn byte_offset(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor_end();
    }

    /// True for empty or whitespace-only input
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Text before and after the cursor, for rendering
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.value.split_at(self.byte_offset(self.cursor))
    }

    /// Take the current value and clear the field
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }
}

// =============================================================================
// Per-Tab State
// =============================================================================

/// Cursor over the episode grid
#[derive(Debug, Clone, Default)]
pub struct EpisodeGrid {
    /// Index into the series' episode sequence
    pub cursor: usize,
    pub len: usize,
}

impl EpisodeGrid {
    pub fn new(len: usize) -> Self {
        Self { cursor: 0, len }
    }

    pub fn left(&mut self) {
        if self.cursor % GRID_COLUMNS > 0 {
            self.cursor -= 1;
        }
    }

    pub fn right(&mut self) {
        if self.cursor % GRID_COLUMNS < GRID_COLUMNS - 1 && self.cursor + 1 < self.len {
            self.cursor += 1;
        }
    }

    pub fn up(&mut self) {
        if self.cursor >= GRID_COLUMNS {
            self.cursor -= GRID_COLUMNS;
        }
    }

    pub fn down(&mut self) {
        if self.cursor + GRID_COLUMNS < self.len {
            self.cursor += GRID_COLUMNS;
        }
    }

    /// Row of the cursor
    pub fn row(&self) -> usize {
        self.cursor / GRID_COLUMNS
    }

    /// Point the cursor at a specific episode index
    pub fn focus(&mut self, idx: usize) {
        if idx < self.len {
            self.cursor = idx;
        }
    }
}

/// Vertical scroll offset for read-only tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scroll {
    pub offset: u16,
}

impl Scroll {
    pub fn up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn down(&mut self) {
        self.offset = self.offset.saturating_add(1);
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }
}

/// Comments tab state
#[derive(Debug, Clone, Default)]
pub struct CommentsState {
    pub input: TextInput,
    pub scroll: Scroll,
}

/// AI chat tab state
#[derive(Debug, Clone)]
pub struct ChatState {
    pub transcript: Vec<ChatMessage>,
    pub input: TextInput,
    /// A reply is pending; further submissions are rejected
    pub typing: bool,
}

impl ChatState {
    /// Fresh transcript opened by `character`'s greeting
    pub fn new(character: &str) -> Self {
        Self {
            transcript: vec![ChatMessage::model(chat_greeting(character))],
            input: TextInput::default(),
            typing: false,
        }
    }
}

// =============================================================================
// Catalogue Panel
// =============================================================================

/// Tabbed catalogue panel
#[derive(Debug, Clone)]
pub struct CataloguePanel {
    pub active_tab: Tab,
    pub episodes: EpisodeGrid,
    pub details: Scroll,
    pub comments: CommentsState,
    pub chat: ChatState,
    /// Most recent turns sent with each chat request
    pub history_limit: usize,
}

impl CataloguePanel {
    pub fn new(episode_count: usize, history_limit: usize, character: &str) -> Self {
        Self {
            active_tab: Tab::Episodes,
            episodes: EpisodeGrid::new(episode_count),
            details: Scroll::default(),
            comments: CommentsState::default(),
            chat: ChatState::new(character),
            history_limit,
        }
    }

    /// Swap the rendered tab; no other side effects
    pub fn switch_tab(&mut self, tab: Tab) {
        if self.active_tab != tab {
            debug!(from = %self.active_tab, to = %tab, "switch tab");
            self.active_tab = tab;
        }
    }

    pub fn next_tab(&mut self) {
        self.switch_tab(self.active_tab.next());
    }

    pub fn prev_tab(&mut self) {
        self.switch_tab(self.active_tab.prev());
    }

    /// Text field of the active tab, if it has one
    pub fn active_input(&mut self) -> Option<&mut TextInput> {
        match self.active_tab {
            Tab::Comments => Some(&mut self.comments.input),
            Tab::AiChat => Some(&mut self.chat.input),
            Tab::Episodes | Tab::Details => None,
        }
    }

    /// Report the highlighted grid cell as a selection
    pub fn select_highlighted(&self, series: &Series) -> Option<PanelIntent> {
        series
            .episodes
            .get(self.episodes.cursor)
            .map(|ep| PanelIntent::SelectEpisode(ep.id))
    }

    /// Submit the comment draft. Blank drafts are rejected and kept.
    pub fn submit_comment(&mut self) -> Option<PanelIntent> {
        if self.comments.input.is_blank() {
            return None;
        }
        let text = self.comments.input.take();
        self.comments.scroll.reset();
        Some(PanelIntent::SubmitComment(text))
    }

    /// Submit the chat draft.
    ///
    /// Rejected when the draft is blank or a reply is still pending. On
    /// success the user turn is appended and the panel goes into typing.
    pub fn submit_chat(&mut self, character: &str) -> Option<ChatRequest> {
        if self.chat.input.is_blank() || self.chat.typing {
            return None;
        }

        let message = self.chat.input.take();
        let skip = self.chat.transcript.len().saturating_sub(self.history_limit);
        let history = self.chat.transcript[skip..].to_vec();

        self.chat.transcript.push(ChatMessage::user(message.clone()));
        self.chat.typing = true;
        debug!(turns = history.len(), "chat submitted");

        Some(ChatRequest {
            character: character.to_string(),
            history,
            message,
        })
    }

    /// Apply the reply to the pending request
    pub fn receive_reply(&mut self, reply: String) {
        self.chat.transcript.push(ChatMessage::model(reply));
        self.chat.typing = false;
    }
}
