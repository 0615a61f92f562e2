//! App state and core application logic
//!
//! The app is the root coordinator: it alone owns the series snapshot, the
//! current episode, the coin balance and the pending unlock target. Child
//! components (panel, paywall, player) report intents and the app applies
//! them here.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

use crate::catalog::{self, PURCHASE_AMOUNT};
use crate::config::{Config, DEFAULT_CHARACTER, DEFAULT_HISTORY_LIMIT};
use crate::models::{Episode, Series, Tab};
use crate::panel::{CataloguePanel, ChatRequest, PanelIntent};
use crate::paywall::{Paywall, PaywallIntent};
use crate::stream::player::SEEK_STEP_SECS;
use crate::stream::{PlayerEvent, PlayerSurface};
use crate::ui::layout::screen_layout;

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (comment or chat box focused)
    Editing,
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Transient notice shown as a popup until the next keypress
    pub notice: Option<String>,

    // Coordinator-owned state
    pub series: Series,
    /// Id of the episode on the player surface
    pub current_episode: u32,
    pub coins: u32,
    /// Locked episode the user tried to open
    pub pending_unlock: Option<u32>,
    pub show_unlock_modal: bool,

    // Child components
    pub paywall: Paywall,
    pub panel: CataloguePanel,
    pub player: PlayerSurface,

    /// Character the chat tab talks to
    pub character: String,
    /// Chat request waiting to be dispatched by the event loop
    outbox: Option<ChatRequest>,
}

impl Default for App {
    fn default() -> Self {
        Self::build(
            catalog::seed_series(),
            catalog::STARTING_COINS,
            true,
            DEFAULT_CHARACTER.to_string(),
            DEFAULT_HISTORY_LIMIT,
        )
    }
}

impl App {
    /// Create a new App instance with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an App from loaded configuration
    pub fn with_config(config: &Config) -> Self {
        Self::build(
            catalog::seed_series(),
            config.starting_coins(),
            config.autoplay(),
            config.character().to_string(),
            config.history_limit(),
        )
    }

    fn build(
        series: Series,
        coins: u32,
        autoplay: bool,
        character: String,
        history_limit: usize,
    ) -> Self {
        let mut player = PlayerSurface::new(autoplay);
        let current_episode = series.episodes.first().map(|e| e.id).unwrap_or(1);
        if let Some(first) = series.episodes.first() {
            player.load(first);
        }

        Self {
            running: true,
            input_mode: InputMode::Normal,
            notice: None,
            panel: CataloguePanel::new(series.episodes.len(), history_limit, &character),
            series,
            current_episode,
            coins,
            pending_unlock: None,
            show_unlock_modal: false,
            paywall: Paywall::default(),
            player,
            character,
            outbox: None,
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Episode currently on the player surface
    pub fn current_episode(&self) -> Option<&Episode> {
        self.series.episode(self.current_episode)
    }

    /// Episode held by the paywall, if any
    pub fn pending_episode(&self) -> Option<&Episode> {
        self.pending_unlock.and_then(|id| self.series.episode(id))
    }

    // -------------------------------------------------------------------------
    // Coordinator Intents
    // -------------------------------------------------------------------------

    /// Episode selection: locked episodes open the paywall, unlocked ones play
    pub fn select_episode(&mut self, id: u32) {
        let Some(episode) = self.series.episode(id).cloned() else {
            debug!(episode = id, "select ignored: unknown episode");
            return;
        };

        if episode.locked {
            info!(episode = id, "locked episode selected, opening paywall");
            self.pending_unlock = Some(id);
            self.show_unlock_modal = true;
            self.paywall.reset();
        } else {
            self.play(&episode);
        }
    }

    /// Switch the player to `episode` unless it is already loaded
    fn play(&mut self, episode: &Episode) {
        self.current_episode = episode.id;
        if self.player.episode_id != Some(episode.id) {
            self.player.load(episode);
        }
        if let Some(idx) = self.series.episode_index(episode.id) {
            self.panel.episodes.focus(idx);
        }
    }

    /// Unlock the pending episode. No-op unless a target is pending and the
    /// balance covers the cost.
    pub fn confirm_unlock(&mut self) {
        let Some(id) = self.pending_unlock else {
            debug!("unlock ignored: nothing pending");
            return;
        };
        if !self.paywall.can_afford(self.coins) || self.series.episode(id).is_none() {
            debug!(episode = id, coins = self.coins, "unlock ignored: precondition failed");
            return;
        }

        self.coins -= self.paywall.cost;
        self.series.unlock(id);
        self.show_unlock_modal = false;
        self.pending_unlock = None;
        if let Some(episode) = self.series.episode(id).cloned() {
            self.play(&episode);
        }
        info!(episode = id, coins = self.coins, "episode unlocked");
    }

    /// Dismiss the paywall. The pending target is kept.
    pub fn close_unlock_modal(&mut self) {
        self.show_unlock_modal = false;
    }

    /// Simulated purchase
    pub fn add_coins(&mut self) {
        self.coins = self.coins.saturating_add(PURCHASE_AMOUNT);
        self.notice = Some(format!(
            "Simulação: +{} moedas adicionadas!",
            PURCHASE_AMOUNT
        ));
        info!(coins = self.coins, "coins added");
    }

    /// End of playback: advance to the next episode if one exists
    pub fn on_episode_ended(&mut self) {
        let next = self.series.next_episode(self.current_episode).map(|e| e.id);
        match next {
            Some(id) => self.select_episode(id),
            None => debug!(episode = self.current_episode, "last episode ended"),
        }
    }

    /// Prepend a locally authored comment
    pub fn add_comment(&mut self, text: impl Into<String>) {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let id = now_ms.max(self.series.max_comment_id() + 1);
        self.series.prepend_comment(catalog::local_comment(id, text));
        info!(comment = id, total = self.series.comments.len(), "comment added");
    }

    /// Apply an intent reported by the catalogue panel
    pub fn apply(&mut self, intent: PanelIntent) {
        match intent {
            PanelIntent::SelectEpisode(id) => self.select_episode(id),
            PanelIntent::SubmitComment(text) => self.add_comment(text),
        }
    }

    /// Apply an intent reported by the paywall
    pub fn apply_paywall(&mut self, intent: PaywallIntent) {
        match intent {
            PaywallIntent::Confirm => self.confirm_unlock(),
            PaywallIntent::Close => self.close_unlock_modal(),
            PaywallIntent::ChoosePackage(idx) => {
                debug!(package = idx, "package chosen; no payment collaborator configured");
            }
        }
    }

    // -------------------------------------------------------------------------
    // Chat Dispatch
    // -------------------------------------------------------------------------

    /// Submit the chat draft; the request waits in the outbox
    pub fn submit_chat(&mut self) -> bool {
        match self.panel.submit_chat(&self.character) {
            Some(request) => {
                self.outbox = Some(request);
                true
            }
            None => false,
        }
    }

    /// Take the request the event loop should send
    pub fn take_chat_request(&mut self) -> Option<ChatRequest> {
        self.outbox.take()
    }

    /// Reply arrived for the pending request
    pub fn receive_chat_reply(&mut self, reply: String) {
        self.panel.receive_reply(reply);
    }

    // -------------------------------------------------------------------------
    // Time
    // -------------------------------------------------------------------------

    /// Advance playback by `elapsed`
    pub fn tick(&mut self, elapsed: Duration) {
        if let Some(PlayerEvent::Ended) = self.player.tick(elapsed) {
            self.on_episode_ended();
        }
    }

    // -------------------------------------------------------------------------
    // Mouse Event Handling
    // -------------------------------------------------------------------------

    /// Handle a mouse event against a screen of size `area`
    pub fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect) -> bool {
        if self.show_unlock_modal {
            return false;
        }
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return false;
        }

        let bar = screen_layout(area).player.progress_bar;
        if bar.contains(Position::new(mouse.column, mouse.row)) {
            self.player.seek_from_pointer(mouse.column - bar.x, bar.width);
            return true;
        }
        false
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Clear notice on any keypress
        self.notice = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        // The paywall captures input while open, unless a text field still
        // has focus (the modal opened on its own at the end of an episode)
        if self.show_unlock_modal && self.input_mode == InputMode::Normal {
            if let Some(intent) = self.paywall.handle_key(key, self.coins) {
                self.apply_paywall(intent);
            }
            return true;
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key)
        } else {
            self.handle_normal_key(key)
        }
    }

    /// Enter text input on tabs that have a text field
    pub fn focus_input(&mut self) -> bool {
        if self.panel.active_tab.accepts_text() {
            self.input_mode = InputMode::Editing;
            true
        } else {
            false
        }
    }

    /// Handle keys in editing (text input) mode
    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Esc {
            self.input_mode = InputMode::Normal;
            return true;
        }

        if key.code == KeyCode::Enter {
            match self.panel.active_tab {
                Tab::Comments => {
                    if let Some(intent) = self.panel.submit_comment() {
                        self.apply(intent);
                    }
                }
                Tab::AiChat => {
                    self.submit_chat();
                }
                Tab::Episodes | Tab::Details => self.input_mode = InputMode::Normal,
            }
            return true;
        }

        let Some(input) = self.panel.active_input() else {
            self.input_mode = InputMode::Normal;
            return false;
        };

        match key.code {
            KeyCode::Char(c) => input.insert(c),
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Left => input.cursor_left(),
            KeyCode::Right => input.cursor_right(),
            KeyCode::Home => input.cursor_home(),
            KeyCode::End => input.cursor_end(),
            _ => return false,
        }
        true
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        // Global shortcuts
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return true;
            }
            KeyCode::Tab => {
                self.panel.next_tab();
                return true;
            }
            KeyCode::BackTab => {
                self.panel.prev_tab();
                return true;
            }
            KeyCode::Char(c @ '1'..='4') => {
                let idx = (c as usize) - ('1' as usize);
                if let Some(tab) = Tab::from_index(idx) {
                    self.panel.switch_tab(tab);
                }
                return true;
            }
            KeyCode::Char(' ') => {
                self.player.toggle_play();
                return true;
            }
            KeyCode::Char('m') => {
                self.player.toggle_mute();
                return true;
            }
            KeyCode::Char('l') => {
                self.player.toggle_like();
                return true;
            }
            KeyCode::Char('[') => {
                self.player.seek_by(-SEEK_STEP_SECS);
                return true;
            }
            KeyCode::Char(']') => {
                self.player.seek_by(SEEK_STEP_SECS);
                return true;
            }
            KeyCode::Char('+') | KeyCode::Char('$') => {
                self.add_coins();
                return true;
            }
            KeyCode::Char('i') => return self.focus_input(),
            _ => {}
        }

        // Tab-specific handling
        match self.panel.active_tab {
            Tab::Episodes => self.handle_episodes_key(key),
            Tab::Details => match key.code {
                KeyCode::Up => {
                    self.panel.details.up();
                    true
                }
                KeyCode::Down => {
                    self.panel.details.down();
                    true
                }
                _ => false,
            },
            Tab::Comments => match key.code {
                KeyCode::Up => {
                    self.panel.comments.scroll.up();
                    true
                }
                KeyCode::Down => {
                    self.panel.comments.scroll.down();
                    true
                }
                KeyCode::Enter => self.focus_input(),
                _ => false,
            },
            Tab::AiChat => match key.code {
                KeyCode::Enter => self.focus_input(),
                _ => false,
            },
        }
    }

    fn handle_episodes_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => self.panel.episodes.up(),
            KeyCode::Down => self.panel.episodes.down(),
            KeyCode::Left => self.panel.episodes.left(),
            KeyCode::Right => self.panel.episodes.right(),
            KeyCode::Enter => {
                if let Some(intent) = self.panel.select_highlighted(&self.series) {
                    self.apply(intent);
                }
            }
            _ => return false,
        }
        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
