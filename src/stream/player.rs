//! Player surface - simulated playback of one episode
//!
//! Owns the play/pause machine, playback position, seeking and the
//! mute/like toggles. Time is advanced by the event loop tick.

use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::models::{format_clock, Episode};

/// Relative seek step for keyboard seeking
pub const SEEK_STEP_SECS: i64 = 5;

/// Playback state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Paused by the user or after the episode ended
    #[default]
    Paused,
    /// Position advances on every tick
    Playing,
    /// Autoplay attempt refused by environment policy; behaves as paused
    AutoplayBlocked,
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing)
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackState::Paused => write!(f, "Paused"),
            PlaybackState::Playing => write!(f, "Playing"),
            PlaybackState::AutoplayBlocked => write!(f, "Autoplay blocked"),
        }
    }
}

/// Signals the surface reports upward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// Playback reached the end of the episode
    Ended,
}

/// Player surface for a single media resource
#[derive(Debug, Clone)]
pub struct PlayerSurface {
    pub state: PlaybackState,
    pub position: Duration,
    pub duration: Duration,
    pub muted: bool,
    pub liked: bool,
    /// Environment policy: whether autonomous playback is allowed
    pub autoplay_allowed: bool,
    /// Episode currently loaded
    pub episode_id: Option<u32>,
}

impl Default for PlayerSurface {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PlayerSurface {
    pub fn new(autoplay_allowed: bool) -> Self {
        Self {
            state: PlaybackState::Paused,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            muted: false,
            liked: false,
            autoplay_allowed,
            episode_id: None,
        }
    }

    /// Load an episode: rewind to zero and attempt autoplay.
    ///
    /// Mute and like are left untouched.
    pub fn load(&mut self, episode: &Episode) {
        self.episode_id = Some(episode.id);
        self.duration = episode.runtime();
        self.position = Duration::ZERO;
        self.state = if self.autoplay_allowed {
            PlaybackState::Playing
        } else {
            PlaybackState::AutoplayBlocked
        };
        debug!(episode = episode.id, state = %self.state, "player loaded episode");
    }

    /// Play/pause toggle. Playing again from the end restarts the episode.
    pub fn toggle_play(&mut self) {
        self.state = match self.state {
            PlaybackState::Playing => PlaybackState::Paused,
            PlaybackState::Paused | PlaybackState::AutoplayBlocked => {
                if self.at_end() {
                    self.position = Duration::ZERO;
                }
                PlaybackState::Playing
            }
        };
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn toggle_like(&mut self) {
        self.liked = !self.liked;
    }

    fn at_end(&self) -> bool {
        !self.duration.is_zero() && self.position >= self.duration
    }

    /// Advance playback by `elapsed`. Emits [`PlayerEvent::Ended`] once when
    /// the end is reached, then rests paused at the end.
    pub fn tick(&mut self, elapsed: Duration) -> Option<PlayerEvent> {
        if !self.state.is_playing() || self.episode_id.is_none() {
            return None;
        }

        self.position = (self.position + elapsed).min(self.duration);
        if self.at_end() {
            self.state = PlaybackState::Paused;
            debug!(episode = ?self.episode_id, "playback ended");
            return Some(PlayerEvent::Ended);
        }
        None
    }

    /// Jump to an absolute position, clamped to [0, duration]
    pub fn seek_to(&mut self, position: Duration) {
        self.position = position.min(self.duration);
    }

    /// Relative seek in whole seconds, clamped to [0, duration]
    pub fn seek_by(&mut self, delta_secs: i64) {
        let target = self.position.as_secs_f64() + delta_secs as f64;
        self.seek_to(Duration::from_secs_f64(target.max(0.0)));
    }

    /// Seek from a pointer offset within a progress bar `width` cells wide
    pub fn seek_from_pointer(&mut self, offset: u16, width: u16) {
        if width == 0 {
            return;
        }
        let fraction = (offset as f64 / width as f64).clamp(0.0, 1.0);
        self.seek_to(self.duration.mul_f64(fraction));
    }

    /// Fraction played (0.0 - 1.0)
    pub fn progress(&self) -> f64 {
        let total = self.duration.as_secs_f64();
        if total > 0.0 {
            (self.position.as_secs_f64() / total).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Progress as a percentage (0 - 100)
    pub fn progress_percent(&self) -> f64 {
        self.progress() * 100.0
    }

    pub fn format_position(&self) -> String {
        format_clock(self.position)
    }

    pub fn format_duration(&self) -> String {
        format_clock(self.duration)
    }
}
