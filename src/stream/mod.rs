//! Playback infrastructure
//!
//! - Player: simulated playback surface for the current episode

pub mod player;

pub use player::{PlaybackState, PlayerEvent, PlayerSurface};
