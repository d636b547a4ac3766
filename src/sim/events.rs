//! Events emitted by the simulation for the host to act on
//!
//! The simulation never talks to audio or the DOM directly; it queues events
//! and the host drains them after each update.

use serde::{Deserialize, Serialize};

use super::session::GameOverReport;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Menu entry chosen
    MenuSelect,
    /// Intro dismissed, play begins
    Start,
    /// Cake caught / email cleared
    Collect,
    /// Cake dropped / email expired
    Hit,
    /// Runner jump
    Jump,
    /// Session ended
    GameOver,
    /// Session ended with a new best
    HighScore,
}

/// Host-facing simulation event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundCue),
    /// Camera shake (seconds, fraction of the view)
    Shake { duration: f32, intensity: f32 },
    GameOver(GameOverReport),
    /// Start or stop the menu's voice message track
    VoiceMessage { playing: bool },
}

/// Standard game-over shake
pub const GAME_OVER_SHAKE: GameEvent = GameEvent::Shake {
    duration: 0.2,
    intensity: 0.01,
};
