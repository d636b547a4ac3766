//! Arcade Hub - a menu and three browser mini-games
//!
//! Core modules:
//! - `sim`: Deterministic scene simulation (sessions, spawn loops, judges)
//! - `arcade`: Top-level driver tying router, context and active scene together
//! - `router`: Hash token to scene mapping
//! - `menu`: Menu screen state
//! - `highscores` / `settings`: Best scores and preferences in key-value storage
//! - `platform`: Browser input mapping and storage backend
//! - `renderer`: Draw lists (and the canvas painter on wasm)

pub mod arcade;
#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod context;
pub mod highscores;
pub mod menu;
pub mod platform;
pub mod renderer;
pub mod router;
pub mod settings;
pub mod sim;

pub use arcade::{Arcade, Hud};
pub use context::ArcadeContext;
pub use highscores::{HighScores, KeyValueStore, MemoryStore, StorageError};
pub use router::{Route, Router};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the host feeds into the loop (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Logical world dimensions; the host scales this to the canvas
    pub const WORLD_WIDTH: f32 = 1600.0;
    pub const WORLD_HEIGHT: f32 = 900.0;

    /// Default sound mix
    pub const MASTER_VOLUME: f32 = 0.8;
    pub const MUSIC_VOLUME: f32 = 0.04;
    /// Music volume while the menu voice message plays
    pub const MUSIC_DUCKED_VOLUME: f32 = 0.01;
}
