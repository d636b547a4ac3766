//! Deterministic scene simulation
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio or platform calls (scenes emit `GameEvent`s instead)

pub mod catalog;
pub mod catcher;
pub mod difficulty;
pub mod events;
pub mod geom;
pub mod inbox;
pub mod runner;
pub mod scene;
pub mod session;
pub mod spawn;

pub use catalog::EntityKind;
pub use catcher::CatcherScene;
pub use events::{GameEvent, SoundCue};
pub use geom::Rect;
pub use inbox::InboxScene;
pub use runner::RunnerScene;
pub use scene::{Scene, TickInput};
pub use session::{GameOverReport, ScenePhase, Session};
pub use spawn::{SpawnTimer, Staggered};
