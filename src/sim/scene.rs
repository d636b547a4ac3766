//! The lifecycle contract every playable scene follows
//!
//! Setup happens in the scene constructor (world built, best score loaded,
//! spawn timer armed but inert). `tick` then runs, in order: intro gate,
//! player movement, spawn loop, judge. Game over is terminal; restarting
//! means building a fresh scene.

use glam::Vec2;

use super::events::{GAME_OVER_SHAKE, GameEvent, SoundCue};
use super::session::{ScenePhase, Session};
use crate::context::ArcadeContext;
use crate::renderer::DrawList;
use crate::router::Route;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held horizontal direction (-1 left, 0 idle, 1 right)
    pub axis: f32,
    /// Pointer went down this tick (world coordinates)
    pub pointer_pressed: Option<Vec2>,
    /// Pointer is currently held down
    pub pointer_held: bool,
    /// Action key pressed this tick (space / up: start, jump, restart)
    pub action: bool,
    /// Duck key held
    pub duck: bool,
    /// Restart requested (dialog button or R)
    pub restart: bool,
    /// Back to menu requested (Escape or dialog button)
    pub to_menu: bool,
}

impl TickInput {
    /// Whether this tick carries a "get going" input (tap, click or space)
    pub fn any_press(&self) -> bool {
        self.action || self.pointer_pressed.is_some()
    }

    /// Drop one-shot inputs, keeping held state
    pub fn held_only(&self) -> Self {
        Self {
            axis: self.axis,
            pointer_held: self.pointer_held,
            duck: self.duck,
            ..Default::default()
        }
    }
}

/// A playable scene
pub trait Scene {
    fn route(&self) -> Route;

    fn session(&self) -> &Session;

    /// Best score loaded when the scene was built
    fn best(&self) -> Option<u32>;

    /// Advance one fixed step
    fn tick(&mut self, ctx: &mut ArcadeContext, input: &TickInput, dt: f32);

    /// Events queued since the last drain
    fn drain_events(&mut self) -> Vec<GameEvent>;

    /// Number of live spawned entities
    fn entity_count(&self) -> usize;

    /// Append this frame's draw commands
    fn draw(&self, list: &mut DrawList, debug_hitboxes: bool);

    /// Intro overlay text
    fn intro(&self) -> &'static str;

    /// Text for the score counter
    fn score_label(&self) -> String {
        format!("Score: {}", self.session().score)
    }

    fn phase(&self) -> ScenePhase {
        self.session().phase
    }
}

/// Shared game-over step: persist a new best and build the report events.
///
/// Callers must have cancelled their spawn loop and cleared their entities.
pub(crate) fn conclude(
    session: &mut Session,
    ctx: &mut ArcadeContext,
    best: Option<u32>,
    message: &str,
    events: &mut Vec<GameEvent>,
) {
    if session.is_over() {
        return;
    }
    let new_high_score = match session.route.high_score_key() {
        Some(key) => ctx.high_scores.submit(key, session.score, best),
        None => false,
    };
    if let Some(report) = session.finish(best, new_high_score, message) {
        events.push(GAME_OVER_SHAKE);
        events.push(GameEvent::Sound(if new_high_score {
            SoundCue::HighScore
        } else {
            SoundCue::GameOver
        }));
        events.push(GameEvent::GameOver(report));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;

    #[test]
    fn test_held_only_drops_one_shots() {
        let input = TickInput {
            axis: -1.0,
            pointer_pressed: Some(Vec2::ZERO),
            pointer_held: true,
            action: true,
            duck: true,
            restart: true,
            to_menu: true,
        };
        let held = input.held_only();
        assert_eq!(held.axis, -1.0);
        assert!(held.pointer_held && held.duck);
        assert!(!held.any_press() && !held.restart && !held.to_menu);
    }

    #[test]
    fn test_conclude_fires_once_and_persists() {
        let mut ctx = ArcadeContext::new(Box::new(MemoryStore::new()));
        let mut session = Session::new(Route::Catcher, 3, 0);
        session.start();
        session.add_score(4);

        let mut events = Vec::new();
        conclude(&mut session, &mut ctx, Some(2), "bye", &mut events);
        conclude(&mut session, &mut ctx, Some(2), "bye", &mut events);

        let reports: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver(_)))
            .collect();
        assert_eq!(reports.len(), 1);
        assert_eq!(ctx.high_scores.load("highScore_catcher"), Some(4));
        assert!(session.report().is_some_and(|r| r.new_high_score));
    }
}
