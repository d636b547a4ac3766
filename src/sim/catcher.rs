//! Cake Catcher: move a plate, catch falling cakes, drop three and it's over
//!
//! Overlap judge: every tick the plate hitbox is tested against each cake.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::catalog::CAKE;
use super::difficulty::cake_fall_speed;
use super::events::{GameEvent, SoundCue};
use super::geom::Rect;
use super::scene::{Scene, TickInput, conclude};
use super::session::{ScenePhase, Session};
use super::spawn::SpawnTimer;
use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::context::ArcadeContext;
use crate::renderer::{DrawList, colors};
use crate::router::Route;

pub const CATCHER_LIVES: u8 = 3;
/// Plate speed (px/s)
pub const PLATE_SPEED: f32 = 1200.0;
/// Closest the plate center gets to either edge
pub const PLATE_MARGIN: f32 = 40.0;
pub const PLATE_Y: f32 = WORLD_HEIGHT - 100.0;
pub const PLATE_HITBOX: Vec2 = Vec2::new(90.0, 48.0);
/// Seconds between cakes
pub const CAKE_SPAWN_DELAY: f32 = 0.9;
/// Cakes spawn at least this far from either edge
pub const CAKE_SPAWN_MARGIN: f32 = 160.0;
pub const CAKE_SPAWN_Y: f32 = -40.0;
/// A cake below this line is dropped
pub const CAKE_MISS_Y: f32 = WORLD_HEIGHT + 50.0;

const GAME_OVER_MESSAGE: &str = "You dropped too much cake, better get cleaning!";
const INTRO: &str = "Catch the falling cakes with your plate.\n\n\
    ⬅️ ➡️ / A D, or hold either side of the plate to move\n\
    ❤️ Drop 3 cakes and it's over";

/// A falling cake
#[derive(Debug, Clone)]
pub struct Cake {
    pub id: u32,
    pub pos: Vec2,
    /// Fixed at spawn time from the score back then
    pub fall_speed: f32,
}

impl Cake {
    pub fn hitbox(&self) -> Rect {
        Rect::from_center(self.pos, CAKE.hitbox)
    }
}

pub struct CatcherScene {
    pub session: Session,
    pub plate_x: f32,
    pub cakes: Vec<Cake>,
    /// Direction latched from the last pointer press
    pointer_dir: f32,
    spawn_timer: SpawnTimer,
    /// Best score loaded at scene start
    best: Option<u32>,
    rng: Pcg32,
    next_id: u32,
    events: Vec<GameEvent>,
}

impl CatcherScene {
    pub fn new(ctx: &ArcadeContext, seed: u64) -> Self {
        let best = Route::Catcher
            .high_score_key()
            .and_then(|key| ctx.high_scores.load(key));
        if let Some(best) = best {
            log::info!("Loaded catcher high score: {}", best);
        }
        Self {
            session: Session::new(Route::Catcher, CATCHER_LIVES, 0),
            plate_x: WORLD_WIDTH / 2.0,
            cakes: Vec::new(),
            pointer_dir: 0.0,
            spawn_timer: SpawnTimer::new(CAKE_SPAWN_DELAY),
            best,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            events: Vec::new(),
        }
    }

    pub fn plate_hitbox(&self) -> Rect {
        Rect::from_center(Vec2::new(self.plate_x, PLATE_Y), PLATE_HITBOX)
    }

    fn spawn_cake(&mut self) {
        let x = self
            .rng
            .random_range(CAKE_SPAWN_MARGIN..=WORLD_WIDTH - CAKE_SPAWN_MARGIN);
        let id = self.next_id;
        self.next_id += 1;
        self.cakes.push(Cake {
            id,
            pos: Vec2::new(x, CAKE_SPAWN_Y),
            fall_speed: cake_fall_speed(self.session.score),
        });
    }

    fn move_plate(&mut self, input: &TickInput, dt: f32) {
        if let Some(pointer) = input.pointer_pressed {
            self.pointer_dir = if pointer.x < self.plate_x { -1.0 } else { 1.0 };
        } else if !input.pointer_held {
            self.pointer_dir = 0.0;
        }

        // Keys win over the pointer
        let dir = if input.axis != 0.0 {
            input.axis.signum()
        } else {
            self.pointer_dir
        };

        self.plate_x = (self.plate_x + dir * PLATE_SPEED * dt)
            .clamp(PLATE_MARGIN, WORLD_WIDTH - PLATE_MARGIN);
    }

    /// Catches first, then drops
    fn judge(&mut self, ctx: &mut ArcadeContext) {
        let plate = self.plate_hitbox();

        let mut caught = 0;
        self.cakes.retain(|cake| {
            if plate.intersects(&cake.hitbox()) {
                caught += 1;
                false
            } else {
                true
            }
        });
        for _ in 0..caught {
            self.session.add_score(1);
            self.events.push(GameEvent::Sound(SoundCue::Collect));
        }

        let mut dropped = 0;
        self.cakes.retain(|cake| {
            if cake.pos.y > CAKE_MISS_Y {
                dropped += 1;
                false
            } else {
                true
            }
        });
        let mut exhausted = false;
        for _ in 0..dropped {
            self.events.push(GameEvent::Sound(SoundCue::Hit));
            exhausted |= self.session.lose_life();
        }

        if exhausted {
            self.game_over(ctx);
        }
    }

    fn game_over(&mut self, ctx: &mut ArcadeContext) {
        self.spawn_timer.cancel();
        self.cakes.clear();
        self.pointer_dir = 0.0;
        conclude(
            &mut self.session,
            ctx,
            self.best,
            GAME_OVER_MESSAGE,
            &mut self.events,
        );
    }
}

impl Scene for CatcherScene {
    fn route(&self) -> Route {
        Route::Catcher
    }

    fn session(&self) -> &Session {
        &self.session
    }

    fn best(&self) -> Option<u32> {
        self.best
    }

    fn tick(&mut self, ctx: &mut ArcadeContext, input: &TickInput, dt: f32) {
        match self.session.phase {
            ScenePhase::GameOver => return,
            ScenePhase::Intro => {
                // The starting press is consumed
                if input.any_press() && self.session.start() {
                    self.events.push(GameEvent::Sound(SoundCue::Start));
                }
                return;
            }
            ScenePhase::Playing => {}
        }

        self.session.advance(dt);
        self.move_plate(input, dt);

        for cake in &mut self.cakes {
            cake.pos.y += cake.fall_speed * dt;
        }

        for _ in 0..self.spawn_timer.tick(dt) {
            self.spawn_cake();
        }

        self.judge(ctx);
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn entity_count(&self) -> usize {
        self.cakes.len()
    }

    fn draw(&self, list: &mut DrawList, debug_hitboxes: bool) {
        list.text("🍽️", Vec2::new(self.plate_x, PLATE_Y), 64.0, colors::TEXT);
        for cake in &self.cakes {
            list.text(CAKE.glyph, cake.pos, 48.0, colors::TEXT);
        }
        if debug_hitboxes {
            list.outline(self.plate_hitbox());
            for cake in &self.cakes {
                list.outline(cake.hitbox());
            }
        }
    }

    fn intro(&self) -> &'static str {
        INTRO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::highscores::MemoryStore;

    fn playing(store: MemoryStore) -> (ArcadeContext, CatcherScene) {
        let mut ctx = ArcadeContext::new(Box::new(store));
        let mut scene = CatcherScene::new(&ctx, 7);
        let start = TickInput {
            action: true,
            ..Default::default()
        };
        scene.tick(&mut ctx, &start, SIM_DT);
        assert_eq!(scene.session.phase, ScenePhase::Playing);
        (ctx, scene)
    }

    fn dropped_cake(id: u32) -> Cake {
        // Far from the plate, already past the miss line
        Cake {
            id,
            pos: Vec2::new(CAKE_SPAWN_MARGIN, CAKE_MISS_Y + 1.0),
            fall_speed: 200.0,
        }
    }

    fn game_over_reports(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver(_)))
            .count()
    }

    #[test]
    fn test_intro_is_inert() {
        let mut ctx = ArcadeContext::new(Box::new(MemoryStore::new()));
        let mut scene = CatcherScene::new(&ctx, 1);
        for _ in 0..600 {
            scene.tick(&mut ctx, &TickInput::default(), SIM_DT);
        }
        assert_eq!(scene.session.phase, ScenePhase::Intro);
        assert!(scene.cakes.is_empty());
    }

    #[test]
    fn test_spawn_loop_runs_while_playing() {
        let (mut ctx, mut scene) = playing(MemoryStore::new());
        for _ in 0..60 {
            scene.tick(&mut ctx, &TickInput::default(), SIM_DT);
        }
        assert_eq!(scene.cakes.len(), 1);
        let cake = &scene.cakes[0];
        assert!(cake.pos.x >= CAKE_SPAWN_MARGIN && cake.pos.x <= WORLD_WIDTH - CAKE_SPAWN_MARGIN);
        assert_eq!(cake.fall_speed, 200.0);
    }

    #[test]
    fn test_catching_scores() {
        let (mut ctx, mut scene) = playing(MemoryStore::new());
        scene.cakes.push(Cake {
            id: 99,
            pos: Vec2::new(scene.plate_x, PLATE_Y - 10.0),
            fall_speed: 200.0,
        });
        scene.tick(&mut ctx, &TickInput::default(), SIM_DT);
        assert_eq!(scene.session.score, 1);
        assert!(scene.cakes.is_empty());
        assert!(scene
            .drain_events()
            .contains(&GameEvent::Sound(SoundCue::Collect)));
    }

    #[test]
    fn test_three_misses_end_the_game_once() {
        let store = MemoryStore::new().with("highScore_catcher", "0");
        let (mut ctx, mut scene) = playing(store);
        let mut events = Vec::new();

        for id in 0..3 {
            scene.cakes.push(dropped_cake(id));
            scene.tick(&mut ctx, &TickInput::default(), SIM_DT);
            events.extend(scene.drain_events());
        }

        assert_eq!(scene.session.lives, 0);
        assert_eq!(scene.session.phase, ScenePhase::GameOver);
        assert_eq!(game_over_reports(&events), 1);
        let report = scene.session.report().cloned().unwrap();
        assert_eq!(report.score, 0);
        assert!(!report.new_high_score);
    }

    #[test]
    fn test_simultaneous_misses_clamp_and_fire_once() {
        let (mut ctx, mut scene) = playing(MemoryStore::new());
        for id in 0..5 {
            scene.cakes.push(dropped_cake(id));
        }
        scene.tick(&mut ctx, &TickInput::default(), SIM_DT);

        assert_eq!(scene.session.lives, 0);
        assert_eq!(game_over_reports(&scene.drain_events()), 1);
    }

    #[test]
    fn test_nothing_happens_after_game_over() {
        let (mut ctx, mut scene) = playing(MemoryStore::new());
        for id in 0..3 {
            scene.cakes.push(dropped_cake(id));
        }
        scene.tick(&mut ctx, &TickInput::default(), SIM_DT);
        scene.drain_events();

        for _ in 0..600 {
            scene.tick(&mut ctx, &TickInput::default(), SIM_DT);
        }
        assert!(scene.cakes.is_empty());
        assert_eq!(scene.session.score, 0);
        assert_eq!(scene.session.lives, 0);
        assert!(scene.drain_events().is_empty());
    }

    #[test]
    fn test_plate_follows_keys_and_pointer() {
        let (mut ctx, mut scene) = playing(MemoryStore::new());
        let left = TickInput {
            axis: -1.0,
            ..Default::default()
        };
        for _ in 0..120 {
            scene.tick(&mut ctx, &left, SIM_DT);
        }
        assert_eq!(scene.plate_x, PLATE_MARGIN);

        // Press right of the plate, keep holding
        let press = TickInput {
            pointer_pressed: Some(Vec2::new(1000.0, 500.0)),
            pointer_held: true,
            ..Default::default()
        };
        let hold = press.held_only();
        scene.tick(&mut ctx, &press, SIM_DT);
        scene.tick(&mut ctx, &hold, SIM_DT);
        assert!(scene.plate_x > PLATE_MARGIN);

        // Release stops the plate
        let x = scene.plate_x;
        scene.tick(&mut ctx, &TickInput::default(), SIM_DT);
        assert_eq!(scene.plate_x, x);
    }

    #[test]
    fn test_new_best_is_persisted() {
        let store = MemoryStore::new().with("highScore_catcher", "1");
        let (mut ctx, mut scene) = playing(store);
        scene.session.add_score(2);
        for id in 0..3 {
            scene.cakes.push(dropped_cake(id));
        }
        scene.tick(&mut ctx, &TickInput::default(), SIM_DT);

        assert!(scene.session.report().is_some_and(|r| r.new_high_score));
        assert_eq!(ctx.high_scores.load("highScore_catcher"), Some(2));
    }
}
