//! Responsibility Runner: jump or duck past life's obstacles while aging
//!
//! Collision judge: a fixed player rectangle (shorter while ducking) against
//! each obstacle's own hitbox. Any hit is fatal. The score is the age reached.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::catalog::{EntityKind, OBSTACLES};
use super::difficulty::obstacle_crossing_time;
use super::events::{GameEvent, SoundCue};
use super::geom::Rect;
use super::scene::{Scene, TickInput, conclude};
use super::session::{ScenePhase, Session};
use super::spawn::SpawnTimer;
use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::context::ArcadeContext;
use crate::renderer::{DrawList, colors};
use crate::router::Route;

/// Player center x
pub const PLAYER_X: f32 = 120.0;
pub const PLAYER_SIZE: Vec2 = Vec2::new(40.0, 60.0);
/// Player height while ducking
pub const DUCK_HEIGHT: f32 = 30.0;
/// Top of the ground strip
pub const GROUND_Y: f32 = WORLD_HEIGHT - 40.0;
/// Downward acceleration (px/s²)
pub const GRAVITY: f32 = 1200.0;
/// Initial upward speed of a jump (px/s)
pub const JUMP_SPEED: f32 = 500.0;
/// Seconds between obstacles
pub const OBSTACLE_SPAWN_DELAY: f32 = 1.5;
pub const OBSTACLE_START_X: f32 = WORLD_WIDTH + 50.0;
pub const OBSTACLE_END_X: f32 = -100.0;
pub const START_AGE: u32 = 18;
/// Seconds of play per year of age
pub const SECONDS_PER_YEAR: f32 = 10.0;

const INTRO: &str = "Life keeps throwing things at you.\n\n\
    ⬆️ / SPACE / Tap to jump\n\
    ⬇️ / S to duck under flying trouble\n\
    One hit and it's over";

/// An obstacle sliding toward the player
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub kind: &'static EntityKind,
    /// Hitbox center x
    pub x: f32,
    /// Leftward speed (px/s)
    pub speed: f32,
}

impl Obstacle {
    pub fn hitbox(&self) -> Rect {
        Rect::from_bottom_center(
            Vec2::new(self.x, GROUND_Y - self.kind.elevation),
            self.kind.hitbox,
        )
    }
}

/// The running player
#[derive(Debug, Clone)]
pub struct Runner {
    /// Bottom edge y
    pub feet_y: f32,
    pub vel_y: f32,
    pub ducking: bool,
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            feet_y: GROUND_Y,
            vel_y: 0.0,
            ducking: false,
        }
    }
}

impl Runner {
    pub fn is_grounded(&self) -> bool {
        self.feet_y >= GROUND_Y && self.vel_y >= 0.0
    }

    pub fn height(&self) -> f32 {
        if self.ducking {
            DUCK_HEIGHT
        } else {
            PLAYER_SIZE.y
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_bottom_center(
            Vec2::new(PLAYER_X, self.feet_y),
            Vec2::new(PLAYER_SIZE.x, self.height()),
        )
    }

    /// Start a jump. Ignored while airborne.
    pub fn jump(&mut self) -> bool {
        if !self.is_grounded() {
            return false;
        }
        self.vel_y = -JUMP_SPEED;
        self.ducking = false;
        true
    }

    fn integrate(&mut self, dt: f32) {
        self.vel_y += GRAVITY * dt;
        self.feet_y += self.vel_y * dt;
        if self.feet_y >= GROUND_Y {
            self.feet_y = GROUND_Y;
            self.vel_y = 0.0;
        }
    }
}

pub struct RunnerScene {
    pub session: Session,
    pub runner: Runner,
    pub obstacles: Vec<Obstacle>,
    /// Seconds toward the next birthday
    age_timer: f32,
    spawn_timer: SpawnTimer,
    best: Option<u32>,
    rng: Pcg32,
    next_id: u32,
    events: Vec<GameEvent>,
}

impl RunnerScene {
    pub fn new(ctx: &ArcadeContext, seed: u64) -> Self {
        let best = Route::Runner
            .high_score_key()
            .and_then(|key| ctx.high_scores.load(key));
        Self {
            session: Session::new(Route::Runner, 1, START_AGE),
            runner: Runner::default(),
            obstacles: Vec::new(),
            age_timer: 0.0,
            spawn_timer: SpawnTimer::new(OBSTACLE_SPAWN_DELAY),
            best,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            events: Vec::new(),
        }
    }

    pub fn age(&self) -> u32 {
        self.session.score
    }

    fn spawn_obstacle(&mut self) {
        let kind = &OBSTACLES[self.rng.random_range(0..OBSTACLES.len())];
        let crossing = obstacle_crossing_time(self.age());
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            kind,
            x: OBSTACLE_START_X,
            speed: (OBSTACLE_START_X - OBSTACLE_END_X) / crossing,
        });
    }

    fn judge(&mut self, ctx: &mut ArcadeContext) {
        let player = self.runner.hitbox();
        let fatal = self
            .obstacles
            .iter()
            .find(|o| player.intersects(&o.hitbox()))
            .map(|o| o.kind.message);

        if let Some(message) = fatal {
            self.session.lose_life();
            self.game_over(ctx, message);
        }
    }

    fn game_over(&mut self, ctx: &mut ArcadeContext, message: &str) {
        self.spawn_timer.cancel();
        self.obstacles.clear();
        self.runner.vel_y = 0.0;
        conclude(&mut self.session, ctx, self.best, message, &mut self.events);
    }

    fn grow_older(&mut self, dt: f32) {
        self.age_timer += dt;
        if self.age_timer > SECONDS_PER_YEAR {
            self.age_timer = 0.0;
            self.session.add_score(1);
            log::debug!("Runner aged to {}", self.age());
        }
    }
}

impl Scene for RunnerScene {
    fn route(&self) -> Route {
        Route::Runner
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
                if input.any_press() && self.session.start() {
                    self.events.push(GameEvent::Sound(SoundCue::Start));
                }
                return;
            }
            ScenePhase::Playing => {}
        }

        self.session.advance(dt);

        self.runner.ducking = input.duck && self.runner.is_grounded();
        if input.any_press() && self.runner.jump() {
            self.events.push(GameEvent::Sound(SoundCue::Jump));
        }
        self.runner.integrate(dt);

        for obstacle in &mut self.obstacles {
            obstacle.x -= obstacle.speed * dt;
        }
        self.obstacles.retain(|o| o.x > OBSTACLE_END_X);

        for _ in 0..self.spawn_timer.tick(dt) {
            self.spawn_obstacle();
        }

        self.judge(ctx);

        if !self.session.is_over() {
            self.grow_older(dt);
        }
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn entity_count(&self) -> usize {
        self.obstacles.len()
    }

    fn draw(&self, list: &mut DrawList, debug_hitboxes: bool) {
        list.fill(
            Rect::new(
                Vec2::new(0.0, GROUND_Y),
                Vec2::new(WORLD_WIDTH, WORLD_HEIGHT),
            ),
            colors::GROUND,
        );
        list.fill(self.runner.hitbox(), colors::RUNNER);
        for obstacle in &self.obstacles {
            list.text(obstacle.kind.glyph, obstacle.hitbox().center(), 48.0, colors::TEXT);
        }
        if debug_hitboxes {
            list.outline(self.runner.hitbox());
            for obstacle in &self.obstacles {
                list.outline(obstacle.hitbox());
            }
        }
    }

    fn intro(&self) -> &'static str {
        INTRO
    }

    fn score_label(&self) -> String {
        format!("Age: {}", self.age())
    }
}
