//! Inbox Invasion: click emails before they expire
//!
//! Timeout judge: each email carries its spawn time and a randomized lifespan;
//! outliving it counts as a miss.

use std::f32::consts::PI;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::catalog::{EMAILS, EntityKind};
use super::difficulty::{InboxRamp, email_lifespan_range};
use super::events::{GameEvent, SoundCue};
use super::geom::Rect;
use super::scene::{Scene, TickInput, conclude};
use super::session::{ScenePhase, Session};
use super::spawn::{SpawnTimer, Staggered};
use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::context::ArcadeContext;
use crate::renderer::{DrawList, colors};
use crate::router::Route;

pub const MAX_MISSES: u8 = 3;
/// Largest wave size (the first email plus extras)
pub const MAX_MULTI_SPAWN: u32 = 3;
/// Delay between staggered extra emails (seconds)
pub const MULTI_SPAWN_STAGGER: f32 = 0.08;
/// Base lifespan of a normal email (seconds)
pub const EMAIL_LIFE: f32 = 2.6;
/// Base lifespan of a priority email (seconds)
pub const PRIORITY_EMAIL_LIFE: f32 = 1.4;
/// Spawn area margins
pub const EMAIL_MARGIN_X: f32 = 100.0;
pub const EMAIL_MARGIN_Y: f32 = 140.0;

const GAME_OVER_MESSAGE: &str = "Your inbox spiraled out of control.";
const INTRO: &str = "Clear emails before your inbox overflows.\n\n\
    🖱️ Click / Tap emails to clear them\n\
    ⚠️ Priority emails expire faster\n\
    ❤️ Miss 3 emails and it's over";

/// An email waiting to be cleared
#[derive(Debug, Clone)]
pub struct Email {
    pub id: u32,
    pub pos: Vec2,
    pub kind: &'static EntityKind,
    /// Session clock at spawn
    pub spawned_at: f32,
    pub lifespan: f32,
}

impl Email {
    pub fn hitbox(&self) -> Rect {
        Rect::from_center(self.pos, self.kind.hitbox)
    }

    pub fn is_expired(&self, now: f32) -> bool {
        now - self.spawned_at > self.lifespan
    }
}

pub struct InboxScene {
    pub session: Session,
    pub emails: Vec<Email>,
    pub ramp: InboxRamp,
    spawn_timer: SpawnTimer,
    stagger: Staggered<()>,
    best: Option<u32>,
    rng: Pcg32,
    next_id: u32,
    events: Vec<GameEvent>,
}

impl InboxScene {
    pub fn new(ctx: &ArcadeContext, seed: u64) -> Self {
        let best = Route::Inbox
            .high_score_key()
            .and_then(|key| ctx.high_scores.load(key));
        let ramp = InboxRamp::default();
        Self {
            session: Session::new(Route::Inbox, MAX_MISSES, 0),
            emails: Vec::new(),
            spawn_timer: SpawnTimer::new(ramp.spawn_delay),
            ramp,
            stagger: Staggered::default(),
            best,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            events: Vec::new(),
        }
    }

    pub fn spawn_delay(&self) -> f32 {
        self.spawn_timer.delay()
    }

    pub fn pending_extras(&self) -> usize {
        self.stagger.len()
    }

    /// One email, plus a chance of staggered extras
    fn spawn_wave(&mut self) {
        self.spawn_email();

        if self.rng.random::<f32>() < self.ramp.multi_chance {
            let extra = self.rng.random_range(1..=MAX_MULTI_SPAWN - 1);
            for i in 0..extra {
                self.stagger.schedule(i as f32 * MULTI_SPAWN_STAGGER, ());
            }
        }
    }

    fn spawn_email(&mut self) {
        let kind = &EMAILS[self.rng.random_range(0..EMAILS.len())];
        let x = self
            .rng
            .random_range(EMAIL_MARGIN_X..=WORLD_WIDTH - EMAIL_MARGIN_X);
        let y = self
            .rng
            .random_range(EMAIL_MARGIN_Y..=WORLD_HEIGHT - EMAIL_MARGIN_Y);

        let base = if kind.priority {
            PRIORITY_EMAIL_LIFE
        } else {
            EMAIL_LIFE
        };
        let (min_life, max_life) = email_lifespan_range(self.session.score, base);
        let lifespan = self.rng.random_range(min_life..=max_life);

        let id = self.next_id;
        self.next_id += 1;
        self.emails.push(Email {
            id,
            pos: Vec2::new(x, y),
            kind,
            spawned_at: self.session.elapsed,
            lifespan,
        });
    }

    /// Clear the top-most (newest) email under the pointer
    fn clear_at(&mut self, point: Vec2) {
        let Some(index) = self.emails.iter().rposition(|e| e.hitbox().contains(point)) else {
            return;
        };
        self.emails.remove(index);
        self.session.add_score(1);
        self.events.push(GameEvent::Sound(SoundCue::Collect));
    }

    fn judge(&mut self, ctx: &mut ArcadeContext) {
        let now = self.session.elapsed;
        let mut expired = 0;
        self.emails.retain(|email| {
            if email.is_expired(now) {
                expired += 1;
                false
            } else {
                true
            }
        });

        let mut exhausted = false;
        for _ in 0..expired {
            self.events.push(GameEvent::Sound(SoundCue::Hit));
            exhausted |= self.session.lose_life();
        }

        if exhausted {
            self.game_over(ctx);
        }
    }

    fn game_over(&mut self, ctx: &mut ArcadeContext) {
        self.spawn_timer.cancel();
        self.stagger.clear();
        self.emails.clear();
        conclude(
            &mut self.session,
            ctx,
            self.best,
            GAME_OVER_MESSAGE,
            &mut self.events,
        );
    }
}

impl Scene for InboxScene {
    fn route(&self) -> Route {
        Route::Inbox
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

        if let Some(point) = input.pointer_pressed {
            self.clear_at(point);
        }

        for _ in 0..self.spawn_timer.tick(dt) {
            self.spawn_wave();
        }
        for () in self.stagger.tick(dt) {
            self.spawn_email();
        }

        self.judge(ctx);

        if !self.session.is_over() && self.ramp.update(self.session.score) {
            self.spawn_timer.reset(self.ramp.spawn_delay);
        }
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn entity_count(&self) -> usize {
        self.emails.len()
    }

    fn draw(&self, list: &mut DrawList, debug_hitboxes: bool) {
        let now = self.session.elapsed;
        for email in &self.emails {
            let age = now - email.spawned_at;
            // Gentle 6px bob, 0.6s each way
            let bob = 3.0 * (1.0 - (age / 0.6 * PI).cos());
            // Priority emails shake +-4 degrees
            let wobble = if email.kind.priority {
                4f32.to_radians() * (age / 0.12 * PI).sin()
            } else {
                0.0
            };
            let center = email.pos + Vec2::new(0.0, bob);
            list.rotated_text(email.kind.glyph, center, 72.0, wobble);
            let label_color = if email.kind.priority {
                colors::PRIORITY
            } else {
                colors::TEXT
            };
            list.text(email.kind.label, center + Vec2::new(0.0, 60.0), 20.0, label_color);
            if debug_hitboxes {
                list.outline(email.hitbox());
            }
        }
    }

    fn intro(&self) -> &'static str {
        INTRO
    }

    fn score_label(&self) -> String {
        format!("Cleared: {}", self.session.score)
    }
}
