//! Per-scene session state and the Intro -> Playing -> GameOver lifecycle

use serde::{Deserialize, Serialize};

use crate::router::Route;

/// Current phase of a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenePhase {
    /// World built, waiting for the first input
    Intro,
    /// Spawn loop and judge active
    Playing,
    /// Run ended (terminal)
    GameOver,
}

/// Summary of a finished session, shown in the game-over dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverReport {
    pub route: Route,
    pub score: u32,
    /// Best score loaded when the scene started
    pub previous_best: Option<u32>,
    pub new_high_score: bool,
    pub message: String,
}

/// Transient counters for one play-through of a scene
#[derive(Debug, Clone)]
pub struct Session {
    pub route: Route,
    pub score: u32,
    pub lives: u8,
    pub max_lives: u8,
    pub phase: ScenePhase,
    /// Seconds spent in `Playing`
    pub elapsed: f32,
    report: Option<GameOverReport>,
}

impl Session {
    pub fn new(route: Route, lives: u8, initial_score: u32) -> Self {
        Self {
            route,
            score: initial_score,
            lives,
            max_lives: lives,
            phase: ScenePhase::Intro,
            elapsed: 0.0,
            report: None,
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == ScenePhase::Playing
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == ScenePhase::GameOver
    }

    /// Intro -> Playing. Returns false from any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != ScenePhase::Intro {
            return false;
        }
        self.phase = ScenePhase::Playing;
        log::info!("{} started", self.route.title());
        true
    }

    /// Advance the play clock
    pub fn advance(&mut self, dt: f32) {
        if self.is_playing() {
            self.elapsed += dt;
        }
    }

    pub fn add_score(&mut self, amount: u32) {
        if self.is_playing() {
            self.score = self.score.saturating_add(amount);
        }
    }

    /// Remove one life (never below zero). Returns true once lives are exhausted.
    pub fn lose_life(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    /// Misses taken so far
    pub fn misses(&self) -> u8 {
        self.max_lives - self.lives
    }

    /// Playing -> GameOver. Only the first call produces a report.
    pub fn finish(
        &mut self,
        previous_best: Option<u32>,
        new_high_score: bool,
        message: &str,
    ) -> Option<GameOverReport> {
        if self.is_over() {
            return None;
        }
        self.phase = ScenePhase::GameOver;
        let report = GameOverReport {
            route: self.route,
            score: self.score,
            previous_best,
            new_high_score,
            message: message.to_string(),
        };
        log::info!(
            "{} over: score {} (best {:?}, new high score: {})",
            self.route.title(),
            report.score,
            previous_best,
            new_high_score
        );
        self.report = Some(report.clone());
        Some(report)
    }

    pub fn report(&self) -> Option<&GameOverReport> {
        self.report.as_ref()
    }
}
