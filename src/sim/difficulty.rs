//! Difficulty ramps
//!
//! Every curve is monotone in score (or age) and clamped, so difficulty never
//! regresses and never runs away.

/// Catcher: base cake fall speed (px/s)
pub const CAKE_BASE_SPEED: f32 = 200.0;
/// Catcher: extra fall speed per cake caught
pub const CAKE_SPEED_PER_POINT: f32 = 5.0;
/// Catcher: fall speed ceiling
pub const CAKE_MAX_SPEED: f32 = 900.0;

/// Inbox: starting spawn delay (seconds)
pub const INBOX_SPAWN_DELAY: f32 = 1.0;
/// Inbox: spawn delay floor
pub const INBOX_MIN_SPAWN_DELAY: f32 = 0.3;
/// Inbox: delay shaved off per difficulty level
pub const INBOX_SPAWN_STEP: f32 = 0.02;
/// Inbox: score needed per difficulty level
pub const INBOX_POINTS_PER_LEVEL: u32 = 6;
/// Inbox: starting chance of a multi-spawn wave
pub const INBOX_MULTI_CHANCE: f32 = 0.1;
/// Inbox: multi-spawn chance added per level
pub const INBOX_MULTI_STEP: f32 = 0.03;
/// Inbox: multi-spawn chance ceiling
pub const INBOX_MAX_MULTI_CHANCE: f32 = 0.45;
/// Inbox: lifespan reduction per point
pub const INBOX_LIFE_CUT_PER_POINT: f32 = 0.02;
/// Inbox: lifespan reduction ceiling
pub const INBOX_MAX_LIFE_CUT: f32 = 0.6;
/// Inbox: random extra lifespan (seconds)
pub const INBOX_LIFE_JITTER: f32 = 0.6;

/// Runner: slowest obstacle crossing time (seconds)
pub const RUNNER_BASE_CROSSING: f32 = 3.0;
/// Runner: crossing time shaved off per year of age
pub const RUNNER_CROSSING_PER_AGE: f32 = 0.02;
/// Runner: fastest obstacle crossing time
pub const RUNNER_MIN_CROSSING: f32 = 1.2;

/// Catcher cake fall speed for the current score
pub fn cake_fall_speed(score: u32) -> f32 {
    (CAKE_BASE_SPEED + score as f32 * CAKE_SPEED_PER_POINT).min(CAKE_MAX_SPEED)
}

/// Runner obstacle crossing time for the current age
pub fn obstacle_crossing_time(age: u32) -> f32 {
    (RUNNER_BASE_CROSSING - age as f32 * RUNNER_CROSSING_PER_AGE).max(RUNNER_MIN_CROSSING)
}

/// Inbox email lifespan window `(min, max)` in seconds
pub fn email_lifespan_range(score: u32, base: f32) -> (f32, f32) {
    let cut = (score as f32 * INBOX_LIFE_CUT_PER_POINT).min(INBOX_MAX_LIFE_CUT);
    let life = base * (1.0 - cut);
    (life, life + INBOX_LIFE_JITTER)
}

/// Stepped inbox ramp: spawn delay and multi-spawn chance per level
#[derive(Debug, Clone, PartialEq)]
pub struct InboxRamp {
    pub level: u32,
    pub spawn_delay: f32,
    pub multi_chance: f32,
}

impl Default for InboxRamp {
    fn default() -> Self {
        Self {
            level: 0,
            spawn_delay: INBOX_SPAWN_DELAY,
            multi_chance: INBOX_MULTI_CHANCE,
        }
    }
}

impl InboxRamp {
    /// Catch up with the score. Returns true if the level went up, in which
    /// case the spawn timer must be reset to `spawn_delay`.
    ///
    /// Crossing several thresholds at once still applies a single step.
    pub fn update(&mut self, score: u32) -> bool {
        let target = score / INBOX_POINTS_PER_LEVEL;
        if target <= self.level {
            return false;
        }
        self.level = target;
        self.spawn_delay = (self.spawn_delay - INBOX_SPAWN_STEP).max(INBOX_MIN_SPAWN_DELAY);
        self.multi_chance = (self.multi_chance + INBOX_MULTI_STEP).min(INBOX_MAX_MULTI_CHANCE);
        log::debug!(
            "Inbox level {}: delay {:.2}s, multi-spawn {:.2}",
            self.level,
            self.spawn_delay,
            self.multi_chance
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cake_speed_caps() {
        assert_eq!(cake_fall_speed(0), 200.0);
        assert_eq!(cake_fall_speed(10), 250.0);
        assert_eq!(cake_fall_speed(10_000), CAKE_MAX_SPEED);
    }

    #[test]
    fn test_crossing_time_floor() {
        assert!((obstacle_crossing_time(18) - 2.64).abs() < 1e-4);
        assert_eq!(obstacle_crossing_time(200), RUNNER_MIN_CROSSING);
    }

    #[test]
    fn test_lifespan_shrinks_then_holds() {
        let (fresh, fresh_max) = email_lifespan_range(0, 2.6);
        assert!((fresh - 2.6).abs() < 1e-4);
        assert!((fresh_max - 3.2).abs() < 1e-4);

        let (late, _) = email_lifespan_range(40, 2.6);
        let (later, _) = email_lifespan_range(300, 2.6);
        assert!((late - 2.6 * 0.4).abs() < 1e-4);
        assert_eq!(late, later);
    }

    #[test]
    fn test_inbox_ramp_steps() {
        let mut ramp = InboxRamp::default();
        assert!(!ramp.update(5));
        assert!(ramp.update(6));
        assert_eq!(ramp.level, 1);
        assert!((ramp.spawn_delay - 0.98).abs() < 1e-4);
        assert!((ramp.multi_chance - 0.13).abs() < 1e-4);
        assert!(!ramp.update(7));
    }

    #[test]
    fn test_inbox_ramp_clamps() {
        let mut ramp = InboxRamp::default();
        for score in (0..2000).step_by(6) {
            ramp.update(score);
        }
        assert_eq!(ramp.spawn_delay, INBOX_MIN_SPAWN_DELAY);
        assert_eq!(ramp.multi_chance, INBOX_MAX_MULTI_CHANCE);
    }

    proptest! {
        #[test]
        fn cake_speed_monotone(a in 0u32..5000, b in 0u32..5000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(cake_fall_speed(lo) <= cake_fall_speed(hi));
            prop_assert!(cake_fall_speed(hi) <= CAKE_MAX_SPEED);
        }

        #[test]
        fn crossing_time_monotone(a in 0u32..500, b in 0u32..500) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(obstacle_crossing_time(hi) <= obstacle_crossing_time(lo));
            prop_assert!(obstacle_crossing_time(hi) >= RUNNER_MIN_CROSSING);
        }

        #[test]
        fn lifespan_monotone(a in 0u32..500, b in 0u32..500, priority in any::<bool>()) {
            let base = if priority { 1.4 } else { 2.6 };
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(email_lifespan_range(hi, base).0 <= email_lifespan_range(lo, base).0);
            prop_assert!(email_lifespan_range(hi, base).0 >= base * (1.0 - INBOX_MAX_LIFE_CUT) - 1e-4);
        }

        #[test]
        fn inbox_ramp_never_regresses(scores in proptest::collection::vec(0u32..400, 1..60)) {
            let mut sorted = scores.clone();
            sorted.sort_unstable();
            let mut ramp = InboxRamp::default();
            for score in sorted {
                let before = ramp.clone();
                ramp.update(score);
                prop_assert!(ramp.level >= before.level);
                prop_assert!(ramp.spawn_delay <= before.spawn_delay);
                prop_assert!(ramp.multi_chance >= before.multi_chance);
                prop_assert!(ramp.spawn_delay >= INBOX_MIN_SPAWN_DELAY);
                prop_assert!(ramp.multi_chance <= INBOX_MAX_MULTI_CHANCE);
            }
        }
    }
}
