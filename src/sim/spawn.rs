//! Spawn loop timing: a repeating timer plus a queue of staggered follow-ups

/// Repeating timer driving a scene's spawn loop
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    delay: f32,
    elapsed: f32,
    active: bool,
}

impl SpawnTimer {
    pub fn new(delay: f32) -> Self {
        Self {
            delay: delay.max(f32::EPSILON),
            elapsed: 0.0,
            active: true,
        }
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the timer, returning how many times it fired
    pub fn tick(&mut self, dt: f32) -> u32 {
        if !self.active {
            return 0;
        }
        self.elapsed += dt;
        let mut fires = 0;
        while self.elapsed >= self.delay {
            self.elapsed -= self.delay;
            fires += 1;
        }
        fires
    }

    /// Change the period and restart it from zero
    pub fn reset(&mut self, delay: f32) {
        self.delay = delay.max(f32::EPSILON);
        self.elapsed = 0.0;
    }

    /// Stop for good; a cancelled timer never fires again
    pub fn cancel(&mut self) {
        self.active = false;
        self.elapsed = 0.0;
    }
}

/// Delayed one-shot spawns (multi-spawn stagger)
#[derive(Debug, Clone)]
pub struct Staggered<T> {
    pending: Vec<(f32, T)>,
}

impl<T> Default for Staggered<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<T> Staggered<T> {
    pub fn schedule(&mut self, delay: f32, item: T) {
        self.pending.push((delay, item));
    }

    /// Advance all delays and return the items that came due, in schedule order
    pub fn tick(&mut self, dt: f32) -> Vec<T> {
        let mut due = Vec::new();
        let mut waiting = Vec::with_capacity(self.pending.len());
        for (remaining, item) in self.pending.drain(..) {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                due.push(item);
            } else {
                waiting.push((remaining, item));
            }
        }
        self.pending = waiting;
        due
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
