//! Survival countdown.
//!
//! The run lasts a fixed amount of scaled time. When the countdown reaches
//! zero the boss encounter begins; the timer then stays at zero for the rest
//! of the run.

#[derive(Debug, Clone)]
pub struct RunTimer {
    duration: f32,
    remaining: f32,
    expired: bool,
}

impl RunTimer {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            remaining: duration,
            expired: false,
        }
    }

    /// Count down by `dt`. True only on the tick the countdown runs out.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.expired {
            return false;
        }
        self.remaining -= dt;
        if self.remaining > 0.0 {
            return false;
        }
        self.remaining = 0.0;
        self.expired = true;
        true
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn reset(&mut self) {
        self.remaining = self.duration;
        self.expired = false;
    }
}
