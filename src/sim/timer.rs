//! Fixed-period countdown scheduler
//!
//! Runs alongside the frame loop on the same thread. The frame loop feeds it
//! elapsed time and it reports how many periods completed, so the session can
//! run its once-per-second callback that many times.

use serde::{Deserialize, Serialize};

/// Float slack so accumulated frame times land on whole periods
const PERIOD_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    period: f64,
    elapsed: f64,
    active: bool,
}

impl Countdown {
    pub fn new(period_secs: f32) -> Self {
        Self {
            period: period_secs as f64,
            elapsed: 0.0,
            active: true,
        }
    }

    /// Advance by `dt` seconds; returns the number of periods that fired
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.active || self.period <= 0.0 {
            return 0;
        }
        self.elapsed += dt as f64;
        let mut fired = 0;
        while self.elapsed + PERIOD_EPSILON >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }

    /// Stop firing; calling again is a no-op
    pub fn cancel(&mut self) {
        self.active = false;
        self.elapsed = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
