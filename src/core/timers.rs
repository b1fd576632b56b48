//! Core domain: tick-driven countdowns for timed effects.
//!
//! A countdown starts immediately, is decremented once per tick by its owner,
//! and reports its expiry exactly once. The owner runs the matching cleanup
//! (restore gravity, re-enable collisions, restore a charge) when `tick` or
//! `cancel` returns `true`.

/// Remaining time of a scoped effect, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Countdown {
    remaining: Option<f32>,
}

impl Countdown {
    /// Starts (or restarts) the countdown.
    pub fn start(&mut self, duration: f32) {
        self.remaining = Some(duration.max(0.0));
    }

    pub fn is_active(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> f32 {
        self.remaining.unwrap_or(0.0)
    }

    /// Advances by one tick. Returns `true` on the tick the countdown expires
    /// and never again until restarted.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.remaining.as_mut() else {
            return false;
        };

        *remaining -= dt;
        if *remaining <= 0.0 {
            self.remaining = None;
            return true;
        }
        false
    }

    /// Stops the countdown early. Returns `true` if it was running, in which
    /// case the caller owes the cleanup.
    pub fn cancel(&mut self) -> bool {
        self.remaining.take().is_some()
    }
}
