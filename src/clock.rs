//! Frame clock: elapsed time between redraws.
//!
//! Variable-timestep and render-synchronized; the delta is read once per
//! redraw callback, never from an independent timer.

use std::time::Instant;

use crate::constants::MAX_FRAME_DT;

pub struct FrameClock {
    last_tick: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_tick: None }
    }

    /// Seconds elapsed since the previous call, clamped to `[0, MAX_FRAME_DT]`.
    ///
    /// The first call returns 0. Takes the current instant as an argument so
    /// tests can feed a synthetic timeline.
    pub fn delta(&mut self, now: Instant) -> f32 {
        let dt = match self.last_tick {
            Some(prev) => now.saturating_duration_since(prev).as_secs_f32(),
            None => 0.0,
        };
        self.last_tick = Some(now);
        dt.min(MAX_FRAME_DT)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
