//! Frame clock for the demo loop.

use std::time::{Duration, Instant};

/// Measures total elapsed time and per-frame deltas.
#[derive(Debug)]
pub struct Timer {
    start: Instant,
    last_tick: Instant,
}

impl Timer {
    /// Create a new timer, starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
        }
    }

    /// Total elapsed time since creation.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Total elapsed seconds since creation.
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed().as_secs_f32()
    }

    /// Time since the previous `tick()`; the frame's delta time.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let delta = now - self.last_tick;
        self.last_tick = now;
        delta
    }

    /// Delta seconds since the previous tick.
    pub fn delta_secs(&mut self) -> f32 {
        self.tick().as_secs_f32()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_resets_the_delta_window() {
        let mut timer = Timer::new();
        std::thread::sleep(Duration::from_millis(5));
        let first = timer.tick();
        assert!(first >= Duration::from_millis(5));
        // The next delta only covers time since the tick, so total elapsed
        // always runs ahead of it by at least the first window.
        let second = timer.delta_secs();
        assert!(timer.elapsed_secs() >= second + first.as_secs_f32());
    }

    #[test]
    fn elapsed_keeps_counting_across_ticks() {
        let mut timer = Timer::new();
        let _ = timer.tick();
        let _ = timer.tick();
        assert!(timer.elapsed_secs() >= 0.0);
        assert!(timer.elapsed() >= Duration::ZERO);
    }
}
