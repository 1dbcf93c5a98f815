//! Tick timing.
//!
//! Turns wall-clock time into whole simulation ticks for realtime runs and
//! paces the loop to the target rate.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use motes_kernel::Delta;

/// Most ticks a single frame may catch up on.
const MAX_CATCH_UP: u32 = 10;

/// Fixed-step tick clock.
#[derive(Debug)]
pub struct FrameTiming {
    /// Time budget per tick
    tick_budget: Duration,
    /// Start of the current frame
    last_frame: Instant,
    /// Unconsumed time, in seconds
    accumulator: f32,
    /// Fixed tick length, in seconds
    fixed_dt: f32,
    /// Longest frame counted, to stop a stall from snowballing
    max_dt: f32,
    /// Recent frame times for averaging
    frame_times: VecDeque<f32>,
    /// Maximum samples for averaging
    max_samples: usize,
}

impl FrameTiming {
    /// Create a clock ticking `target_fps` times per second.
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let target_fps = target_fps.max(1);
        Self {
            tick_budget: Duration::from_secs_f64(1.0 / f64::from(target_fps)),
            last_frame: Instant::now(),
            accumulator: 0.0,
            fixed_dt: 1.0 / target_fps as f32,
            max_dt: 0.25,
            frame_times: VecDeque::with_capacity(120),
            max_samples: 120,
        }
    }

    /// The delta handed to every fixed tick.
    #[must_use]
    pub fn fixed_delta(&self) -> Delta {
        Delta::from_elapsed_ms(self.fixed_dt * 1000.0)
    }

    /// Seconds since the previous call, clamped to `max_dt`.
    pub fn delta_time(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(self.max_dt);
        self.last_frame = now;

        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.max_samples {
            self.frame_times.pop_front();
        }

        dt
    }

    /// Adds `dt` seconds and returns how many fixed ticks are due.
    pub fn accumulate(&mut self, dt: f32) -> u32 {
        self.accumulator += dt;
        let mut count = 0;

        while self.accumulator >= self.fixed_dt && count < MAX_CATCH_UP {
            self.accumulator -= self.fixed_dt;
            count += 1;
        }

        // Still behind after catching up: drop the backlog
        if self.accumulator > self.fixed_dt * 2.0 {
            self.accumulator = 0.0;
        }

        count
    }

    /// Sleeps out whatever is left of the current tick budget.
    pub fn sleep_remainder(&self) {
        let elapsed = self.last_frame.elapsed();
        if elapsed < self.tick_budget {
            std::thread::sleep(self.tick_budget - elapsed);
        }
    }

    /// Frames per second averaged over recent frames.
    #[must_use]
    pub fn current_fps(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }

        let avg = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        if avg > 0.0 {
            1.0 / avg
        } else {
            0.0
        }
    }

    /// Forget accumulated time, e.g. after setup work.
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
        self.accumulator = 0.0;
        self.frame_times.clear();
    }
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_delta_matches_rate() {
        let timing = FrameTiming::new(60);
        let delta = timing.fixed_delta();
        assert!((delta.factor - 1.0).abs() < 1e-4);

        let slow = FrameTiming::new(30);
        assert!((slow.fixed_delta().factor - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_frame_timing_max_dt() {
        let mut timing = FrameTiming::new(60);
        std::thread::sleep(Duration::from_millis(300));
        let dt = timing.delta_time();
        assert!(dt <= timing.max_dt);
    }

    #[test]
    fn test_accumulate_counts_whole_ticks() {
        let mut timing = FrameTiming::new(60);
        let updates = timing.accumulate(0.040);
        assert_eq!(updates, 2);
        assert!(timing.accumulator < timing.fixed_dt);
    }

    #[test]
    fn test_accumulate_spiral_prevention() {
        let mut timing = FrameTiming::new(60);
        let updates = timing.accumulate(1.0);
        assert_eq!(updates, MAX_CATCH_UP);
        assert_eq!(timing.accumulator, 0.0);
    }

    #[test]
    fn test_reset_timing() {
        let mut timing = FrameTiming::new(60);
        timing.accumulator = 0.5;
        timing.frame_times.push_back(0.016);

        timing.reset();

        assert_eq!(timing.accumulator, 0.0);
        assert!(timing.frame_times.is_empty());
        assert_eq!(timing.current_fps(), 0.0);
    }
}
