//! Run statistics.
//!
//! Folds every tick report into running totals and keeps a short history
//! of update times for the periodic progress line.

use std::collections::VecDeque;
use std::fmt;

use motes_kernel::TickReport;

/// Running totals over a simulation run.
#[derive(Debug)]
pub struct RunStats {
    /// Ticks recorded
    ticks: u64,
    /// Particles taken off the canvas by edge policies
    removed: u64,
    /// Of those, removals that skip visual effects
    removed_silently: u64,
    /// Particles dropped for any reason
    destroyed: u64,
    /// Largest population seen
    peak_particles: usize,
    /// Recent update times in seconds
    update_times: VecDeque<f32>,
    /// History size for averaging
    history_size: usize,
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new(120)
    }
}

impl RunStats {
    /// Create a collector averaging over `history_size` ticks.
    #[must_use]
    pub fn new(history_size: usize) -> Self {
        Self {
            ticks: 0,
            removed: 0,
            removed_silently: 0,
            destroyed: 0,
            peak_particles: 0,
            update_times: VecDeque::with_capacity(history_size),
            history_size: history_size.max(1),
        }
    }

    /// Record one tick.
    ///
    /// # Arguments
    /// * `report` - What the container reported for the tick
    /// * `alive` - Particles left after the tick
    /// * `update_time` - Wall time the tick took, in seconds
    pub fn record(&mut self, report: &TickReport, alive: usize, update_time: f32) {
        self.ticks += 1;
        self.removed += report.removed.len() as u64;
        self.removed_silently += report.removed.iter().filter(|r| r.skip_effects).count() as u64;
        self.destroyed += report.destroyed as u64;
        self.peak_particles = self.peak_particles.max(alive).max(report.updated);

        self.update_times.push_back(update_time);
        if self.update_times.len() > self.history_size {
            self.update_times.pop_front();
        }
    }

    /// Ticks recorded so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Average update time in milliseconds.
    #[must_use]
    pub fn avg_update_ms(&self) -> f32 {
        if self.update_times.is_empty() {
            return 0.0;
        }
        self.update_times.iter().sum::<f32>() / self.update_times.len() as f32 * 1000.0
    }

    /// Snapshot for logging.
    #[must_use]
    pub fn summary(&self, alive: usize) -> RunSummary {
        RunSummary {
            ticks: self.ticks,
            alive,
            peak_particles: self.peak_particles,
            removed: self.removed,
            removed_silently: self.removed_silently,
            destroyed: self.destroyed,
            update_ms: self.avg_update_ms(),
        }
    }
}

/// Point-in-time view of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunSummary {
    /// Ticks run
    pub ticks: u64,
    /// Particles alive now
    pub alive: usize,
    /// Largest population seen
    pub peak_particles: usize,
    /// Edge-policy removals
    pub removed: u64,
    /// Edge-policy removals without effects
    pub removed_silently: u64,
    /// Particles dropped for any reason
    pub destroyed: u64,
    /// Average update time in milliseconds
    pub update_ms: f32,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tick {}: {} alive (peak {}), {} destroyed, {} removed at edges ({} silent), update {:.3}ms",
            self.ticks,
            self.alive,
            self.peak_particles,
            self.destroyed,
            self.removed,
            self.removed_silently,
            self.update_ms
        )
    }
}
