//! Simulation run loop.
//!
//! Builds a container from the configuration, spawns the initial
//! population and ticks it until the frame budget is spent or every
//! particle is gone.

use anyhow::{Context, Result};
use std::time::Instant;
use tracing::{debug, info};

use motes_common::{FastRandom, RandomSource};
use motes_kernel::{Container, Delta};

use crate::config::EngineConfig;
use crate::stats::{RunStats, RunSummary};
use crate::timing::FrameTiming;

/// Builds the container described by `config`.
pub fn build_container(config: &EngineConfig) -> Result<Container> {
    let options = config
        .particle_options()
        .context("Failed to load particle options")?;
    let rng: Box<dyn RandomSource> = match config.seed {
        Some(seed) => {
            info!("Using seed {seed}");
            Box::new(FastRandom::seeded(seed))
        },
        None => Box::new(FastRandom::from_entropy()),
    };

    let mut container = Container::new(
        config.canvas(),
        options,
        config.particle_limit as usize,
        rng,
    )?;
    container.spawn_many(config.particle_count as usize);
    Ok(container)
}

/// Runs the simulation and returns the final summary.
pub fn run(config: &EngineConfig) -> Result<RunSummary> {
    let mut container = build_container(config)?;
    let mut stats = RunStats::default();
    let mut timing = FrameTiming::new(config.target_fps);
    let fixed = timing.fixed_delta();

    info!(
        "Running {} particles on {}x{} at {} ticks/s ({:.2}ms per tick)",
        container.particles().len(),
        config.canvas_width,
        config.canvas_height,
        config.target_fps,
        config.tick_ms()
    );

    timing.reset();
    while !finished(config, &stats, &container) {
        let due = if config.realtime {
            let dt = timing.delta_time();
            timing.accumulate(dt)
        } else {
            1
        };

        for _ in 0..due {
            tick(&mut container, &mut stats, fixed);
            if config.log_interval > 0 && stats.ticks() % u64::from(config.log_interval) == 0 {
                info!("{}", stats.summary(container.particles().len()));
            }
            if finished(config, &stats, &container) {
                break;
            }
        }

        if config.realtime {
            timing.sleep_remainder();
        }
    }

    if config.realtime {
        debug!("Realtime pacing held {:.1} fps", timing.current_fps());
    }

    let summary = stats.summary(container.particles().len());
    info!("Finished: {summary}");
    Ok(summary)
}

fn tick(container: &mut Container, stats: &mut RunStats, delta: Delta) {
    let start = Instant::now();
    let report = container.update(delta);
    let elapsed = start.elapsed().as_secs_f32();
    stats.record(&report, container.particles().len(), elapsed);
}

fn finished(config: &EngineConfig, stats: &RunStats, container: &Container) -> bool {
    if config.frames > 0 {
        stats.ticks() >= u64::from(config.frames)
    } else {
        container.particles().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motes_common::RangeValue;
    use motes_kernel::{LifeTiming, OutMode, OutModes};

    fn headless(f: impl FnOnce(&mut EngineConfig)) -> EngineConfig {
        let mut config = EngineConfig {
            canvas_width: 200.0,
            canvas_height: 100.0,
            particle_count: 20,
            seed: Some(99),
            frames: 120,
            log_interval: 0,
            ..EngineConfig::default()
        };
        f(&mut config);
        config
    }

    #[test]
    fn test_run_stops_at_frame_budget() {
        let summary = run(&headless(|_| {})).expect("run");
        assert_eq!(summary.ticks, 120);
        // Default edges wrap, so nobody leaves
        assert_eq!(summary.alive, 20);
        assert_eq!(summary.destroyed, 0);
    }

    #[test]
    fn test_run_until_empty() {
        let config = headless(|c| {
            c.frames = 0;
            c.particles.movement.out_modes = OutModes::all(OutMode::Destroy);
            c.particles.movement.speed = RangeValue::Fixed(20.0);
        });
        let summary = run(&config).expect("run");
        assert_eq!(summary.alive, 0);
        assert_eq!(summary.destroyed, 20);
        assert_eq!(summary.removed, 20);
        assert_eq!(summary.removed_silently, 20);
    }

    #[test]
    fn test_finite_lives_drain_population() {
        let config = headless(|c| {
            c.frames = 0;
            c.particles.life.count = 2;
            c.particles.life.duration = LifeTiming {
                value: RangeValue::Fixed(0.1),
                sync: true,
            };
        });
        let summary = run(&config).expect("run");
        assert_eq!(summary.alive, 0);
        assert_eq!(summary.removed, 0);
        assert_eq!(summary.destroyed, 20);
    }

    #[test]
    fn test_seeded_runs_agree() {
        let config = headless(|c| c.particles.movement.out_modes = OutModes::all(OutMode::Bounce));
        let a = build_container(&config).expect("container");
        let b = build_container(&config).expect("container");
        let pa: Vec<_> = a.particles().iter().map(|p| p.position).collect();
        let pb: Vec<_> = b.particles().iter().map(|p| p.position).collect();
        assert_eq!(pa, pb);
    }
}
