//! Time sources driving the update loop
//!
//! The simulation integrates over real elapsed time, so trajectories depend on
//! how long each frame actually took. Tests and the headless runner swap the
//! wall clock for a fixed or seeded-jittered step.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

/// Supplies the elapsed time, in seconds, for each new frame
pub trait TimeSource {
    fn next_delta(&mut self) -> f32;
}

/// Elapsed wall-clock time since the previous call
#[derive(Debug, Clone)]
pub struct WallClock {
    last: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for WallClock {
    fn next_delta(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        delta
    }
}

/// The same delta every frame
#[derive(Debug, Clone, Copy)]
pub struct FixedStep {
    pub delta_secs: f32,
}

impl FixedStep {
    pub fn new(delta_secs: f32) -> Self {
        Self {
            delta_secs: delta_secs.max(0.0),
        }
    }
}

impl TimeSource for FixedStep {
    fn next_delta(&mut self) -> f32 {
        self.delta_secs
    }
}

/// A base delta perturbed by up to `±jitter_secs`, reproducible from a seed.
/// Never yields a negative delta.
#[derive(Debug, Clone)]
pub struct JitteredStep {
    base_secs: f32,
    jitter_secs: f32,
    rng: StdRng,
}

impl JitteredStep {
    pub fn new(base_secs: f32, jitter_secs: f32, seed: u64) -> Self {
        Self {
            base_secs: base_secs.max(0.0),
            jitter_secs: jitter_secs.abs(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl TimeSource for JitteredStep {
    fn next_delta(&mut self) -> f32 {
        if self.jitter_secs == 0.0 {
            return self.base_secs;
        }
        let offset = self.rng.random_range(-self.jitter_secs..=self.jitter_secs);
        (self.base_secs + offset).max(0.0)
    }
}

/// Sleeps out whatever is left of the current frame so the loop runs no
/// faster than the target frame rate
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    frame: Duration,
    last: Instant,
}

impl FrameLimiter {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            frame: Duration::from_secs_f64(1.0 / frame_rate.max(1) as f64),
            last: Instant::now(),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Block until one frame has passed since the previous call
    pub fn wait(&mut self) {
        let elapsed = self.last.elapsed();
        if let Some(remaining) = self.frame.checked_sub(elapsed) {
            std::thread::sleep(remaining);
        }
        self.last = Instant::now();
    }
}
