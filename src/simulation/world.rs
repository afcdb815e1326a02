//! Main simulation that ties everything together
//!
//! This is the entry point for running a crash prevention scenario
//! without any Bevy dependencies.

use anyhow::{Context, Result};
use log::info;

use super::braking::BrakingRule;
use super::clock::TimeSource;
use super::config::SimConfig;
use super::input::{InputEvent, LoopControl};
use super::run_state::RunState;
use super::scenario::Scenario;
use super::stats::RunStats;
use super::types::Rect;
use super::vehicle::Vehicle;

/// The vehicles, their braking rule and the run state of one simulation
#[derive(Debug, Clone)]
pub struct Simulation {
    pub config: SimConfig,
    vehicles: Vec<Vehicle>,
    rule: BrakingRule,
    state: RunState,
    stats: RunStats,
}

impl Simulation {
    /// Create a simulation from explicit vehicles and rule
    pub fn new(config: SimConfig, vehicles: Vec<Vehicle>, rule: BrakingRule) -> Result<Self> {
        config.validate().context("invalid simulation config")?;
        rule.check_fits(&vehicles).context("braking rule does not match the vehicles")?;
        Ok(Self {
            config,
            vehicles,
            rule,
            state: RunState::Running,
            stats: RunStats::default(),
        })
    }

    /// Create a scenario with its default configuration
    pub fn from_scenario(scenario: Scenario) -> Result<Self> {
        Self::with_config(scenario, scenario.config())
    }

    /// Create a scenario with a custom configuration
    pub fn with_config(scenario: Scenario, config: SimConfig) -> Result<Self> {
        let vehicles = scenario.vehicles(&config);
        let rule = scenario
            .braking_rule(&vehicles)
            .with_context(|| format!("failed to build braking rule for {:?}", scenario))?;
        Self::new(config, vehicles, rule)
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn rule(&self) -> &BrakingRule {
        &self.rule
    }

    /// Latest collision-time estimate, if the braking rule computes one
    pub fn collision_time(&self) -> Option<f32> {
        self.rule.collision_time()
    }

    pub fn restart_button(&self) -> Rect {
        self.config.restart_button()
    }

    /// Smallest pixel distance between any two vehicles right now
    pub fn min_separation(&self) -> Option<f32> {
        let mut min: Option<f32> = None;
        for (i, a) in self.vehicles.iter().enumerate() {
            for b in &self.vehicles[i + 1..] {
                let d = a.distance_to(b);
                min = Some(min.map_or(d, |m| m.min(d)));
            }
        }
        min
    }

    /// Run one frame: take the elapsed time, drain input, then advance.
    pub fn frame<I>(&mut self, clock: &mut dyn TimeSource, events: I) -> LoopControl
    where
        I: IntoIterator<Item = InputEvent>,
    {
        let delta_secs = clock.next_delta();

        let mut control = LoopControl::Continue;
        for event in events {
            match self.handle_event(event) {
                LoopControl::Exit => return LoopControl::Exit,
                LoopControl::Restarted => control = LoopControl::Restarted,
                LoopControl::Continue => {}
            }
        }

        self.step(delta_secs);
        control
    }

    /// React to a single input event
    pub fn handle_event(&mut self, event: InputEvent) -> LoopControl {
        match event {
            InputEvent::Quit => LoopControl::Exit,
            InputEvent::Click(point) => {
                if self.state.is_halted() && self.restart_button().contains(point) {
                    self.restart();
                    LoopControl::Restarted
                } else {
                    LoopControl::Continue
                }
            }
        }
    }

    /// Advance the simulation by `delta_secs`. Does nothing once halted.
    pub fn step(&mut self, delta_secs: f32) -> RunState {
        if self.state.is_halted() {
            return self.state;
        }
        let delta_secs = delta_secs.max(0.0);

        let mut halted = self
            .rule
            .before_motion(&mut self.vehicles, delta_secs, &self.config);

        for vehicle in &mut self.vehicles {
            vehicle.advance(delta_secs, self.config.scale_factor);
        }

        if !halted {
            halted = self.rule.after_motion(&self.vehicles);
        }

        let separation = self.min_separation();
        self.stats.record_frame(delta_secs, separation);

        if halted {
            self.halt();
        }
        self.state
    }

    fn halt(&mut self) {
        self.state = RunState::Halted;
        self.stats.halted_at = Some(self.stats.elapsed_time);
        self.stats.log_report();
    }

    /// Put every vehicle back where it started and resume running
    pub fn restart(&mut self) {
        for vehicle in &mut self.vehicles {
            vehicle.reset();
        }
        self.rule.reset();
        self.stats.restart();
        self.state = RunState::Running;
        info!("Simulation restarted (restart #{})", self.stats.restarts);
    }

    /// Print a summary of the simulation state
    pub fn print_summary(&self) {
        println!("=== Crash Prevention Summary ===");
        println!(
            "Time: {:.2}s, Frames: {}, State: {:?}",
            self.stats.elapsed_time, self.stats.frames, self.state
        );
        for vehicle in &self.vehicles {
            println!(
                "  {}: {:.1} m/s, position=({:.1}, {:.1}), braking={}",
                vehicle.label,
                vehicle.speed,
                vehicle.position.x,
                vehicle.position.y,
                vehicle.decelerating
            );
        }
        match self.collision_time() {
            Some(t) if t.is_finite() => println!("  Collision in: {:.2}s", t),
            Some(_) => println!("  Collision in: never"),
            None => {}
        }
    }
}
