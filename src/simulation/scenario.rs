//! Scenario presets
//!
//! A scenario decides the starting vehicles, the braking rule, and which
//! roads the front end draws.

use anyhow::{ensure, Result};
use clap::ValueEnum;

use super::braking::{BrakingRule, ChainCascade, MutualYield};
use super::config::SimConfig;
use super::types::{Axis, Position, Rgb, VehicleId};
use super::vehicle::Vehicle;

/// Which layout to simulate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Scenario {
    /// Two vehicles approaching a crossroads at right angles
    #[default]
    Intersection,
    /// Three vehicles following one another down a straight road
    Convoy,
}

/// Speeds of the convoy vehicles from the back of the queue to the front
pub const CONVOY_SPEEDS: [f32; 3] = [80.0, 80.0, 70.0];

/// Gap between neighbouring convoy vehicles in simulation units
pub const CONVOY_SPACING: f32 = 500.0;

impl Scenario {
    /// Default configuration for the scenario
    pub fn config(self) -> SimConfig {
        match self {
            Scenario::Intersection => SimConfig::intersection(),
            Scenario::Convoy => SimConfig::convoy(),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Scenario::Intersection => "Intersection Collision Avoidance Simulation",
            Scenario::Convoy => "Multi-Vehicle Collision Avoidance Simulation",
        }
    }

    /// Axes of the roads drawn through the window center
    pub fn roads(self) -> &'static [Axis] {
        match self {
            Scenario::Intersection => &[Axis::Horizontal, Axis::Vertical],
            Scenario::Convoy => &[Axis::Horizontal],
        }
    }

    /// Starting vehicles laid out for the given window
    pub fn vehicles(self, config: &SimConfig) -> Vec<Vehicle> {
        let center = config.window_size.center();
        match self {
            Scenario::Intersection => vec![
                Vehicle::new(
                    VehicleId(0),
                    "Car 1",
                    Position::new(0.0, center.y),
                    Axis::Horizontal,
                    50.0,
                    Rgb::CORAL_RED,
                ),
                Vehicle::new(
                    VehicleId(1),
                    "Car 2",
                    Position::new(center.x, 0.0),
                    Axis::Vertical,
                    40.0,
                    Rgb::ELECTRIC_BLUE,
                ),
            ],
            Scenario::Convoy => {
                let colors = [Rgb::CORAL_RED, Rgb::ELECTRIC_BLUE, Rgb::GOLDEN_YELLOW];
                CONVOY_SPEEDS
                    .iter()
                    .zip(colors)
                    .enumerate()
                    .map(|(i, (&speed, color))| {
                        Vehicle::new(
                            VehicleId(i),
                            format!("Car {}", i + 1),
                            Position::new(
                                i as f32 * CONVOY_SPACING * config.scale_factor,
                                center.y,
                            ),
                            Axis::Horizontal,
                            speed,
                            color,
                        )
                    })
                    .collect()
            }
        }
    }

    /// Braking rule used by the scenario
    pub fn braking_rule(self, vehicles: &[Vehicle]) -> Result<BrakingRule> {
        match self {
            Scenario::Intersection => mutual_yield(vehicles),
            Scenario::Convoy => Ok(BrakingRule::ChainCascade(ChainCascade::new(vehicles)?)),
        }
    }
}

/// Build a mutual-yield rule, which needs at least one pair
pub fn mutual_yield(vehicles: &[Vehicle]) -> Result<BrakingRule> {
    ensure!(
        vehicles.len() >= 2,
        "mutual yielding needs at least two vehicles, got {}",
        vehicles.len()
    );
    Ok(BrakingRule::MutualYield(MutualYield::new()))
}
