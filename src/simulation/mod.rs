//! Standalone crash prevention simulation module
//!
//! This module contains all the kinematics and braking logic and can run
//! independently of the Bevy game engine. It can be tested via console
//! without needing to boot up the full window.

mod braking;
mod clock;
mod config;
mod input;
mod run_state;
mod scenario;
mod stats;
mod types;
mod vehicle;
mod world;

pub use braking::{collision_time, BrakingRule, ChainCascade, MutualYield};
pub use clock::{FixedStep, FrameLimiter, JitteredStep, TimeSource, WallClock};
pub use config::{
    SimConfig, WindowSize, RESTART_BUTTON_BOTTOM_OFFSET, RESTART_BUTTON_HEIGHT,
    RESTART_BUTTON_WIDTH,
};
pub use input::{InputEvent, LoopControl};
pub use run_state::RunState;
pub use scenario::{mutual_yield, Scenario, CONVOY_SPACING, CONVOY_SPEEDS};
pub use stats::RunStats;
pub use types::{Axis, Position, Rect, Rgb, VehicleId, VEHICLE_LENGTH, VEHICLE_WIDTH};
pub use vehicle::Vehicle;
pub use world::Simulation;
