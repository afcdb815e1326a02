//! Crash Prevention Simulation Library
//!
//! Proximity-braking simulations of toy vehicles that can run headless or
//! with a Bevy UI.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
