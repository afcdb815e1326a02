//! Vehicle movement logic for the crash prevention simulation
//!
//! Standalone implementation that doesn't depend on Bevy.

use super::types::{Axis, Position, Rgb, VehicleId};

/// A vehicle moving along a single fixed axis
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: VehicleId,
    /// Display name used by readouts and logs
    pub label: String,
    pub position: Position,
    /// Speed in simulation units per second, never negative
    pub speed: f32,
    pub axis: Axis,
    pub color: Rgb,
    /// Set once the vehicle has started braking; cleared only by `reset`
    pub decelerating: bool,
    /// Speed lost per second while `decelerating` is set
    pub deceleration: f32,
    initial_position: Position,
    initial_speed: f32,
}

impl Vehicle {
    pub fn new(
        id: VehicleId,
        label: impl Into<String>,
        position: Position,
        axis: Axis,
        speed: f32,
        color: Rgb,
    ) -> Self {
        let speed = speed.max(0.0);
        Self {
            id,
            label: label.into(),
            position,
            speed,
            axis,
            color,
            decelerating: false,
            deceleration: 0.0,
            initial_position: position,
            initial_speed: speed,
        }
    }

    /// Advance along the vehicle's axis by `speed * delta_secs * scale_factor` pixels
    pub fn advance(&mut self, delta_secs: f32, scale_factor: f32) {
        self.position.shift(self.axis, self.speed * delta_secs * scale_factor);
    }

    /// Remove `rate * delta_secs` from the speed, flooring at zero
    pub fn brake(&mut self, rate: f32, delta_secs: f32) {
        self.speed = (self.speed - rate * delta_secs).max(0.0);
    }

    /// Latch the brakes on. Returns true only on the call that set the latch.
    pub fn engage_brakes(&mut self, rate: f32) -> bool {
        if self.decelerating {
            return false;
        }
        self.decelerating = true;
        self.deceleration = rate;
        true
    }

    /// Apply the latched deceleration, if any
    pub fn apply_latched_brakes(&mut self, delta_secs: f32) {
        if self.decelerating {
            self.brake(self.deceleration, delta_secs);
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.speed == 0.0
    }

    /// Velocity vector (units per second) in window axes
    pub fn velocity(&self) -> (f32, f32) {
        match self.axis {
            Axis::Horizontal => (self.speed, 0.0),
            Axis::Vertical => (0.0, self.speed),
        }
    }

    /// Pixel distance between the two vehicles' centers
    pub fn distance_to(&self, other: &Vehicle) -> f32 {
        self.position.distance(&other.position)
    }

    /// Coordinate along the vehicle's own axis
    pub fn progress(&self) -> f32 {
        self.position.along(self.axis)
    }

    pub fn initial_position(&self) -> Position {
        self.initial_position
    }

    pub fn initial_speed(&self) -> f32 {
        self.initial_speed
    }

    /// Restore the position and speed captured at construction and release the brakes
    pub fn reset(&mut self) {
        self.position = self.initial_position;
        self.speed = self.initial_speed;
        self.decelerating = false;
        self.deceleration = 0.0;
    }
}
