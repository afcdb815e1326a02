//! Core types for the crash prevention simulation
//!
//! These are standalone types that don't depend on Bevy.

use std::fmt;

/// A unique identifier for a vehicle
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub usize);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The axis a vehicle travels along. Fixed when the vehicle is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Travels towards increasing x
    Horizontal,
    /// Travels towards increasing y (screen coordinates, y grows downwards)
    Vertical,
}

/// A 2D position in window pixels, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Coordinate along the given axis
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Move this position by `amount` along the given axis
    pub fn shift(&mut self, axis: Axis, amount: f32) {
        match axis {
            Axis::Horizontal => self.x += amount,
            Axis::Vertical => self.y += amount,
        }
    }
}

/// An sRGB color, one byte per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const CORAL_RED: Rgb = Rgb(239, 68, 68);
    pub const ELECTRIC_BLUE: Rgb = Rgb(59, 130, 246);
    pub const GOLDEN_YELLOW: Rgb = Rgb(255, 215, 0);
}

/// Axis-aligned rectangle in window pixels (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open containment test: the left/top edges are inside, the
    /// right/bottom edges are not
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Length of a vehicle body in pixels (along its axis)
pub const VEHICLE_LENGTH: f32 = 60.0;

/// Width of a vehicle body in pixels (across its axis)
pub const VEHICLE_WIDTH: f32 = 40.0;
