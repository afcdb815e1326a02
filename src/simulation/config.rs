//! Immutable simulation configuration
//!
//! Every tunable constant of a run lives here and is handed to the
//! simulation at construction time.

use anyhow::{ensure, Result};

use super::types::{Position, Rect};

/// Width of the restart control in pixels
pub const RESTART_BUTTON_WIDTH: f32 = 120.0;

/// Height of the restart control in pixels
pub const RESTART_BUTTON_HEIGHT: f32 = 40.0;

/// Distance from the restart control's top edge to the window bottom
pub const RESTART_BUTTON_BOTTOM_OFFSET: f32 = 80.0;

/// Fixed size of the visible surface in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSize {
    pub width: f32,
    pub height: f32,
}

impl WindowSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Configuration shared by every vehicle in a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    pub window_size: WindowSize,
    /// Target frames per second
    pub frame_rate: u32,
    /// Pixels per simulation distance unit
    pub scale_factor: f32,
    /// Detection radius in simulation units (scaled to pixels when compared)
    pub detection_radius: f32,
    /// Speed lost per second while braking
    pub deceleration_rate: f32,
    /// Width of a road in pixels
    pub lane_width: f32,
}

impl SimConfig {
    /// Settings for the two-vehicle intersection scenario
    pub fn intersection() -> Self {
        Self {
            window_size: WindowSize::new(1200.0, 900.0),
            frame_rate: 100,
            scale_factor: 0.8,
            detection_radius: 150.0,
            deceleration_rate: 8.0,
            lane_width: 150.0,
        }
    }

    /// Settings for the three-vehicle convoy scenario
    pub fn convoy() -> Self {
        Self {
            window_size: WindowSize::new(1500.0, 900.0),
            detection_radius: 200.0,
            ..Self::intersection()
        }
    }

    /// Pixel distance below which two vehicles' detection radii overlap
    pub fn detection_threshold(&self) -> f32 {
        self.detection_radius * 2.0 * self.scale_factor
    }

    /// Detection radius converted to pixels
    pub fn detection_radius_px(&self) -> f32 {
        self.detection_radius * self.scale_factor
    }

    /// Nominal duration of one frame in seconds
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.frame_rate as f32
    }

    /// Bounds of the restart control, centered horizontally near the bottom
    pub fn restart_button(&self) -> Rect {
        Rect::new(
            self.window_size.width / 2.0 - RESTART_BUTTON_WIDTH / 2.0,
            self.window_size.height - RESTART_BUTTON_BOTTOM_OFFSET,
            RESTART_BUTTON_WIDTH,
            RESTART_BUTTON_HEIGHT,
        )
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.window_size.width > 0.0 && self.window_size.height > 0.0,
            "window size must be positive, got {}x{}",
            self.window_size.width,
            self.window_size.height
        );
        ensure!(self.frame_rate > 0, "frame rate must be positive");
        ensure!(
            self.scale_factor > 0.0,
            "scale factor must be positive, got {}",
            self.scale_factor
        );
        ensure!(
            self.detection_radius > 0.0,
            "detection radius must be positive, got {}",
            self.detection_radius
        );
        ensure!(
            self.deceleration_rate >= 0.0,
            "deceleration rate must not be negative, got {}",
            self.deceleration_rate
        );
        ensure!(
            self.lane_width > 0.0,
            "lane width must be positive, got {}",
            self.lane_width
        );
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::intersection()
    }
}
