//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;

use crate::simulation::{Position, Rgb, Scenario, Simulation, VehicleId, WindowSize};

/// Resource wrapper for the simulation
#[derive(Resource)]
pub struct SimulationResource(pub Simulation);

/// Scenario being displayed, used to lay out the scenery
#[derive(Resource, Clone, Copy)]
pub struct ScenarioResource(pub Scenario);

/// Palette shared by the scenery and HUD
pub const GRASS_COLOR: Rgb = Rgb(104, 159, 56);
pub const ROAD_COLOR: Rgb = Rgb(75, 85, 99);
pub const LINE_COLOR: Rgb = Rgb(245, 245, 245);
pub const WINDSHIELD_COLOR: Rgb = Rgb(150, 150, 150);
pub const BUTTON_COLOR: Rgb = Rgb(34, 197, 94);
pub const TEXT_COLOR: Rgb = Rgb(243, 244, 246);

/// Alpha of the translucent detection-radius disc
pub const RADIUS_ALPHA: u8 = 70;

pub fn color(rgb: Rgb) -> Color {
    Color::srgb_u8(rgb.0, rgb.1, rgb.2)
}

pub fn color_with_alpha(rgb: Rgb, alpha: u8) -> Color {
    Color::srgba_u8(rgb.0, rgb.1, rgb.2, alpha)
}

/// Convert a window position (top-left origin, y down) to 2D world
/// coordinates (centered origin, y up) at the given depth
pub fn to_world(position: Position, window: WindowSize, z: f32) -> Vec3 {
    Vec3::new(
        position.x - window.width / 2.0,
        window.height / 2.0 - position.y,
        z,
    )
}

/// Marker for the 2D camera
#[derive(Component)]
pub struct MainCamera;

/// Marker for static road and lane marking sprites
#[derive(Component)]
pub struct Scenery;

/// Links a Bevy entity to a simulation vehicle
#[derive(Component)]
pub struct VehicleLink(pub VehicleId);

/// Live speed readout for the vehicle at this index
#[derive(Component, Clone)]
pub struct SpeedReadout(pub usize);

/// Live collision-time readout
#[derive(Component, Clone)]
pub struct CollisionReadout;

/// The restart control, shown only while the run is halted
#[derive(Component)]
pub struct RestartButton;
