//! World setup systems for the camera and static scenery

use bevy::prelude::*;

use super::components::{
    color, to_world, MainCamera, Scenery, ScenarioResource, SimulationResource, LINE_COLOR,
    ROAD_COLOR,
};
use crate::simulation::{Axis, Rect, Rgb, WindowSize};

const DASH_LENGTH: f32 = 30.0;
const DASH_GAP: f32 = 30.0;
const DASH_THICKNESS: f32 = 4.0;
const EDGE_LINE_THICKNESS: f32 = 3.0;

const ROAD_Z: f32 = 0.0;
const MARKING_Z: f32 = 0.5;

/// System to setup the camera and draw roads with their markings
pub fn setup_world(
    mut commands: Commands,
    sim: Res<SimulationResource>,
    scenario: Res<ScenarioResource>,
) {
    commands.spawn((MainCamera, Camera2d));

    let config = &sim.0.config;
    let window = config.window_size;
    let center = window.center();
    let lane = config.lane_width;

    // Road surfaces first so every marking sits on top of both
    for axis in scenario.0.roads() {
        let surface = match axis {
            Axis::Horizontal => Rect::new(0.0, center.y - lane / 2.0, window.width, lane),
            Axis::Vertical => Rect::new(center.x - lane / 2.0, 0.0, lane, window.height),
        };
        spawn_rect(&mut commands, window, surface, ROAD_COLOR, ROAD_Z);
    }

    for axis in scenario.0.roads() {
        let mut markings = Vec::new();
        match axis {
            Axis::Horizontal => {
                let mut x = 0.0;
                while x < window.width {
                    markings.push(Rect::new(
                        x,
                        center.y - DASH_THICKNESS / 2.0,
                        DASH_LENGTH,
                        DASH_THICKNESS,
                    ));
                    x += DASH_LENGTH + DASH_GAP;
                }
                for edge in [center.y - lane / 2.0, center.y + lane / 2.0] {
                    markings.push(Rect::new(
                        0.0,
                        edge - EDGE_LINE_THICKNESS / 2.0,
                        window.width,
                        EDGE_LINE_THICKNESS,
                    ));
                }
            }
            Axis::Vertical => {
                let mut y = 0.0;
                while y < window.height {
                    markings.push(Rect::new(
                        center.x - DASH_THICKNESS / 2.0,
                        y,
                        DASH_THICKNESS,
                        DASH_LENGTH,
                    ));
                    y += DASH_LENGTH + DASH_GAP;
                }
                for edge in [center.x - lane / 2.0, center.x + lane / 2.0] {
                    markings.push(Rect::new(
                        edge - EDGE_LINE_THICKNESS / 2.0,
                        0.0,
                        EDGE_LINE_THICKNESS,
                        window.height,
                    ));
                }
            }
        }

        for marking in markings {
            spawn_rect(&mut commands, window, marking, LINE_COLOR, MARKING_Z);
        }
    }
}

/// Spawn a flat colored rectangle given in window coordinates
fn spawn_rect(commands: &mut Commands, window: WindowSize, rect: Rect, rgb: Rgb, z: f32) {
    commands.spawn((
        Scenery,
        Sprite::from_color(color(rgb), Vec2::new(rect.width, rect.height)),
        Transform::from_translation(to_world(rect.center(), window, z)),
    ));
}
