//! Systems for spawning visual entities from simulation state

use bevy::prelude::*;

use super::components::{
    color, color_with_alpha, to_world, CollisionReadout, RestartButton, SimulationResource,
    SpeedReadout, VehicleLink, BUTTON_COLOR, RADIUS_ALPHA, TEXT_COLOR, WINDSHIELD_COLOR,
};
use crate::simulation::{
    Axis, BrakingRule, Simulation, Vehicle, WindowSize, VEHICLE_LENGTH, VEHICLE_WIDTH,
};

const VEHICLE_Z: f32 = 2.0;
const BUTTON_Z: f32 = 5.0;

const HUD_FONT_SIZE: f32 = 26.0;
const HUD_LINE_HEIGHT: f32 = 40.0;
const HUD_MARGIN: f32 = 10.0;
const HUD_SHADOW_OFFSET: f32 = 2.0;

/// Body size of a vehicle, long side along its axis
fn body_size(axis: Axis) -> Vec2 {
    match axis {
        Axis::Horizontal => Vec2::new(VEHICLE_LENGTH, VEHICLE_WIDTH),
        Axis::Vertical => Vec2::new(VEHICLE_WIDTH, VEHICLE_LENGTH),
    }
}

/// System to create vehicle visuals, their detection radii and the HUD
pub fn spawn_initial_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    sim: Res<SimulationResource>,
) {
    let sim = &sim.0;
    let radius_px = sim.config.detection_radius_px();

    for vehicle in sim.vehicles() {
        spawn_vehicle_visual(
            &mut commands,
            &mut meshes,
            &mut materials,
            vehicle,
            sim.config.window_size,
            radius_px,
        );
    }

    for index in 0..sim.vehicles().len() {
        spawn_hud_line(&mut commands, index, SpeedReadout(index));
    }
    if matches!(sim.rule(), BrakingRule::MutualYield(_)) {
        spawn_hud_line(&mut commands, sim.vehicles().len(), CollisionReadout);
    }

    spawn_restart_button(&mut commands, sim);
}

/// Spawn a single vehicle: body, windshield and translucent detection disc
fn spawn_vehicle_visual(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<ColorMaterial>>,
    vehicle: &Vehicle,
    window: WindowSize,
    radius_px: f32,
) {
    let body = body_size(vehicle.axis);
    let windshield = match vehicle.axis {
        Axis::Horizontal => Vec2::new(VEHICLE_LENGTH / 2.0, VEHICLE_WIDTH / 1.5),
        Axis::Vertical => Vec2::new(VEHICLE_WIDTH / 1.5, VEHICLE_LENGTH / 2.0),
    };

    commands
        .spawn((
            VehicleLink(vehicle.id),
            Sprite::from_color(color(vehicle.color), body),
            Transform::from_translation(to_world(vehicle.position, window, VEHICLE_Z)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Sprite::from_color(color(WINDSHIELD_COLOR), windshield),
                Transform::from_xyz(0.0, 0.0, 0.1),
            ));
            parent.spawn((
                Mesh2d(meshes.add(Circle::new(radius_px))),
                MeshMaterial2d(
                    materials.add(ColorMaterial::from(color_with_alpha(
                        vehicle.color,
                        RADIUS_ALPHA,
                    ))),
                ),
                Transform::from_xyz(0.0, 0.0, 0.2),
            ));
        });
}

/// Spawn one HUD line as a black shadow with the readout drawn over it
fn spawn_hud_line<C: Component + Clone>(commands: &mut Commands, line: usize, marker: C) {
    let top = HUD_MARGIN + line as f32 * HUD_LINE_HEIGHT;

    for (offset, text_color, z) in [
        (HUD_SHADOW_OFFSET, Color::BLACK, 0),
        (0.0, color(TEXT_COLOR), 1),
    ] {
        commands.spawn((
            marker.clone(),
            Text::new(""),
            TextFont {
                font_size: HUD_FONT_SIZE,
                ..default()
            },
            TextColor(text_color),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(top + offset),
                left: Val::Px(HUD_MARGIN + offset),
                ..default()
            },
            ZIndex(z),
        ));
    }
}

/// Spawn the restart control, hidden until the run halts
fn spawn_restart_button(commands: &mut Commands, sim: &Simulation) {
    let bounds = sim.restart_button();
    let window = sim.config.window_size;

    commands
        .spawn((
            RestartButton,
            Sprite::from_color(color(BUTTON_COLOR), Vec2::new(bounds.width, bounds.height)),
            Transform::from_translation(to_world(bounds.center(), window, BUTTON_Z)),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text2d::new("Restart"),
                TextFont {
                    font_size: HUD_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::BLACK),
                Transform::from_xyz(0.0, 0.0, 0.1),
            ));
        });
}
