//! Systems for syncing Bevy entities with simulation state
//!
//! Bevy's `Time<Real>` is the time source for the windowed simulation.

use bevy::prelude::*;

use super::components::{
    to_world, CollisionReadout, RestartButton, SimulationResource, SpeedReadout, VehicleLink,
};

/// System to run one simulation step over the real time elapsed since the last frame
pub fn tick_simulation(time: Res<Time<Real>>, mut sim: ResMut<SimulationResource>) {
    sim.0.step(time.delta_secs());
}

/// System to move vehicle visuals to their simulated positions
pub fn sync_vehicles(
    sim: Res<SimulationResource>,
    mut vehicle_query: Query<(&VehicleLink, &mut Transform)>,
) {
    let sim = &sim.0;
    let window = sim.config.window_size;

    for (link, mut transform) in vehicle_query.iter_mut() {
        if let Some(vehicle) = sim.vehicles().iter().find(|v| v.id == link.0) {
            let z = transform.translation.z;
            transform.translation = to_world(vehicle.position, window, z);
        }
    }
}

/// System to refresh the speed and collision-time readouts
pub fn update_readouts(
    sim: Res<SimulationResource>,
    mut speed_query: Query<(&SpeedReadout, &mut Text), Without<CollisionReadout>>,
    mut collision_query: Query<&mut Text, With<CollisionReadout>>,
) {
    let sim = &sim.0;

    for (readout, mut text) in speed_query.iter_mut() {
        if let Some(vehicle) = sim.vehicles().get(readout.0) {
            text.0 = format!("{}: {:.1} m/s", vehicle.label, vehicle.speed);
        }
    }

    let collision = match sim.collision_time() {
        Some(t) if t.is_finite() => format!("Collision in: {:.1} s", t),
        Some(_) => "Collision in: never".to_string(),
        None => "Collision in: --".to_string(),
    };
    for mut text in collision_query.iter_mut() {
        text.0.clone_from(&collision);
    }
}

/// System to show the restart control only while the run is halted
pub fn update_restart_button(
    sim: Res<SimulationResource>,
    mut button_query: Query<&mut Visibility, With<RestartButton>>,
) {
    let visibility = if sim.0.state().is_halted() {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    for mut current in button_query.iter_mut() {
        current.set_if_neq(visibility);
    }
}
