//! UI module that visualizes the simulation state using Bevy
//!
//! This module is purely for visualization - all simulation logic is in the `simulation` module.
//! The UI reads state from `Simulation` and renders it using Bevy's 2D graphics.

mod components;
mod input;
mod spawner;
mod sync;
mod world;

use bevy::prelude::*;
use bevy::winit::{UpdateMode, WinitSettings};
use std::time::Duration;

pub use components::{ScenarioResource, SimulationResource};

use components::{color, GRASS_COLOR};
use input::{handle_click, handle_input};
use spawner::spawn_initial_visuals;
use sync::{sync_vehicles, tick_simulation, update_readouts, update_restart_button};
use world::setup_world;

use crate::simulation::{Scenario, Simulation};

/// Plugin to register all UI systems
pub struct CrashSimUIPlugin {
    pub scenario: Scenario,
    pub simulation: Simulation,
}

impl Plugin for CrashSimUIPlugin {
    fn build(&self, app: &mut App) {
        let frame = Duration::from_secs_f32(self.simulation.config.frame_delta());

        app.insert_resource(SimulationResource(self.simulation.clone()))
            .insert_resource(ScenarioResource(self.scenario))
            .insert_resource(ClearColor(color(GRASS_COLOR)))
            // Cap the loop at the target frame rate
            .insert_resource(WinitSettings {
                focused_mode: UpdateMode::reactive(frame),
                unfocused_mode: UpdateMode::reactive(frame),
            })
            .add_systems(Startup, (setup_world, spawn_initial_visuals.after(setup_world)))
            .add_systems(
                Update,
                (
                    handle_input,
                    handle_click,
                    tick_simulation,
                    sync_vehicles,
                    update_readouts,
                    update_restart_button,
                )
                    .chain(),
            );
    }
}
