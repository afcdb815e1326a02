//! Input handling systems

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::components::SimulationResource;
use crate::simulation::{InputEvent, LoopControl, Position};

/// Handle basic keyboard input
pub fn handle_input(keyboard: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}

/// Forward left clicks to the simulation, which restarts when the halted
/// run's restart control is hit
pub fn handle_click(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut sim: ResMut<SimulationResource>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    // Window cursor coordinates share the simulation's top-left origin
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    let event = InputEvent::Click(Position::new(cursor.x, cursor.y));
    if sim.0.handle_event(event) == LoopControl::Restarted {
        bevy::log::debug!("Restart clicked at ({:.0}, {:.0})", cursor.x, cursor.y);
    }
}
