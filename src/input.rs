//! Input handling for keyboard shortcuts.
//!
//! Space pauses the scene clock, M cycles the satellite spin mode and R
//! puts the camera back where it started.

use bevy::prelude::*;

use crate::camera::{CameraState, MainCamera, OrbitCamera};
use crate::motion::{OrbitalMotion, SpinMode};
use crate::time::SceneClock;

/// Plugin providing keyboard shortcuts.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, keyboard_shortcuts);
    }
}

/// Handle keyboard shortcuts for scene control.
fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut clock: ResMut<SceneClock>,
    mut bodies: Query<&mut OrbitalMotion>,
    mut camera_query: Query<&mut OrbitCamera, With<MainCamera>>,
    camera_state: Res<CameraState>,
) {
    // Space: toggle pause
    if keys.just_pressed(KeyCode::Space) {
        let paused = clock.toggle_pause();
        info!("Scene {}", if paused { "paused" } else { "running" });
    }

    // M: cycle spin mode on every orbiting body
    if keys.just_pressed(KeyCode::KeyM) {
        let mode = cycle_spin_modes(bodies.iter_mut().map(|m| m.into_inner()));
        if let Some(mode) = mode {
            info!("Spin mode: {}", mode.label());
        }
    }

    // R: reset camera
    if keys.just_pressed(KeyCode::KeyR) {
        reset_camera(&camera_state, camera_query.iter_mut().map(|c| c.into_inner()));
    }
}

/// Advance every body to the mode after the first body's current one.
///
/// Returns the mode applied, or `None` when nothing orbits.
pub fn cycle_spin_modes<'a>(bodies: impl Iterator<Item = &'a mut OrbitalMotion>) -> Option<SpinMode> {
    let mut applied = None;
    for motion in bodies {
        let mode = *applied.get_or_insert(motion.spin_mode().next());
        motion.set_spin_mode(mode);
    }
    applied
}

/// Restore every orbit camera to the home placement, if one was recorded.
pub fn reset_camera<'a>(state: &CameraState, cameras: impl Iterator<Item = &'a mut OrbitCamera>) {
    let Some(home) = state.home else {
        return;
    };
    for camera in cameras {
        *camera = home;
    }
}
