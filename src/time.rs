//! Scene clock for the planet viewer.
//!
//! Turns the engine's frame time into the `(elapsed, delta)` pair that every
//! animated body is driven by, and handles pausing.

use bevy::prelude::*;

use crate::types::{FrameClock, FrameSet, SceneState};

/// Resource tracking scene time.
///
/// Elapsed time is kept in f64 so long sessions do not lose precision; the
/// per-frame view handed to bodies is f32 to match `Transform`.
#[derive(Resource, Clone, Debug, Default)]
pub struct SceneClock {
    /// Seconds of unpaused scene time.
    pub elapsed: f64,
    /// Seconds advanced by the most recent frame.
    pub delta: f64,
    /// Whether time is frozen.
    pub paused: bool,
}

impl SceneClock {
    /// Advance by a frame of real time. Negative deltas are treated as zero.
    pub fn advance(&mut self, real_delta: f64) {
        if self.paused {
            self.delta = 0.0;
            return;
        }
        self.delta = real_delta.max(0.0);
        self.elapsed += self.delta;
    }

    /// Flip the pause flag. Returns the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// View handed to per-frame updates.
    pub fn frame(&self) -> FrameClock {
        FrameClock::new(self.elapsed as f32, self.delta as f32)
    }
}

/// Plugin providing scene clock advancement.
pub struct TimePlugin;

impl Plugin for TimePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneClock>()
            .add_systems(
                Update,
                advance_clock
                    .in_set(FrameSet::Clock)
                    .run_if(in_state(SceneState::Running)),
            );
    }
}

/// Advance the scene clock from the engine's frame delta.
///
/// Only runs once the scene is spawned, so elapsed time starts at zero when
/// the first animated frame is drawn rather than when loading began.
fn advance_clock(mut clock: ResMut<SceneClock>, time: Res<Time>) {
    clock.advance(time.delta_secs_f64());
}
