//! Per-frame body animation.
//!
//! Two closed-form updates drive every animated node: a circular orbit that
//! keeps the body's front facing its focal point, and a self-rotation about
//! the body's vertical axis. Both recompute the transform from absolute scene
//! time, so running an update twice for the same frame is harmless.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::time::SceneClock;
use crate::types::{FrameClock, FrameSet, SceneError, SceneState, ensure_finite};

#[cfg(test)]
mod proptest_motion;

/// Default orbital angular speed (rad/s).
pub const DEFAULT_ANGULAR_SPEED: f32 = 0.5;

/// Default orbit radius in render units.
pub const DEFAULT_ORBIT_RADIUS: f32 = 4.0;

/// Default spin composed on top of the facing orientation (rad).
pub const DEFAULT_EXTRA_SPIN: f32 = 0.5;

/// Below this distance a body is considered to sit on its focal point.
const FACING_EPSILON: f32 = 1e-6;

/// How the extra spin of an orbiting body is applied.
///
/// The orbit's facing orientation is rebuilt every frame, so a constant
/// angle composed on top of it is a fixed offset. The two accumulating
/// modes keep a running angle instead: one per frame, one per second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SpinMode {
    /// Constant angle on top of the facing orientation.
    #[default]
    FixedOffset,
    /// Add `extra_spin` radians every frame; spin rate follows the frame rate.
    PerFrame,
    /// Treat `extra_spin` as rad/s and integrate it over frame deltas.
    PerSecond,
}

impl SpinMode {
    pub const ALL: [SpinMode; 3] = [Self::FixedOffset, Self::PerFrame, Self::PerSecond];

    /// Cycle to the next mode.
    pub fn next(self) -> Self {
        match self {
            Self::FixedOffset => Self::PerFrame,
            Self::PerFrame => Self::PerSecond,
            Self::PerSecond => Self::FixedOffset,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FixedOffset => "fixed offset",
            Self::PerFrame => "per frame",
            Self::PerSecond => "per second",
        }
    }
}

/// Component for a body on a circular orbit around its parent's origin.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct OrbitalMotion {
    /// Angular speed along the orbit (rad/s). Zero freezes the body.
    pub angular_speed: f32,
    /// Distance from the parent origin.
    pub orbit_radius: f32,
    /// Point the body faces every frame.
    pub focal_point: Vec3,
    /// Extra spin about the local vertical axis; see [`SpinMode`].
    pub extra_spin: f32,
    spin_mode: SpinMode,
    spin_angle: f32,
}

impl Default for OrbitalMotion {
    fn default() -> Self {
        Self::new(DEFAULT_ANGULAR_SPEED, DEFAULT_ORBIT_RADIUS)
    }
}

impl OrbitalMotion {
    pub fn new(angular_speed: f32, orbit_radius: f32) -> Self {
        Self {
            angular_speed,
            orbit_radius,
            focal_point: Vec3::ZERO,
            extra_spin: DEFAULT_EXTRA_SPIN,
            spin_mode: SpinMode::default(),
            spin_angle: 0.0,
        }
    }

    pub fn with_focal_point(mut self, focal_point: Vec3) -> Self {
        self.focal_point = focal_point;
        self
    }

    pub fn with_extra_spin(mut self, extra_spin: f32) -> Self {
        self.extra_spin = extra_spin;
        self
    }

    pub fn with_spin_mode(mut self, mode: SpinMode) -> Self {
        self.set_spin_mode(mode);
        self
    }

    pub fn spin_mode(&self) -> SpinMode {
        self.spin_mode
    }

    /// Switch spin mode. The accumulated angle restarts from zero.
    pub fn set_spin_mode(&mut self, mode: SpinMode) {
        self.spin_mode = mode;
        self.spin_angle = 0.0;
    }

    /// Spin currently composed on top of the facing orientation.
    pub fn spin_angle(&self) -> f32 {
        match self.spin_mode {
            SpinMode::FixedOffset => self.extra_spin,
            SpinMode::PerFrame | SpinMode::PerSecond => self.spin_angle,
        }
    }

    /// Time for one full revolution, or `None` for a frozen body.
    pub fn period(&self) -> Option<f32> {
        (self.angular_speed != 0.0).then(|| TAU / self.angular_speed.abs())
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        ensure_finite("angular_speed", self.angular_speed)?;
        ensure_finite("orbit_radius", self.orbit_radius)?;
        ensure_finite("extra_spin", self.extra_spin)?;
        if self.orbit_radius < 0.0 {
            return Err(SceneError::invalid(
                "orbit_radius",
                self.orbit_radius,
                "must not be negative",
            ));
        }
        if !self.focal_point.is_finite() {
            return Err(SceneError::invalid(
                "focal_point",
                f32::NAN,
                "must be finite",
            ));
        }
        Ok(())
    }

    /// Position on the orbit at the given scene time.
    pub fn position_at(&self, elapsed: f32) -> Vec3 {
        orbit_position(elapsed * self.angular_speed, self.orbit_radius)
    }

    /// Move the body to its orbit position, face the focal point, then spin.
    ///
    /// `parent_rotation` is the world rotation of the frame the body orbits
    /// in; facing is solved against world up.
    pub fn update(&mut self, clock: FrameClock, parent_rotation: Quat, transform: &mut Transform) {
        let position = self.position_at(clock.elapsed);

        match self.spin_mode {
            SpinMode::FixedOffset => {}
            SpinMode::PerFrame => {
                self.spin_angle = (self.spin_angle + self.extra_spin).rem_euclid(TAU);
            }
            SpinMode::PerSecond => {
                self.spin_angle =
                    (self.spin_angle + self.extra_spin * clock.delta).rem_euclid(TAU);
            }
        }

        transform.translation = position;
        transform.rotation = facing_rotation(position, self.focal_point, parent_rotation)
            * Quat::from_rotation_y(self.spin_angle());
    }
}

/// Point on a circle of `radius` in the XZ plane at angle `theta`.
///
/// Starts at `(0, 0, -radius)` and runs clockwise seen from +Y.
pub fn orbit_position(theta: f32, radius: f32) -> Vec3 {
    Vec3::new(-radius * theta.sin(), 0.0, -radius * theta.cos())
}

/// Local rotation turning the body's front (+Z, the glTF forward axis) from
/// `position` toward `target`, with world +Y as up.
///
/// `position` and `target` are in the parent frame and `parent_rotation`
/// maps that frame into world space. A body sitting on its target keeps the
/// identity orientation; when the direction is parallel to world up, Bevy
/// picks an orthogonal up axis.
pub fn facing_rotation(position: Vec3, target: Vec3, parent_rotation: Quat) -> Quat {
    let offset = target - position;
    if offset.length_squared() < FACING_EPSILON * FACING_EPSILON {
        return Quat::IDENTITY;
    }
    // looking_to aims -Z, so aim it away from the target
    let world = Transform::IDENTITY
        .looking_to(parent_rotation * -offset, Vec3::Y)
        .rotation;
    parent_rotation.inverse() * world
}

/// Component for a body spinning in place about its vertical axis.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct SelfRotation {
    /// Radians of rotation per second of scene time.
    pub rotation_factor: f32,
    /// Peak displacement of the sinusoidal oscillation.
    pub oscillation_amplitude: f32,
    /// Direction of the oscillation.
    pub oscillation_axis: Vec3,
    /// Translation the oscillation is centred on.
    pub rest_position: Vec3,
}

impl SelfRotation {
    pub fn new(rotation_factor: f32) -> Self {
        Self {
            rotation_factor,
            oscillation_amplitude: 0.0,
            oscillation_axis: Vec3::Z,
            rest_position: Vec3::ZERO,
        }
    }

    pub fn with_oscillation(mut self, axis: Vec3, amplitude: f32) -> Self {
        self.oscillation_axis = axis.normalize_or_zero();
        self.oscillation_amplitude = amplitude;
        self
    }

    pub fn with_rest_position(mut self, rest_position: Vec3) -> Self {
        self.rest_position = rest_position;
        self
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        ensure_finite("rotation_factor", self.rotation_factor)?;
        ensure_finite("oscillation_amplitude", self.oscillation_amplitude)?;
        if !self.rest_position.is_finite() {
            return Err(SceneError::invalid(
                "rest_position",
                f32::NAN,
                "must be finite",
            ));
        }
        Ok(())
    }

    /// Unwrapped rotation angle about +Y.
    pub fn angle_at(&self, elapsed: f32) -> f32 {
        elapsed * self.rotation_factor
    }

    /// Translation at the given scene time.
    pub fn position_at(&self, elapsed: f32) -> Vec3 {
        self.rest_position + self.oscillation_axis * self.oscillation_amplitude * elapsed.sin()
    }

    pub fn update(&self, clock: FrameClock, transform: &mut Transform) {
        transform.rotation = Quat::from_rotation_y(self.angle_at(clock.elapsed));
        transform.translation = self.position_at(clock.elapsed);
    }
}

/// Plugin animating every orbiting and self-rotating body.
pub struct MotionPlugin;

impl Plugin for MotionPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(Update, FrameSet::Animate.after(FrameSet::Clock))
            .add_systems(
                Update,
                (update_self_rotating_bodies, update_orbiting_bodies)
                    .chain()
                    .in_set(FrameSet::Animate)
                    .run_if(in_state(SceneState::Running)),
            );
    }
}

/// Advance every body carrying [`OrbitalMotion`].
pub fn update_orbiting_bodies(
    clock: Res<SceneClock>,
    mut query: Query<(&mut OrbitalMotion, &mut Transform, Option<&ChildOf>)>,
    ancestors: Query<(&Transform, Option<&ChildOf>), Without<OrbitalMotion>>,
) {
    let frame = clock.frame();
    for (mut motion, mut transform, parent) in query.iter_mut() {
        let parent_rotation = ancestor_rotation(parent, &ancestors);
        motion.update(frame, parent_rotation, &mut transform);
    }
}

/// World rotation of the frame below `parent`, composed from local
/// transforms so it holds on the frame the hierarchy is spawned.
fn ancestor_rotation(
    parent: Option<&ChildOf>,
    ancestors: &Query<(&Transform, Option<&ChildOf>), Without<OrbitalMotion>>,
) -> Quat {
    let mut rotation = Quat::IDENTITY;
    let mut next = parent.map(ChildOf::parent);
    while let Some(entity) = next {
        let Ok((transform, up)) = ancestors.get(entity) else {
            break;
        };
        rotation = transform.rotation * rotation;
        next = up.map(ChildOf::parent);
    }
    rotation
}

/// Advance every body carrying [`SelfRotation`].
pub fn update_self_rotating_bodies(
    clock: Res<SceneClock>,
    mut query: Query<(&SelfRotation, &mut Transform)>,
) {
    let frame = clock.frame();
    for (rotation, mut transform) in query.iter_mut() {
        rotation.update(frame, &mut transform);
    }
}
