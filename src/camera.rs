//! Camera system for the planet viewer.
//!
//! Provides an orbit camera: left drag rotates around the focus, right drag
//! pans the focus and scroll zooms within a clamped distance range. Input
//! moves a goal placement; the rendered placement eases toward it.

use std::f32::consts::FRAC_PI_2;

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    prelude::*,
};
use bevy_egui::{EguiContexts, egui};

use crate::config::SceneConfig;
use crate::types::DEG_TO_RAD;

/// Radians of rotation per pixel of mouse drag.
pub const ROTATE_SPEED: f32 = 0.005;

/// Zoom speed multiplier for scroll wheel.
pub const ZOOM_SPEED: f32 = 0.1;

/// Focus travel per pixel of right drag, as a fraction of camera distance.
pub const PAN_SPEED: f32 = 0.0015;

/// Rate (1/s) at which the rendered placement converges on the goal.
pub const DEFAULT_DAMPING: f32 = 3.0;

/// Pitch stays just short of the poles so the up vector never flips.
pub const MAX_PITCH: f32 = FRAC_PI_2 - 0.01;

/// Placements closer than this are treated as identical.
const SETTLE_EPSILON: f32 = 1e-4;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Spherical placement around a focus point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitPlacement {
    pub focus: Vec3,
    pub distance: f32,
    /// Rotation about +Y, zero looking down -Z.
    pub yaw: f32,
    /// Elevation above the horizontal plane.
    pub pitch: f32,
}

impl OrbitPlacement {
    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.focus + self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.focus, Vec3::Y)
    }

    fn lerp(&self, goal: &Self, t: f32) -> Self {
        let mix = |from: f32, to: f32| from + (to - from) * t;
        Self {
            focus: self.focus.lerp(goal.focus, t),
            distance: mix(self.distance, goal.distance),
            yaw: mix(self.yaw, goal.yaw),
            pitch: mix(self.pitch, goal.pitch),
        }
    }

    fn approx_eq(&self, other: &Self) -> bool {
        self.focus.abs_diff_eq(other.focus, SETTLE_EPSILON)
            && (self.distance - other.distance).abs() < SETTLE_EPSILON
            && (self.yaw - other.yaw).abs() < SETTLE_EPSILON
            && (self.pitch - other.pitch).abs() < SETTLE_EPSILON
    }
}

/// Damped orbit camera.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    /// Placement currently rendered.
    pub current: OrbitPlacement,
    /// Placement input steers toward.
    pub goal: OrbitPlacement,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Convergence rate in 1/s. Zero or less snaps to the goal.
    pub damping: f32,
}

impl OrbitCamera {
    /// Place the camera at `position` looking at `focus`, already settled.
    pub fn from_position(position: Vec3, focus: Vec3, min_distance: f32, max_distance: f32) -> Self {
        let offset = position - focus;
        let distance = offset.length();
        let pitch = if distance > 0.0 {
            (offset.y / distance).clamp(-1.0, 1.0).asin()
        } else {
            0.0
        };
        let placement = OrbitPlacement {
            focus,
            distance: distance.clamp(min_distance, max_distance),
            yaw: offset.x.atan2(offset.z),
            pitch: pitch.clamp(-MAX_PITCH, MAX_PITCH),
        };
        Self {
            current: placement,
            goal: placement,
            min_distance,
            max_distance,
            damping: DEFAULT_DAMPING,
        }
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Apply a drag delta in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        self.goal.yaw -= delta.x * ROTATE_SPEED;
        self.goal.pitch = (self.goal.pitch + delta.y * ROTATE_SPEED).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Logarithmic zoom: positive scroll moves closer.
    pub fn zoom(&mut self, scroll: f32) {
        let zoom_factor = 1.0 - scroll * ZOOM_SPEED;
        self.goal.distance =
            (self.goal.distance * zoom_factor).clamp(self.min_distance, self.max_distance);
    }

    /// Slide the focus in the view plane so the scene follows the cursor.
    pub fn pan(&mut self, delta: Vec2) {
        let rotation = self.current.transform().rotation;
        let scale = PAN_SPEED * self.goal.distance;
        self.goal.focus += rotation * Vec3::new(-delta.x, delta.y, 0.0) * scale;
    }

    /// Ease the rendered placement toward the goal over `dt` seconds.
    pub fn damp(&mut self, dt: f32) {
        if self.damping <= 0.0 {
            self.settle();
            return;
        }
        let t = 1.0 - (-self.damping * dt.max(0.0)).exp();
        self.current = self.current.lerp(&self.goal, t);
        if self.current.approx_eq(&self.goal) {
            self.settle();
        }
    }

    /// Jump straight to the goal.
    pub fn settle(&mut self) {
        self.current = self.goal;
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.goal
    }

    pub fn position(&self) -> Vec3 {
        self.current.position()
    }

    pub fn transform(&self) -> Transform {
        self.current.transform()
    }
}

/// Resource tracking camera state.
#[derive(Resource, Default)]
pub struct CameraState {
    /// Placement restored by the reset shortcut.
    pub home: Option<OrbitCamera>,
}

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraState>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (
                    camera_orbit,
                    camera_pan,
                    camera_zoom,
                    damp_orbit_camera,
                    apply_orbit_camera,
                )
                    .chain(),
            );
    }
}

/// Whether egui is using or hovering the pointer, e.g. over the dock.
pub fn ui_wants_pointer(ctx: &egui::Context) -> bool {
    ctx.wants_pointer_input()
}

fn pointer_on_ui(contexts: &mut EguiContexts) -> bool {
    contexts.ctx_mut().is_ok_and(|ctx| ui_wants_pointer(ctx))
}

/// Spawn the main camera with perspective projection.
fn setup_camera(mut commands: Commands, config: Res<SceneConfig>, mut state: ResMut<CameraState>) {
    let camera = &config.camera;
    let orbit = OrbitCamera::from_position(
        camera.position,
        camera.focus,
        camera.min_distance,
        camera.max_distance,
    )
    .with_damping(camera.damping);
    state.home = Some(orbit);

    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: camera.fov_deg * DEG_TO_RAD,
            ..default()
        }),
        orbit.transform(),
        orbit,
        // Dim fill light so the night side is not pitch black
        AmbientLight {
            brightness: config.lighting.ambient_brightness,
            ..default()
        },
        MainCamera,
    ));
}

/// Handle left mouse button drag for orbiting.
fn camera_orbit(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut camera_query: Query<&mut OrbitCamera, With<MainCamera>>,
    mut contexts: EguiContexts,
) {
    if !mouse_buttons.pressed(MouseButton::Left) || mouse_motion.delta == Vec2::ZERO {
        return;
    }

    // Don't orbit while dragging a dock control
    if pointer_on_ui(&mut contexts) {
        return;
    }

    let Ok(mut orbit) = camera_query.single_mut() else {
        return;
    };

    orbit.rotate(mouse_motion.delta);
}

/// Handle right mouse button drag for panning.
fn camera_pan(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    config: Res<SceneConfig>,
    mut camera_query: Query<&mut OrbitCamera, With<MainCamera>>,
    mut contexts: EguiContexts,
) {
    if !config.camera.pan_enabled
        || !mouse_buttons.pressed(MouseButton::Right)
        || mouse_motion.delta == Vec2::ZERO
    {
        return;
    }

    if pointer_on_ui(&mut contexts) {
        return;
    }

    let Ok(mut orbit) = camera_query.single_mut() else {
        return;
    };

    orbit.pan(mouse_motion.delta);
}

/// Handle mouse scroll wheel for zoom.
fn camera_zoom(
    mouse_scroll: Res<AccumulatedMouseScroll>,
    config: Res<SceneConfig>,
    mut camera_query: Query<&mut OrbitCamera, With<MainCamera>>,
    mut contexts: EguiContexts,
) {
    // Skip if no scroll input
    if !config.camera.zoom_enabled || mouse_scroll.delta.y == 0.0 {
        return;
    }

    // Scrolling over the dock belongs to egui
    if pointer_on_ui(&mut contexts) {
        return;
    }

    let Ok(mut orbit) = camera_query.single_mut() else {
        return;
    };

    orbit.zoom(mouse_scroll.delta.y);
}

/// Ease every unsettled orbit camera toward its goal.
fn damp_orbit_camera(time: Res<Time>, mut camera_query: Query<&mut OrbitCamera, With<MainCamera>>) {
    let dt = time.delta_secs();
    for mut orbit in camera_query.iter_mut() {
        // Only touch moving cameras so change detection stays quiet
        if !orbit.is_settled() {
            orbit.damp(dt);
        }
    }
}

/// Write the orbit placement into the camera transform.
fn apply_orbit_camera(
    mut camera_query: Query<(&OrbitCamera, &mut Transform), (With<MainCamera>, Changed<OrbitCamera>)>,
) {
    for (orbit, mut transform) in camera_query.iter_mut() {
        *transform = orbit.transform();
    }
}
