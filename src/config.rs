//! Scene configuration.
//!
//! Every tunable of the scene lives here with the values the viewer ships
//! with. The resource is inserted before the plugins that read it.

use bevy::prelude::*;

use crate::camera::DEFAULT_DAMPING;
use crate::motion::{
    DEFAULT_ANGULAR_SPEED, DEFAULT_EXTRA_SPIN, DEFAULT_ORBIT_RADIUS, SpinMode,
};
use crate::starfield::{DEFAULT_STAR_COUNT, DEFAULT_STAR_RADIUS};
use crate::types::AXIAL_TILT_DEG;

/// Top-level scene configuration resource.
#[derive(Resource, Clone, Debug, Default)]
pub struct SceneConfig {
    pub planet: PlanetConfig,
    pub satellite: SatelliteConfig,
    pub stars: StarFieldConfig,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
}

/// Planet sphere and its overlay layers.
#[derive(Clone, Debug)]
pub struct PlanetConfig {
    /// Surface radius in render units.
    pub radius: f32,
    /// Sphere tessellation (sectors and stacks).
    pub segments: u32,
    /// Axial tilt in degrees, applied as a roll of the whole planet group.
    pub axial_tilt_deg: f32,
    /// Surface rotation in radians per second of scene time.
    pub rotation_factor: f32,
    /// Day-side colour map.
    pub surface_texture: String,
    /// City lights map, blended additively over the surface.
    pub night_texture: String,
    /// Radius of the night-lights shell.
    pub night_radius: f32,
    /// Cloud map.
    pub cloud_texture: String,
    pub cloud_radius: f32,
    pub cloud_rotation_factor: f32,
    pub cloud_opacity: f32,
    /// Inside-out glow shell.
    pub atmosphere_radius: f32,
    pub atmosphere_color: Color,
    pub atmosphere_opacity: f32,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            radius: 2.0,
            segments: 32,
            axial_tilt_deg: AXIAL_TILT_DEG,
            rotation_factor: 0.1,
            surface_texture: "earthmap1k.jpg".to_string(),
            night_texture: "earthlights1k.jpg".to_string(),
            // Slightly above the surface so the two shells do not z-fight
            night_radius: 2.01,
            cloud_texture: "earthcloudmap.jpg".to_string(),
            cloud_radius: 2.05,
            cloud_rotation_factor: 0.15,
            cloud_opacity: 0.4,
            atmosphere_radius: 2.1,
            atmosphere_color: Color::srgb_u8(0x88, 0xb2, 0xff),
            atmosphere_opacity: 0.3,
        }
    }
}

/// Orbiting satellite model.
#[derive(Clone, Debug)]
pub struct SatelliteConfig {
    /// glTF binary holding the model; scene 0 is used.
    pub model: String,
    pub scale: f32,
    pub angular_speed: f32,
    pub orbit_radius: f32,
    pub extra_spin: f32,
    pub spin_mode: SpinMode,
}

impl Default for SatelliteConfig {
    fn default() -> Self {
        Self {
            model: "simple_satellite_low_poly_free.glb".to_string(),
            scale: 0.2,
            angular_speed: DEFAULT_ANGULAR_SPEED,
            orbit_radius: DEFAULT_ORBIT_RADIUS,
            extra_spin: DEFAULT_EXTRA_SPIN,
            spin_mode: SpinMode::default(),
        }
    }
}

/// Background starfield.
#[derive(Clone, Debug)]
pub struct StarFieldConfig {
    pub count: usize,
    pub radius: f32,
    /// Diameter of each star in world units.
    pub size: f32,
    pub color: Color,
    /// Fixed seed for a reproducible sky. `None` draws a fresh sky per launch.
    pub seed: Option<u64>,
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_STAR_COUNT,
            radius: DEFAULT_STAR_RADIUS,
            size: 0.2,
            color: Color::WHITE,
            seed: None,
        }
    }
}

/// Orbit camera placement and limits.
#[derive(Clone, Debug)]
pub struct CameraConfig {
    pub position: Vec3,
    pub focus: Vec3,
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub zoom_enabled: bool,
    /// Right drag slides the focus point.
    pub pan_enabled: bool,
    /// Convergence rate (1/s) of the eased camera; zero disables easing.
    pub damping: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 4.0, 8.0),
            focus: Vec3::ZERO,
            fov_deg: 45.0,
            min_distance: 5.0,
            max_distance: 20.0,
            zoom_enabled: true,
            pan_enabled: true,
            damping: DEFAULT_DAMPING,
        }
    }
}

/// Ambient fill plus a single key light.
#[derive(Clone, Debug)]
pub struct LightingConfig {
    pub ambient_brightness: f32,
    pub key_light_position: Vec3,
    pub key_light_illuminance: f32,
    pub background: Color,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_brightness: 80.0,
            key_light_position: Vec3::new(-2.0, 1.0, 2.0),
            key_light_illuminance: 8_000.0,
            background: Color::BLACK,
        }
    }
}

impl SceneConfig {
    /// Every asset path the scene needs, textures first.
    pub fn texture_paths(&self) -> [&str; 3] {
        [
            self.planet.surface_texture.as_str(),
            self.planet.night_texture.as_str(),
            self.planet.cloud_texture.as_str(),
        ]
    }
}
