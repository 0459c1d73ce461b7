//! Background rendering for the planet viewer.
//!
//! Provides the star meshes and the scene lighting.

use bevy::prelude::*;

use crate::config::SceneConfig;
use crate::starfield::StarField;

/// Plugin providing background visual elements.
pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_lighting);
    }
}

/// Small sphere shared by every star; `size` is its diameter.
pub fn star_mesh(size: f32) -> Mesh {
    Sphere::new(size * 0.5).mesh().uv(8, 6)
}

/// One transform per star, read from the field's flat `x, y, z` buffer.
pub fn star_transforms(field: &StarField) -> Vec<Transform> {
    field
        .flat_positions()
        .chunks_exact(3)
        .map(|xyz| Transform::from_xyz(xyz[0], xyz[1], xyz[2]))
        .collect()
}

/// Stars ignore scene lighting.
pub fn star_material(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        emissive: color.to_linear() * 0.5,
        unlit: true,
        ..default()
    }
}

/// Spawn lighting for the scene.
fn spawn_lighting(mut commands: Commands, config: Res<SceneConfig>) {
    let lighting = &config.lighting;

    commands.insert_resource(ClearColor(lighting.background));

    // Key light shining from the configured position towards the planet
    commands.spawn((
        DirectionalLight {
            illuminance: lighting.key_light_illuminance,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(lighting.key_light_position).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Key Light"),
    ));

    info!("Scene lighting initialized");
}
