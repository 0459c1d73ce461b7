//! Scene body spawning.
//!
//! Walks the validated descriptor tree and spawns one entity per node,
//! parenting children and attaching each node's animator component.

use bevy::prelude::*;
use bevy::render::render_resource::Face;

use crate::assets::SceneAssets;
use crate::config::SceneConfig;
use crate::render::background::{star_material, star_mesh, star_transforms};
use crate::scene::{Animator, Blend, LayerMaterial, NodeKind, SceneNode, build_scene};
use crate::starfield::star_rng;
use crate::types::{SceneError, SceneState};

/// Component marking an entity spawned from a scene descriptor.
#[derive(Component, Debug)]
pub struct SceneBody {
    /// Descriptor name, also used as the entity's `Name`.
    pub name: String,
}

/// Plugin spawning the scene when it starts running.
pub struct BodiesPlugin;

impl Plugin for BodiesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(SceneState::Running), spawn_scene);
    }
}

/// Mutable asset stores and resolved handles needed while spawning.
struct SpawnContext<'a> {
    meshes: &'a mut Assets<Mesh>,
    materials: &'a mut Assets<StandardMaterial>,
    assets: &'a SceneAssets,
}

/// Build a material for a sphere layer, resolving its texture handle.
pub fn layer_material(
    layer: &LayerMaterial,
    assets: &SceneAssets,
) -> Result<StandardMaterial, SceneError> {
    let base_color_texture = layer
        .texture
        .as_deref()
        .map(|path| assets.texture(path))
        .transpose()?;

    Ok(StandardMaterial {
        base_color: layer.color.with_alpha(layer.opacity),
        base_color_texture,
        alpha_mode: match layer.blend {
            Blend::Opaque => AlphaMode::Opaque,
            Blend::Additive => AlphaMode::Add,
        },
        cull_mode: if layer.inside_out {
            Some(Face::Front)
        } else {
            Some(Face::Back)
        },
        ..default()
    })
}

/// Spawn the whole scene from configuration.
///
/// Runs once on entering [`SceneState::Running`]; any setup error aborts
/// the app.
fn spawn_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    assets: Res<SceneAssets>,
    server: Res<AssetServer>,
    config: Res<SceneConfig>,
    mut exit: MessageWriter<AppExit>,
) {
    let mut ctx = SpawnContext {
        meshes: &mut meshes,
        materials: &mut materials,
        assets: &assets,
    };

    let result = assets
        .ensure_ready(&server)
        .and_then(|()| build_scene(&config, &mut star_rng(config.stars.seed)))
        .and_then(|nodes| {
            nodes.iter().try_fold(0, |spawned, node| {
                spawn_node(&mut commands, &mut ctx, node, None)?;
                Ok(spawned + node.node_count())
            })
        });

    match result {
        Ok(count) => info!("Spawned {count} scene nodes"),
        Err(err) => {
            error!("Scene setup failed: {err}");
            exit.write(AppExit::error());
        }
    }
}

/// Spawn `node` and its subtree, returning the node's entity.
fn spawn_node(
    commands: &mut Commands,
    ctx: &mut SpawnContext,
    node: &SceneNode,
    parent: Option<Entity>,
) -> Result<Entity, SceneError> {
    let mut entity = commands.spawn((
        Name::new(node.name.clone()),
        node.transform,
        SceneBody {
            name: node.name.clone(),
        },
    ));

    let mut stars = None;
    match &node.kind {
        NodeKind::Group => {
            entity.insert(Visibility::default());
        }
        NodeKind::Sphere {
            radius,
            segments,
            material,
        } => {
            let mesh = ctx.meshes.add(Sphere::new(*radius).mesh().uv(*segments, *segments));
            let material = ctx.materials.add(layer_material(material, ctx.assets)?);
            entity.insert((Mesh3d(mesh), MeshMaterial3d(material)));
        }
        NodeKind::Model { path } => {
            entity.insert(SceneRoot(ctx.assets.model(path)?));
        }
        NodeKind::Stars { field, color, size } => {
            let mesh = ctx.meshes.add(star_mesh(*size));
            let material = ctx.materials.add(star_material(*color));
            entity.insert(Visibility::default());
            stars = Some((field, mesh, material));
        }
    }

    match node.spawned_animator() {
        Some(Animator::Orbit(motion)) => {
            entity.insert(motion);
        }
        Some(Animator::Spin(rotation)) => {
            entity.insert(rotation);
        }
        None => {}
    }

    if let Some(parent) = parent {
        entity.insert(ChildOf(parent));
    }

    let id = entity.id();

    // Stars share one mesh and material
    if let Some((field, mesh, material)) = stars {
        let batch: Vec<_> = star_transforms(field)
            .into_iter()
            .map(|transform| {
                (
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    transform,
                    ChildOf(id),
                )
            })
            .collect();
        commands.spawn_batch(batch);
        info!("Spawned {} background stars", field.len());
    }

    for child in &node.children {
        spawn_node(commands, ctx, child, Some(id))?;
    }
    Ok(id)
}
