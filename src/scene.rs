//! Scene descriptors.
//!
//! The whole scene is described once as a tree of [`SceneNode`]s built from
//! [`SceneConfig`], validated, and only then spawned into the world. Nodes
//! carry their own animator; nothing is diffed or rebuilt afterwards.

use bevy::prelude::*;
use rand::Rng;

use crate::config::SceneConfig;
use crate::motion::{OrbitalMotion, SelfRotation};
use crate::starfield::StarField;
use crate::types::{DEG_TO_RAD, SceneError, ensure_positive};

/// How a sphere layer is blended over what is behind it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
    Opaque,
    /// Colour is added to the framebuffer (glows, lights, clouds).
    Additive,
}

/// Look of a sphere layer.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerMaterial {
    /// Texture path, resolved through the loaded scene assets.
    pub texture: Option<String>,
    pub color: Color,
    pub opacity: f32,
    pub blend: Blend,
    /// Render the inner faces only (atmosphere seen from outside).
    pub inside_out: bool,
}

impl LayerMaterial {
    pub fn textured(path: &str) -> Self {
        Self {
            texture: Some(path.to_string()),
            color: Color::WHITE,
            opacity: 1.0,
            blend: Blend::Opaque,
            inside_out: false,
        }
    }

    pub fn tinted(color: Color) -> Self {
        Self {
            texture: None,
            color,
            opacity: 1.0,
            blend: Blend::Opaque,
            inside_out: false,
        }
    }

    pub fn additive(mut self, opacity: f32) -> Self {
        self.blend = Blend::Additive;
        self.opacity = opacity;
        self
    }

    pub fn inside_out(mut self) -> Self {
        self.inside_out = true;
        self
    }
}

/// What a node renders.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Transform-only grouping node.
    Group,
    Sphere {
        radius: f32,
        segments: u32,
        material: LayerMaterial,
    },
    /// glTF scene resolved through the loaded scene assets.
    Model { path: String },
    /// One small sphere of diameter `size` per point of `field`.
    Stars {
        field: StarField,
        color: Color,
        size: f32,
    },
}

/// Per-frame update attached to a node.
#[derive(Clone, Debug, PartialEq)]
pub enum Animator {
    Orbit(OrbitalMotion),
    Spin(SelfRotation),
}

impl Animator {
    pub fn validate(&self) -> Result<(), SceneError> {
        match self {
            Self::Orbit(motion) => motion.validate(),
            Self::Spin(rotation) => rotation.validate(),
        }
    }
}

/// One node of the scene tree.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    pub transform: Transform,
    pub animator: Option<Animator>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: Transform::IDENTITY,
            animator: None,
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_animator(mut self, animator: Animator) -> Self {
        self.animator = Some(animator);
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Validate this node and its whole subtree.
    pub fn validate(&self) -> Result<(), SceneError> {
        match &self.kind {
            NodeKind::Group => {}
            NodeKind::Stars { size, .. } => ensure_positive("star_size", *size)?,
            NodeKind::Sphere {
                radius,
                segments,
                material,
            } => {
                ensure_positive("sphere_radius", *radius)?;
                if *segments < 3 {
                    return Err(SceneError::invalid(
                        "sphere_segments",
                        *segments,
                        "needs at least 3",
                    ));
                }
                if !(0.0..=1.0).contains(&material.opacity) {
                    return Err(SceneError::invalid(
                        "opacity",
                        material.opacity,
                        "must be within [0, 1]",
                    ));
                }
            }
            NodeKind::Model { .. } => ensure_positive("model_scale", self.transform.scale.min_element())?,
        }
        if let Some(animator) = &self.animator {
            animator.validate()?;
        }
        self.children.iter().try_for_each(SceneNode::validate)
    }

    /// Animator component as spawned. A spinning node oscillates about its
    /// own translation, so that becomes the rest position.
    pub fn spawned_animator(&self) -> Option<Animator> {
        self.animator.clone().map(|animator| match animator {
            Animator::Spin(rotation) => {
                Animator::Spin(rotation.with_rest_position(self.transform.translation))
            }
            orbit @ Animator::Orbit(_) => orbit,
        })
    }

    /// Depth-first search by name.
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SceneNode::node_count).sum::<usize>()
    }
}

/// Node names used by the viewer.
pub mod names {
    pub const PLANET_SYSTEM: &str = "Planet System";
    pub const SURFACE: &str = "Planet Surface";
    pub const NIGHT_LIGHTS: &str = "Night Lights";
    pub const CLOUDS: &str = "Clouds";
    pub const ATMOSPHERE: &str = "Atmosphere";
    pub const SATELLITE: &str = "Satellite";
    pub const STARS: &str = "Stars";
}

/// The tilted planet group: surface, overlays and the orbiting satellite.
pub fn planet_system(config: &SceneConfig) -> SceneNode {
    let planet = &config.planet;
    let satellite = &config.satellite;
    let sphere = |radius: f32, material: LayerMaterial| NodeKind::Sphere {
        radius,
        segments: planet.segments,
        material,
    };

    let tilt = Transform::from_rotation(Quat::from_rotation_z(-planet.axial_tilt_deg * DEG_TO_RAD));

    SceneNode::new(names::PLANET_SYSTEM, NodeKind::Group)
        .with_transform(tilt)
        .with_child(
            SceneNode::new(
                names::SURFACE,
                sphere(planet.radius, LayerMaterial::textured(&planet.surface_texture)),
            )
            .with_animator(Animator::Spin(SelfRotation::new(planet.rotation_factor))),
        )
        .with_child(
            SceneNode::new(
                names::SATELLITE,
                NodeKind::Model {
                    path: satellite.model.clone(),
                },
            )
            .with_transform(Transform::from_scale(Vec3::splat(satellite.scale)))
            .with_animator(Animator::Orbit(
                OrbitalMotion::new(satellite.angular_speed, satellite.orbit_radius)
                    .with_extra_spin(satellite.extra_spin)
                    .with_spin_mode(satellite.spin_mode),
            )),
        )
        .with_child(
            SceneNode::new(
                names::NIGHT_LIGHTS,
                sphere(
                    planet.night_radius,
                    LayerMaterial::textured(&planet.night_texture).additive(1.0),
                ),
            )
            .with_animator(Animator::Spin(SelfRotation::new(planet.rotation_factor))),
        )
        .with_child(
            SceneNode::new(
                names::CLOUDS,
                sphere(
                    planet.cloud_radius,
                    LayerMaterial::textured(&planet.cloud_texture).additive(planet.cloud_opacity),
                ),
            )
            .with_animator(Animator::Spin(SelfRotation::new(planet.cloud_rotation_factor))),
        )
        .with_child(SceneNode::new(
            names::ATMOSPHERE,
            sphere(
                planet.atmosphere_radius,
                LayerMaterial::tinted(planet.atmosphere_color)
                    .additive(planet.atmosphere_opacity)
                    .inside_out(),
            ),
        ))
}

/// Build and validate the full scene: the planet group plus the starfield.
///
/// The starfield is generated here, once, from `rng`.
pub fn build_scene<R: Rng>(config: &SceneConfig, rng: &mut R) -> Result<Vec<SceneNode>, SceneError> {
    let field = StarField::generate(config.stars.count, config.stars.radius, rng)?;
    let nodes = vec![
        planet_system(config),
        SceneNode::new(
            names::STARS,
            NodeKind::Stars {
                field,
                color: config.stars.color,
                size: config.stars.size,
            },
        ),
    ];
    nodes.iter().try_for_each(SceneNode::validate)?;
    Ok(nodes)
}
