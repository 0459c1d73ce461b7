//! Procedural starfield: points scattered uniformly over a sphere's surface.
//!
//! Sampling the polar angle as `acos(u)` with `u` uniform in `[-1, 1]` gives
//! equal density per unit of surface area. Sampling the angle itself
//! uniformly would crowd points around the poles.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::types::{SceneError, ensure_positive};

#[cfg(test)]
mod proptest_starfield;

/// Number of stars in the default sky.
pub const DEFAULT_STAR_COUNT: usize = 1000;

/// Radius of the default sky sphere in render units.
pub const DEFAULT_STAR_RADIUS: f32 = 50.0;

/// Draw one point uniformly from the surface of a sphere of `radius`.
pub fn sample_sphere_point<R: Rng>(radius: f32, rng: &mut R) -> Vec3 {
    let theta = rng.random_range(0.0..TAU);
    let phi = rng.random_range(-1.0f32..=1.0).acos();

    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}

/// Generate `count` points uniformly distributed on a sphere of `radius`.
///
/// Fails with [`SceneError::InvalidParameter`] for a zero count or a radius
/// that is not strictly positive.
pub fn generate_sphere_points<R: Rng>(
    count: usize,
    radius: f32,
    rng: &mut R,
) -> Result<Vec<Vec3>, SceneError> {
    if count == 0 {
        return Err(SceneError::invalid("star_count", 0u32, "must be positive"));
    }
    ensure_positive("star_radius", radius)?;

    Ok((0..count).map(|_| sample_sphere_point(radius, rng)).collect())
}

/// Random source for the sky: seeded when reproducibility is wanted,
/// otherwise seeded from the thread RNG.
pub fn star_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    }
}

/// Immutable set of star positions on a sphere.
#[derive(Clone, Debug, PartialEq)]
pub struct StarField {
    radius: f32,
    positions: Vec<Vec3>,
}

impl StarField {
    pub fn generate<R: Rng>(count: usize, radius: f32, rng: &mut R) -> Result<Self, SceneError> {
        let positions = generate_sphere_points(count, radius, rng)?;
        Ok(Self { radius, positions })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Flat `x, y, z, x, y, z, ...` buffer, three floats per star.
    pub fn flat_positions(&self) -> Vec<f32> {
        self.positions.iter().flat_map(|p| p.to_array()).collect()
    }
}
