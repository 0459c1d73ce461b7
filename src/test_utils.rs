//! Test utilities for scene animation and starfield tests.
//!
//! Provides fixtures for common bodies and random sources, and assertions
//! for the geometric invariants the viewer relies on.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::motion::{DEFAULT_ANGULAR_SPEED, DEFAULT_ORBIT_RADIUS, OrbitalMotion};

/// Fixtures for creating test bodies and random sources.
pub mod fixtures {
    use super::*;

    /// The satellite orbit the scene ships with.
    pub fn satellite_orbit() -> OrbitalMotion {
        OrbitalMotion::new(DEFAULT_ANGULAR_SPEED, DEFAULT_ORBIT_RADIUS)
    }

    /// Deterministic random source.
    pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }
}

/// Assertions for verifying geometric invariants.
pub mod assertions {
    use super::*;

    /// |actual - expected| / |expected|, falling back to absolute error near zero.
    pub fn relative_error(actual: f64, expected: f64) -> f64 {
        if expected.abs() > 1e-12 {
            ((actual - expected) / expected).abs()
        } else {
            (actual - expected).abs()
        }
    }

    /// Distance from the vertical axis, computed in f64.
    pub fn horizontal_distance(p: Vec3) -> f64 {
        let (x, z) = (p.x as f64, p.z as f64);
        (x * x + z * z).sqrt()
    }

    /// Assert every point has norm `radius` within relative `tolerance`.
    ///
    /// # Panics
    /// Panics on the first point off the surface.
    pub fn assert_on_sphere(points: &[Vec3], radius: f32, tolerance: f64) {
        for p in points {
            let norm = p.as_dvec3().length();
            let err = relative_error(norm, radius as f64);
            assert!(
                err <= tolerance,
                "point {p} off sphere: norm={norm:.6}, radius={radius}, error={err:.3e}"
            );
        }
    }

    /// Pearson chi-squared statistic of `values` against a uniform
    /// distribution on `[lo, hi]` split into `bins` equal buckets.
    pub fn chi_squared_uniform(values: &[f32], lo: f32, hi: f32, bins: usize) -> f64 {
        let mut counts = vec![0usize; bins];
        let width = (hi - lo) / bins as f32;
        for &v in values {
            let bin = (((v - lo) / width) as usize).min(bins - 1);
            counts[bin] += 1;
        }
        let expected = values.len() as f64 / bins as f64;
        counts
            .iter()
            .map(|&c| {
                let diff = c as f64 - expected;
                diff * diff / expected
            })
            .sum()
    }
}

/// Utilities for creating headless Bevy apps for testing.
pub mod bevy_test {
    use bevy::prelude::*;
    use bevy::state::app::StatesPlugin;

    use crate::types::SceneState;

    /// Create a minimal Bevy app with state support, already running.
    pub fn headless_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_state(SceneState::Running);
        app
    }

    /// Minimal app with an asset server that knows the scene asset types
    /// but has no loaders, so every load eventually fails.
    pub fn asset_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default(), StatesPlugin))
            .init_asset::<Image>()
            .init_asset::<Scene>();
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::Rng;

    #[test]
    fn test_relative_error_near_zero_is_absolute() {
        assert_relative_eq!(assertions::relative_error(0.5, 0.0), 0.5);
        assert_relative_eq!(assertions::relative_error(11.0, 10.0), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_chi_squared_flags_skewed_samples() {
        // Everything in the first bucket
        let skewed = vec![-0.99f32; 1_000];
        assert!(assertions::chi_squared_uniform(&skewed, -1.0, 1.0, 10) > 1_000.0);
    }

    #[test]
    fn test_chi_squared_accepts_uniform_samples() {
        let mut rng = fixtures::seeded_rng(3);
        let values: Vec<f32> = (0..10_000).map(|_| rng.random_range(-1.0..1.0)).collect();
        // 9 degrees of freedom, p = 0.001
        assert!(assertions::chi_squared_uniform(&values, -1.0, 1.0, 10) < 27.9);
    }

    #[test]
    fn test_satellite_fixture_matches_defaults() {
        let orbit = fixtures::satellite_orbit();
        assert_eq!(orbit, OrbitalMotion::default());
    }
}
