//! Property-based tests for the starfield generator using proptest.

use proptest::prelude::*;

use super::*;
use crate::test_utils::{assertions, fixtures};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every generated star sits on the sphere surface.
    #[test]
    fn prop_points_on_surface(
        seed in any::<u64>(),
        count in 1usize..2_000,
        radius in 0.01f32..10_000.0,
    ) {
        let mut rng = fixtures::seeded_rng(seed);
        let points = generate_sphere_points(count, radius, &mut rng).unwrap();

        prop_assert_eq!(points.len(), count);
        for p in &points {
            let norm = p.as_dvec3().length();
            prop_assert!(
                assertions::relative_error(norm, radius as f64) < 1e-4,
                "point {} has norm {} for radius {}", p, norm, radius
            );
        }
    }

    /// Non-positive radii are always rejected.
    #[test]
    fn prop_non_positive_radius_rejected(
        seed in any::<u64>(),
        radius in -1_000.0f32..=0.0,
    ) {
        let mut rng = fixtures::seeded_rng(seed);
        prop_assert!(generate_sphere_points(10, radius, &mut rng).is_err());
    }
}
