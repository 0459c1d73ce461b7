//! Common test utilities for integration tests.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use planetview::types::SceneState;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Minimal headless app with state support, starting in `state`.
pub fn headless_app(state: SceneState) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_state(state);
    app
}

/// Minimal app with an asset server that knows the scene asset types but
/// has no loaders, so every load eventually fails.
pub fn asset_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, AssetPlugin::default(), StatesPlugin))
        .init_asset::<Image>()
        .init_asset::<Scene>();
    app
}

/// Deterministic random source.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
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

/// Distance from the origin, computed in f64.
pub fn norm(p: Vec3) -> f64 {
    p.as_dvec3().length()
}
