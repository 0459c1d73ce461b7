//! Rendering systems for the planet viewer.
//!
//! Turns the scene descriptor tree into entities once assets are ready and
//! sets up the lighting and background the scene is viewed against.

mod background;
pub mod bodies;

use bevy::prelude::*;

use self::background::BackgroundPlugin;
use self::bodies::BodiesPlugin;

// Re-export for use in other modules
pub use self::background::{star_material, star_mesh, star_transforms};
pub use self::bodies::{SceneBody, layer_material};

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((BodiesPlugin, BackgroundPlugin));
    }
}
