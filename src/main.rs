//! Planetview - animated planet scene viewer
//!
//! A desktop application rendering a textured, tilted planet with clouds,
//! an atmosphere glow, an orbiting satellite and a procedural starfield.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use planetview::assets::AssetsPlugin;
use planetview::camera::CameraPlugin;
use planetview::config::SceneConfig;
use planetview::input::InputPlugin;
use planetview::motion::MotionPlugin;
use planetview::render::RenderPlugin;
use planetview::time::TimePlugin;
use planetview::ui::UiPlugin;

fn main() -> AppExit {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "planetview".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        // Insert resources before plugins that depend on them
        .insert_resource(SceneConfig::default())
        // Add scene plugins
        .add_plugins((
            AssetsPlugin,
            CameraPlugin,
            TimePlugin,
            MotionPlugin,
            RenderPlugin,
            InputPlugin,
            UiPlugin,
        ))
        .run()
}
