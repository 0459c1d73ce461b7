//! Asset gate.
//!
//! Every texture and model is requested at startup. The app stays in
//! [`SceneState::Loading`] until each handle has resolved with its
//! dependencies; a failed load aborts the app instead of rendering a
//! half-textured scene.

use std::collections::HashMap;

use bevy::asset::{LoadState, UntypedAssetId};
use bevy::prelude::*;

use crate::config::SceneConfig;
use crate::types::{SceneError, SceneState};

/// Handles for everything the scene renders, keyed by asset path.
#[derive(Resource, Default, Debug)]
pub struct SceneAssets {
    textures: HashMap<String, Handle<Image>>,
    models: HashMap<String, Handle<Scene>>,
}

/// Aggregate load progress of [`SceneAssets`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadProgress {
    Loading { pending: usize, total: usize },
    Ready,
    Failed { path: String },
}

impl SceneAssets {
    pub fn insert_texture(&mut self, path: impl Into<String>, handle: Handle<Image>) {
        self.textures.insert(path.into(), handle);
    }

    pub fn insert_model(&mut self, path: impl Into<String>, handle: Handle<Scene>) {
        self.models.insert(path.into(), handle);
    }

    pub fn texture(&self, path: &str) -> Result<Handle<Image>, SceneError> {
        self.textures
            .get(path)
            .cloned()
            .ok_or_else(|| SceneError::AssetsNotReady {
                path: path.to_string(),
            })
    }

    pub fn model(&self, path: &str) -> Result<Handle<Scene>, SceneError> {
        self.models
            .get(path)
            .cloned()
            .ok_or_else(|| SceneError::AssetsNotReady {
                path: path.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.textures.len() + self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ids(&self) -> impl Iterator<Item = (&str, UntypedAssetId)> {
        let textures = self
            .textures
            .iter()
            .map(|(path, handle)| (path.as_str(), handle.id().untyped()));
        let models = self
            .models
            .iter()
            .map(|(path, handle)| (path.as_str(), handle.id().untyped()));
        textures.chain(models)
    }

    /// Poll the asset server for every handle.
    pub fn progress(&self, server: &AssetServer) -> LoadProgress {
        let mut pending = 0;
        for (path, id) in self.ids() {
            if let Some(LoadState::Failed(_)) = server.get_load_state(id) {
                return LoadProgress::Failed {
                    path: path.to_string(),
                };
            }
            if !server.is_loaded_with_dependencies(id) {
                pending += 1;
            }
        }
        if pending == 0 {
            LoadProgress::Ready
        } else {
            LoadProgress::Loading {
                pending,
                total: self.len(),
            }
        }
    }

    /// Fail unless every handle has resolved.
    pub fn ensure_ready(&self, server: &AssetServer) -> Result<(), SceneError> {
        match self.ids().find(|(_, id)| !server.is_loaded_with_dependencies(*id)) {
            Some((path, _)) => Err(SceneError::AssetsNotReady {
                path: path.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Plugin requesting scene assets and gating the scene on their arrival.
pub struct AssetsPlugin;

impl Plugin for AssetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<SceneState>()
            .init_resource::<SceneAssets>()
            .add_systems(Startup, request_assets)
            .add_systems(
                Update,
                poll_assets.run_if(in_state(SceneState::Loading)),
            );
    }
}

/// Queue every texture and model named by the configuration.
fn request_assets(
    config: Res<SceneConfig>,
    server: Res<AssetServer>,
    mut assets: ResMut<SceneAssets>,
) {
    for path in config.texture_paths() {
        assets.insert_texture(path, server.load(path.to_string()));
    }
    let model = &config.satellite.model;
    assets.insert_model(
        model.as_str(),
        server.load(GltfAssetLabel::Scene(0).from_asset(model.clone())),
    );

    info!("Requested {} scene assets", assets.len());
}

/// Move to [`SceneState::Running`] once everything has loaded.
fn poll_assets(
    assets: Res<SceneAssets>,
    server: Res<AssetServer>,
    mut next_state: ResMut<NextState<SceneState>>,
    mut exit: MessageWriter<AppExit>,
) {
    match assets.progress(&server) {
        LoadProgress::Ready => {
            info!("All {} scene assets loaded", assets.len());
            next_state.set(SceneState::Running);
        }
        LoadProgress::Loading { pending, total } => {
            debug!("Waiting on {pending}/{total} scene assets");
        }
        LoadProgress::Failed { path } => {
            error!("{}", SceneError::AssetLoadFailed { path });
            exit.write(AppExit::error());
        }
    }
}
