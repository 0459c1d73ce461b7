//! Core scene types, constants and errors shared across the viewer.

use bevy::prelude::*;

/// System set for ordering per-frame work.
///
/// The scene clock must advance before any body reads it, otherwise
/// animated bodies lag one frame behind the dock readout.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Scene clock advancement (runs first)
    Clock,
    /// Body animation (runs after the clock)
    Animate,
}

/// Lifecycle of the scene.
///
/// Nothing is spawned and no body is animated until every requested asset
/// has resolved.
#[derive(States, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SceneState {
    /// Textures and models are still loading.
    #[default]
    Loading,
    /// Scene is spawned and animating.
    Running,
}

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f32 = std::f32::consts::PI / 180.0;

/// Planet axial tilt in degrees
pub const AXIAL_TILT_DEG: f32 = 23.4;

/// Time pair handed to every per-frame update.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameClock {
    /// Seconds since the scene started running (non-decreasing).
    pub elapsed: f32,
    /// Seconds since the previous frame (zero while paused).
    pub delta: f32,
}

impl FrameClock {
    pub fn new(elapsed: f32, delta: f32) -> Self {
        Self { elapsed, delta }
    }
}

/// Setup-time failures. None of these occur during steady-state frames.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("asset {path} is not loaded yet")]
    AssetsNotReady { path: String },

    #[error("asset {path} failed to load")]
    AssetLoadFailed { path: String },
}

impl SceneError {
    pub(crate) fn invalid(name: &'static str, value: impl Into<f64>, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value: value.into(),
            reason,
        }
    }
}

/// Reject NaN and infinities.
pub(crate) fn ensure_finite(name: &'static str, value: f32) -> Result<(), SceneError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SceneError::invalid(name, value, "must be finite"))
    }
}

/// Reject anything that is not a finite, strictly positive number.
pub(crate) fn ensure_positive(name: &'static str, value: f32) -> Result<(), SceneError> {
    ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(SceneError::invalid(name, value, "must be positive"))
    }
}
