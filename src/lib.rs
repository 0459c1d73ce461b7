//! Planetview - animated planet scene viewer
//!
//! A library crate providing the scene, animation and starfield components
//! for testing and integration purposes.

pub mod assets;
pub mod camera;
pub mod config;
pub mod input;
pub mod motion;
pub mod render;
pub mod scene;
pub mod starfield;
pub mod time;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
