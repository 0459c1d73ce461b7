//! Headless Bevy integration tests.
//!
//! These tests verify the scene clock and body animation systems work
//! correctly without a GPU.

mod common;

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;
use planetview::motion::{MotionPlugin, OrbitalMotion, SelfRotation, SpinMode};
use planetview::time::{SceneClock, TimePlugin as SceneTimePlugin};
use planetview::types::{DEG_TO_RAD, SceneState};

fn clock_at(elapsed: f64) -> SceneClock {
    SceneClock {
        elapsed,
        delta: 0.0,
        paused: false,
    }
}

#[test]
fn test_scene_clock_advances() {
    let mut app = common::headless_app(SceneState::Running);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
        .add_plugins(SceneTimePlugin);

    for _ in 0..5 {
        app.update();
    }

    let clock = app.world().resource::<SceneClock>();
    assert!(clock.elapsed > 0.0, "Scene time should have advanced");
    assert!(clock.elapsed <= 0.5 + 1e-6, "Scene time ran ahead: {}", clock.elapsed);
}

#[test]
fn test_paused_clock_does_not_advance() {
    let mut app = common::headless_app(SceneState::Running);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
        .add_plugins(SceneTimePlugin);
    app.world_mut().resource_mut::<SceneClock>().paused = true;

    for _ in 0..5 {
        app.update();
    }

    let clock = app.world().resource::<SceneClock>();
    assert_eq!(clock.elapsed, 0.0, "Paused scene should not advance");
    assert_eq!(clock.delta, 0.0);
}

#[test]
fn test_clock_waits_for_running_state() {
    let mut app = common::headless_app(SceneState::Loading);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
        .add_plugins(SceneTimePlugin);

    for _ in 0..3 {
        app.update();
    }

    assert_eq!(app.world().resource::<SceneClock>().elapsed, 0.0);
}

#[test]
fn test_orbiting_body_follows_clock() {
    let mut app = common::headless_app(SceneState::Running);
    app.insert_resource(clock_at(2.0)).add_plugins(MotionPlugin);

    let entity = app
        .world_mut()
        .spawn((OrbitalMotion::default(), Transform::default()))
        .id();
    app.update();

    let transform = app.world().get::<Transform>(entity).unwrap();
    let expected = OrbitalMotion::default().position_at(2.0);
    assert!((transform.translation - expected).length() < 1e-5);
    assert!((transform.translation.length() - 4.0).abs() < 1e-5);
}

#[test]
fn test_self_rotating_body_follows_clock() {
    let mut app = common::headless_app(SceneState::Running);
    app.insert_resource(clock_at(10.0)).add_plugins(MotionPlugin);

    let entity = app
        .world_mut()
        .spawn((SelfRotation::new(0.1), Transform::default()))
        .id();
    app.update();

    let transform = app.world().get::<Transform>(entity).unwrap();
    assert!(transform.rotation.abs_diff_eq(Quat::from_rotation_y(1.0), 1e-5));
}

#[test]
fn test_bodies_frozen_while_loading() {
    let mut app = common::headless_app(SceneState::Loading);
    app.insert_resource(clock_at(3.0)).add_plugins(MotionPlugin);

    let entity = app
        .world_mut()
        .spawn((OrbitalMotion::default(), Transform::default()))
        .id();
    app.update();

    let transform = app.world().get::<Transform>(entity).unwrap();
    assert_eq!(*transform, Transform::default(), "No animation before assets resolve");
}

#[test]
fn test_repeated_frames_at_same_time_are_stable() {
    let mut app = common::headless_app(SceneState::Running);
    app.insert_resource(clock_at(7.5)).add_plugins(MotionPlugin);

    let entity = app
        .world_mut()
        .spawn((
            OrbitalMotion::default().with_spin_mode(SpinMode::PerSecond),
            Transform::default(),
        ))
        .id();

    app.update();
    let first = *app.world().get::<Transform>(entity).unwrap();
    app.update();
    let second = *app.world().get::<Transform>(entity).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_satellite_orbits_in_tilted_frame() {
    let mut app = common::headless_app(SceneState::Running);
    app.add_plugins(TransformPlugin)
        .insert_resource(clock_at(2.0))
        .add_plugins(MotionPlugin);

    let tilt = Transform::from_rotation(Quat::from_rotation_z(-23.4 * DEG_TO_RAD));
    let group = app.world_mut().spawn(tilt).id();
    let satellite = app
        .world_mut()
        .spawn((
            OrbitalMotion::default().with_extra_spin(0.0),
            Transform::default(),
            ChildOf(group),
        ))
        .id();
    app.update();

    let global = app.world().get::<GlobalTransform>(satellite).unwrap();
    let position = global.translation();
    assert!((common::norm(position) - 4.0).abs() < 1e-5);
    assert!(position.y.abs() > 0.1, "Tilted orbit should leave the horizontal plane");

    // Model front (+Z) faces the planet, solved against world up
    let to_planet = -position.normalize();
    assert!((global.back().dot(to_planet) - 1.0).abs() < 1e-5);
    assert!(global.right().y.abs() < 1e-5, "Roll should not follow the tilt");
    assert!(global.up().y > 0.0);
}
