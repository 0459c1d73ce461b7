//! Dock (bottom bar) for the scene controls.
//!
//! The dock provides a single horizontal strip with:
//! - Play/Pause toggle
//! - Elapsed scene time
//! - Satellite spin mode selector
//! - Camera reset button

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::camera::{CameraState, MainCamera, OrbitCamera};
use crate::input::reset_camera;
use crate::motion::{OrbitalMotion, SpinMode};
use crate::time::SceneClock;
use crate::types::SceneState;
use crate::ui::icons;

/// Colors for the dock UI.
mod colors {
    use bevy_egui::egui::Color32;

    pub const DOCK_BG: Color32 = Color32::from_rgba_premultiplied(26, 26, 36, 240);
    pub const PLAY_ICON: Color32 = Color32::from_rgb(85, 221, 136);
    pub const PAUSE_ICON: Color32 = Color32::from_rgb(221, 170, 85);
    pub const TEXT: Color32 = Color32::from_rgb(220, 220, 230);
}

/// Format scene time as `mm:ss.s`, switching to `h:mm:ss` after an hour.
pub fn format_elapsed(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let whole = seconds as u64;
    let (hours, minutes) = (whole / 3600, (whole / 60) % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{:02}", whole % 60)
    } else {
        format!("{minutes:02}:{:04.1}", seconds % 60.0)
    }
}

/// System that renders the dock at the bottom.
pub fn dock_system(
    mut contexts: EguiContexts,
    mut clock: ResMut<SceneClock>,
    mut bodies: Query<&mut OrbitalMotion>,
    mut cameras: Query<&mut OrbitCamera, With<MainCamera>>,
    camera_state: Res<CameraState>,
    scene_state: Res<State<SceneState>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::TopBottomPanel::bottom("dock")
        .exact_height(48.0)
        .frame(
            egui::Frame::NONE
                .fill(colors::DOCK_BG)
                .inner_margin(egui::Margin::symmetric(20, 8)),
        )
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.spacing_mut().item_spacing.x = 16.0;

                if *scene_state.get() == SceneState::Loading {
                    ui.label(
                        egui::RichText::new(format!("{} Loading scene", icons::HOURGLASS))
                            .size(14.0)
                            .color(colors::TEXT),
                    );
                    return;
                }

                render_play_pause(ui, &mut clock);

                ui.separator();

                ui.label(
                    egui::RichText::new(format!("{} {}", icons::CLOCK, format_elapsed(clock.elapsed)))
                        .monospace()
                        .size(14.0)
                        .color(colors::TEXT),
                );

                ui.separator();

                render_spin_modes(ui, &mut bodies);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let button = egui::Button::new(egui::RichText::new(icons::RESET).size(18.0));
                    if ui.add(button).on_hover_text("Reset camera (R)").clicked() {
                        reset_camera(&camera_state, cameras.iter_mut().map(|c| c.into_inner()));
                    }
                });
            });
        });
}

/// Render the play/pause toggle button.
fn render_play_pause(ui: &mut egui::Ui, clock: &mut SceneClock) {
    let (icon, color, tooltip) = if clock.paused {
        (icons::PLAY, colors::PLAY_ICON, "Play (Space)")
    } else {
        (icons::PAUSE, colors::PAUSE_ICON, "Pause (Space)")
    };

    let button = egui::Button::new(egui::RichText::new(icon).size(22.0).color(color))
        .min_size(egui::vec2(40.0, 32.0));

    if ui.add(button).on_hover_text(tooltip).clicked() {
        clock.toggle_pause();
    }
}

/// Render one selectable entry per spin mode.
fn render_spin_modes(ui: &mut egui::Ui, bodies: &mut Query<&mut OrbitalMotion>) {
    let Some(mut current) = bodies.iter().next().map(OrbitalMotion::spin_mode) else {
        return;
    };
    let before = current;

    ui.label(egui::RichText::new(icons::SPIN).size(16.0).color(colors::TEXT))
        .on_hover_text("Satellite spin mode (M)");
    for mode in SpinMode::ALL {
        ui.selectable_value(&mut current, mode, mode.label());
    }

    if current != before {
        for mut motion in bodies.iter_mut() {
            motion.set_spin_mode(current);
        }
        info!("Spin mode: {}", current.label());
    }
}
