//! Simulation controls overlay: pause, reset, speed, time, connection, FPS.

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::coordinator::{Coordinator, UiAction};
use crate::ui::{apply_panel_style, heading, panel_frame, session_ready, MUTED};

const MIN_SPEED: f32 = 0.1;
const MAX_SPEED: f32 = 10.0;
const CONNECTED: egui::Color32 = egui::Color32::from_rgb(80, 200, 120);
const DISCONNECTED: egui::Color32 = egui::Color32::from_rgb(230, 80, 80);

pub fn hud_plugin(app: &mut App) {
    if !app.is_plugin_added::<FrameTimeDiagnosticsPlugin>() {
        app.add_plugins(FrameTimeDiagnosticsPlugin);
    }
    app.add_systems(Update, hud_overlay_system.run_if(session_ready));
}

fn hud_overlay_system(
    mut contexts: EguiContexts,
    coordinator: Res<Coordinator>,
    diagnostics: Res<DiagnosticsStore>,
    mut actions: EventWriter<UiAction>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);
    let controls = coordinator.controls();

    egui::Window::new("Simulation")
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(panel_frame())
        .show(contexts.ctx_mut(), |ui| {
            apply_panel_style(ui);
            heading(ui, "Orrery");
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                let (icon, caption) = controls.pause_label();
                if ui.button(format!("{icon} {caption}")).clicked() {
                    actions.send(UiAction::TogglePause);
                }
                if ui.button("Reset").clicked() {
                    actions.send(UiAction::Reset);
                }
            });
            ui.add_space(4.0);

            let mut speed = controls.speed;
            ui.horizontal(|ui| {
                ui.label("Speed");
                let slider = egui::Slider::new(&mut speed, MIN_SPEED..=MAX_SPEED)
                    .step_by(0.1)
                    .show_value(false);
                if ui.add(slider).changed() {
                    actions.send(UiAction::SetSpeed(speed));
                }
                ui.label(coordinator.speed_display());
            });
            ui.label(format!("Time  {}", coordinator.time_display()));
            ui.add_space(4.0);

            ui.separator();
            let (dot, status) = if coordinator.is_connected() {
                (CONNECTED, "Connected")
            } else {
                (DISCONNECTED, "Disconnected")
            };
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("●").color(dot));
                ui.label(status);
            });
            ui.label(egui::RichText::new(format!("FPS  {fps:.0}")).color(MUTED));
        });
}
