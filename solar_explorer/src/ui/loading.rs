//! Full-screen overlay shown until the catalog loads, or with the bootstrap error.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::coordinator::{Coordinator, LoadingState};
use crate::ui::{apply_panel_style, panel_frame};

const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 68, 68);

pub fn loading_plugin(app: &mut App) {
    app.add_systems(Update, loading_overlay_system);
}

fn loading_overlay_system(mut contexts: EguiContexts, coordinator: Res<Coordinator>) {
    let failure = match coordinator.loading() {
        LoadingState::Ready => return,
        LoadingState::Loading => None,
        LoadingState::Failed(message) => Some(message.as_str()),
    };

    egui::Area::new(egui::Id::new("loading_overlay"))
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut(), |ui| {
            panel_frame().show(ui, |ui| {
                apply_panel_style(ui);
                ui.vertical_centered(|ui| match failure {
                    None => {
                        ui.spinner();
                        ui.label("Loading Solar System...");
                    }
                    Some(message) => {
                        ui.label(egui::RichText::new("Error").size(20.0).color(ERROR_COLOR));
                        ui.label(egui::RichText::new(message).color(ERROR_COLOR));
                    }
                });
            });
        });
}
