mod hud;
mod inspector;
mod loading;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::coordinator::{Coordinator, LoadingState, UiAction};

pub use hud::hud_plugin;
pub use inspector::inspector_plugin;
pub use loading::loading_plugin;

const PANEL_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(15, 15, 25, 215);
const TEXT_COLOR: egui::Color32 = egui::Color32::from_rgb(200, 220, 240);
const ACCENT: egui::Color32 = egui::Color32::from_rgb(100, 220, 180);
const MUTED: egui::Color32 = egui::Color32::from_rgb(120, 120, 140);

/// HUD and info panel stay hidden until the catalog has loaded.
pub fn session_ready(coordinator: Res<Coordinator>) -> bool {
    *coordinator.loading() == LoadingState::Ready
}

pub fn shortcuts_plugin(app: &mut App) {
    app.add_systems(Update, keyboard_shortcuts_system.run_if(session_ready));
}

fn keyboard_shortcuts_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut actions: EventWriter<UiAction>,
) {
    if contexts.ctx_mut().wants_keyboard_input() {
        return;
    }
    for key in keys.get_just_pressed() {
        if let Some(action) = shortcut_action(*key) {
            actions.send(action);
        }
    }
}

fn shortcut_action(key: KeyCode) -> Option<UiAction> {
    match key {
        KeyCode::KeyP => Some(UiAction::TogglePause),
        KeyCode::KeyC | KeyCode::Escape => Some(UiAction::ClearSelection),
        KeyCode::KeyR => Some(UiAction::Reset),
        _ => None,
    }
}

fn panel_frame() -> egui::Frame {
    egui::Frame::default()
        .fill(PANEL_FILL)
        .inner_margin(egui::Margin::same(12))
        .corner_radius(egui::CornerRadius::same(6))
}

fn apply_panel_style(ui: &mut egui::Ui) {
    ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
    ui.visuals_mut().override_text_color = Some(TEXT_COLOR);
}

fn heading(ui: &mut egui::Ui, text: impl Into<String>) {
    ui.label(egui::RichText::new(text).size(18.0).color(ACCENT));
}
