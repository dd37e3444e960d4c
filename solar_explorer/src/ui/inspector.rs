//! Info panel: default help, body details, selection prompt or relationship.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::coordinator::{Coordinator, InfoPanel, UiAction, DEFAULT_LINES};
use crate::data::{BodyData, Relationship};
use crate::ui::{apply_panel_style, heading, panel_frame, session_ready, MUTED};

pub fn inspector_plugin(app: &mut App) {
    app.add_systems(Update, inspector_panel_system.run_if(session_ready));
}

fn inspector_panel_system(
    mut contexts: EguiContexts,
    coordinator: Res<Coordinator>,
    mut actions: EventWriter<UiAction>,
) {
    let panel = coordinator.panel();

    egui::SidePanel::right("inspector")
        .default_width(280.0)
        .resizable(false)
        .frame(panel_frame())
        .show(contexts.ctx_mut(), |ui| {
            apply_panel_style(ui);

            ui.horizontal(|ui| {
                heading(ui, panel.title());
                if panel.shows_close() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✕").clicked() {
                            actions.send(UiAction::ClearSelection);
                        }
                    });
                }
            });
            ui.add_space(8.0);

            match panel {
                InfoPanel::Default => {
                    for line in DEFAULT_LINES {
                        ui.label(line);
                    }
                }
                InfoPanel::Body(info) => {
                    ui.label(info.info.as_str());
                    ui.add_space(8.0);
                    for line in body_stats(&info.data) {
                        ui.label(line);
                    }
                }
                InfoPanel::SelectionPrompt { name } => {
                    ui.label(format!("{name} selected."));
                    ui.label("Hold Shift and click another planet to see their relationship.");
                }
                InfoPanel::Relationship(rel) => {
                    ui.label(rel.relationship.as_str());
                    ui.add_space(8.0);
                    ui.label(distance_line(rel));
                }
            }

            if panel.shows_close() {
                ui.add_space(12.0);
                ui.label(
                    egui::RichText::new("C or Esc to dismiss")
                        .size(11.0)
                        .color(MUTED),
                );
            }
        });
}

fn body_stats(data: &BodyData) -> [String; 3] {
    [
        format!("Radius          {} units", data.radius),
        format!("Orbital Radius  {} units", data.orbital_radius),
        format!("Orbital Period  {} days", data.orbital_period),
    ]
}

fn distance_line(rel: &Relationship) -> String {
    match rel.current_distance {
        Some(distance) => format!("Current Distance  {distance:.2} units"),
        None => "Current Distance  unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_stats_show_units() {
        let data = BodyData {
            info: String::new(),
            radius: 2.5,
            color: "#4169e1".into(),
            orbital_radius: 50.0,
            orbital_period: 365.25,
            current_position: None,
        };

        let [radius, orbit, period] = body_stats(&data);

        assert_eq!(radius, "Radius          2.5 units");
        assert_eq!(orbit, "Orbital Radius  50 units");
        assert_eq!(period, "Orbital Period  365.25 days");
    }

    #[test]
    fn missing_distance_reads_unknown() {
        let mut rel = Relationship {
            body1: "Earth".into(),
            body2: "Mars".into(),
            relationship: "Neighbours".into(),
            current_distance: None,
        };
        assert_eq!(distance_line(&rel), "Current Distance  unknown");

        rel.current_distance = Some(27.458);
        assert_eq!(distance_line(&rel), "Current Distance  27.46 units");
    }
}
