//! Floating name labels above each body, painted as screen-space egui text.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

/// Gap between a body's surface and its label.
pub const LABEL_CLEARANCE: f32 = 2.0;
const LABEL_FONT_SIZE: f32 = 14.0;

/// Label anchor; its translation is kept `radius + LABEL_CLEARANCE` above the body.
#[derive(Component)]
pub struct BodyLabel {
    pub name: String,
}

pub fn spawn_body_label(commands: &mut Commands, name: &str, position: Vec3) -> Entity {
    commands
        .spawn((
            BodyLabel {
                name: name.to_string(),
            },
            Transform::from_translation(position),
            Visibility::Visible,
        ))
        .id()
}

/// Projects every label into the viewport and draws it behind the UI panels,
/// so labels always face the viewer.
pub fn draw_labels_system(
    mut contexts: EguiContexts,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    labels: Query<(&BodyLabel, &GlobalTransform)>,
) {
    let Ok((camera, cam_transform)) = cameras.get_single() else {
        return;
    };

    let painter = contexts.ctx_mut().layer_painter(egui::LayerId::background());
    for (label, transform) in &labels {
        let Ok(screen) = camera.world_to_viewport(cam_transform, transform.translation()) else {
            continue;
        };
        painter.text(
            egui::pos2(screen.x, screen.y),
            egui::Align2::CENTER_BOTTOM,
            &label.name,
            egui::FontId::proportional(LABEL_FONT_SIZE),
            egui::Color32::WHITE,
        );
    }
}
