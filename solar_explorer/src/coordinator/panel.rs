//! Display-side state owned by the coordinator: info panel, loading overlay
//! and the mirrored simulation controls.

use crate::data::{BodyInfo, Relationship};

pub const DEFAULT_TITLE: &str = "Solar System Simulation";
pub const DEFAULT_LINES: [&str; 3] = [
    "Click on any planet to learn more about it.",
    "Hold Shift and click two planets to see their relationship.",
    "Drag to rotate the camera, scroll to zoom.",
];
pub const BOOTSTRAP_ERROR: &str =
    "Failed to connect to server. Please make sure the backend is running.";

/// What the info panel is currently showing.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum InfoPanel {
    #[default]
    Default,
    Body(BodyInfo),
    SelectionPrompt {
        name: String,
    },
    Relationship(Relationship),
}

impl InfoPanel {
    pub fn title(&self) -> String {
        match self {
            InfoPanel::Default => DEFAULT_TITLE.to_string(),
            InfoPanel::Body(info) => info.name.clone(),
            InfoPanel::SelectionPrompt { .. } => "Selection Mode".to_string(),
            InfoPanel::Relationship(rel) => format!("{} & {}", rel.body1, rel.body2),
        }
    }

    /// The close control is hidden only on the default message.
    pub fn shows_close(&self) -> bool {
        !matches!(self, InfoPanel::Default)
    }
}

/// Startup gate for the UI. `Failed` is terminal; the user has to restart.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadingState {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

/// Client-side mirror of server-authoritative controls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationControls {
    pub paused: bool,
    pub speed: f32,
}

impl Default for SimulationControls {
    fn default() -> Self {
        Self {
            paused: false,
            speed: 1.0,
        }
    }
}

impl SimulationControls {
    /// Icon and caption for the pause control: what pressing it will do.
    pub fn pause_label(&self) -> (&'static str, &'static str) {
        if self.paused {
            ("▶", "Play")
        } else {
            ("⏸", "Pause")
        }
    }
}

pub fn format_speed(speed: f32) -> String {
    format!("{speed:.1}x")
}

pub fn format_time(time: f64) -> String {
    format!("{time:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relationship_title_joins_both_names() {
        let panel = InfoPanel::Relationship(Relationship {
            body1: "Earth".into(),
            body2: "Mars".into(),
            relationship: "neighbours".into(),
            current_distance: Some(20.0),
        });

        assert_eq!(panel.title(), "Earth & Mars");
        assert!(panel.shows_close());
        assert!(!InfoPanel::Default.shows_close());
    }

    #[test]
    fn displays_use_fixed_precision() {
        assert_eq!(format_speed(2.5), "2.5x");
        assert_eq!(format_speed(1.0), "1.0x");
        assert_eq!(format_time(0.0), "0.00");
        assert_eq!(format_time(12.346), "12.35");
    }
}
