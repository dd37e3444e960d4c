//! Body and ring materials.

use bevy::log::warn;
use bevy::prelude::*;

/// The one body that glows.
const EMISSIVE_BODY: &str = "Sun";
const EMISSIVE_STRENGTH: f32 = 0.5;

/// Parses `#rrggbb` (or `rrggbb`). Anything else falls back to white.
pub fn parse_body_color(hex: &str) -> Color {
    match Srgba::hex(hex) {
        Ok(color) => Color::Srgba(color),
        Err(err) => {
            warn!("invalid body color {hex:?}: {err}");
            Color::WHITE
        }
    }
}

pub fn body_material(
    materials: &mut Assets<StandardMaterial>,
    name: &str,
    color: Color,
) -> Handle<StandardMaterial> {
    let emissive = if name == EMISSIVE_BODY {
        color.to_linear() * EMISSIVE_STRENGTH
    } else {
        LinearRgba::BLACK
    };
    materials.add(StandardMaterial {
        base_color: color,
        emissive,
        ..default()
    })
}

/// Flat, unlit and visible from both sides.
pub fn ring_material(
    materials: &mut Assets<StandardMaterial>,
    color: Color,
) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: color,
        unlit: true,
        cull_mode: None,
        double_sided: true,
        ..default()
    })
}
