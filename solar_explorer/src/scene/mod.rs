pub(crate) mod bodies;
pub(crate) mod labels;
pub(crate) mod materials;
pub(crate) mod picking;
mod starfield;

use bevy::prelude::*;

use crate::data::{BodyCatalog, PositionMap};

pub use bodies::{
    setup_scene, sync_body_transforms, BevyScene, BodyProxy, BodyRegistry, CelestialBody,
    HighlightRing,
};
pub use labels::BodyLabel;
pub use picking::{nearest_hit, ray_sphere_intersect};

/// Renderer-facing operations the coordinator relies on. Implemented by the
/// Bevy scene; swap it to render elsewhere.
pub trait SolarScene {
    /// One proxy per entry, placed at its current position (origin if absent).
    fn create_bodies(&mut self, bodies: &BodyCatalog);
    /// Moves the named bodies; bodies not in `positions` stay where they are.
    fn update_positions(&mut self, positions: &PositionMap);
    /// Attaches a ring to the body, replacing any ring it already has.
    fn highlight_body(&mut self, name: &str, color: Color);
    fn remove_highlight(&mut self, name: &str);
    fn clear_all_highlights(&mut self);
    /// Nearest body hit by the ray, if any.
    fn pick(&self, origin: Vec3, direction: Vec3) -> Option<String>;
}

pub fn scene_plugin(app: &mut App) {
    app.init_resource::<BodyRegistry>()
        .add_systems(Startup, setup_scene)
        .add_systems(
            PostUpdate,
            sync_body_transforms.before(TransformSystem::TransformPropagate),
        )
        .add_systems(
            Update,
            (picking::click_pick_system, labels::draw_labels_system),
        );
}
