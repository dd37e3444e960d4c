//! Click picking: cast a ray from the cursor and report the nearest body.
//!
//! Uses a plain ray-sphere test against the registry instead of Bevy's mesh
//! picking, so clicks over egui panels can be filtered first.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::coordinator::BodyClicked;
use crate::scene::bodies::{BevyScene, BodyProxy};
use crate::scene::SolarScene;

pub fn click_pick_system(
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut contexts: EguiContexts,
    scene: BevyScene,
    mut clicks: EventWriter<BodyClicked>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }

    if contexts.ctx_mut().is_pointer_over_area() {
        return;
    }

    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((camera, cam_transform)) = cameras.get_single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(cam_transform, cursor_pos) else {
        return;
    };

    let Some(name) = scene.pick(ray.origin, *ray.direction) else {
        return;
    };

    let shift = keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    debug!("clicked {name} (shift: {shift})");
    clicks.send(BodyClicked { name, shift });
}

/// Name of the body whose sphere the ray enters first.
pub fn nearest_hit<'a>(
    origin: Vec3,
    dir: Vec3,
    bodies: impl IntoIterator<Item = (&'a str, &'a BodyProxy)>,
) -> Option<String> {
    let mut best_hit: Option<(&str, f32)> = None;
    for (name, proxy) in bodies {
        if let Some(dist) = ray_sphere_intersect(origin, dir, proxy.position, proxy.radius) {
            if best_hit.is_none_or(|(_, d)| dist < d) {
                best_hit = Some((name, dist));
            }
        }
    }
    best_hit.map(|(name, _)| name.to_string())
}

/// Distance along the ray to the first intersection with the sphere, or
/// `None` on a miss. A ray starting inside the sphere hits at 0.
pub fn ray_sphere_intersect(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let dir = dir.try_normalize()?;
    let to_origin = origin - center;
    let b = to_origin.dot(dir);
    let c = to_origin.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let t_exit = -b + root;
    if t_exit < 0.0 {
        return None;
    }
    Some((-b - root).max(0.0))
}
