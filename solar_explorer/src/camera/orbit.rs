//! OrbitCamera component and systems: drag to rotate, scroll to zoom, damped.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

const MIN_DISTANCE: f32 = 50.0;
const MAX_DISTANCE: f32 = 800.0;
const MAX_PITCH: f32 = 1.5;
const ROTATE_SPEED: f32 = 0.005;
const ZOOM_STEP: f32 = 0.1;
const PIXELS_PER_LINE: f32 = 100.0;
/// Fraction of the remaining gap closed per 60 Hz frame.
const DAMPING: f32 = 0.05;

/// Camera orbiting `target` on a sphere. Input moves the goal angles; the
/// current angles ease toward them each frame.
#[derive(Component, Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    goal_yaw: f32,
    goal_pitch: f32,
    goal_distance: f32,
}

impl Default for OrbitCamera {
    /// Starts at (0, 150, 300) looking at the origin.
    fn default() -> Self {
        Self::looking_from(Vec3::new(0.0, 150.0, 300.0), Vec3::ZERO)
    }
}

impl OrbitCamera {
    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / offset.length().max(f32::EPSILON))
            .asin()
            .clamp(-MAX_PITCH, MAX_PITCH);
        Self {
            target,
            yaw,
            pitch,
            distance,
            goal_yaw: yaw,
            goal_pitch: pitch,
            goal_distance: distance,
        }
    }

    pub fn transform(&self) -> Transform {
        let offset = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        ) * self.distance;
        Transform::from_translation(self.target + offset).looking_at(self.target, Vec3::Y)
    }

    pub fn rotate(&mut self, delta: Vec2) {
        self.goal_yaw -= delta.x * ROTATE_SPEED;
        self.goal_pitch = (self.goal_pitch + delta.y * ROTATE_SPEED).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Positive `lines` zooms in.
    pub fn zoom(&mut self, lines: f32) {
        self.goal_distance =
            (self.goal_distance * (1.0 - lines * ZOOM_STEP)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Eases current angles and distance toward the goal.
    pub fn step(&mut self, delta_secs: f32) {
        let t = 1.0 - (1.0 - DAMPING).powf(delta_secs * 60.0);
        self.yaw += (self.goal_yaw - self.yaw) * t;
        self.pitch += (self.goal_pitch - self.pitch) * t;
        self.distance += (self.goal_distance - self.distance) * t;
    }
}

pub fn orbit_camera_plugin(app: &mut App) {
    app.add_systems(Update, (orbit_input_system, orbit_apply_system).chain());
}

fn orbit_input_system(
    mouse: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    mut contexts: EguiContexts,
    mut cameras: Query<&mut OrbitCamera>,
) {
    if contexts.ctx_mut().wants_pointer_input() {
        return;
    }

    let dragging = mouse.any_pressed([MouseButton::Left, MouseButton::Right]);
    let lines = match scroll.unit {
        MouseScrollUnit::Line => scroll.delta.y,
        MouseScrollUnit::Pixel => scroll.delta.y / PIXELS_PER_LINE,
    };

    for mut orbit in &mut cameras {
        if dragging && motion.delta != Vec2::ZERO {
            orbit.rotate(motion.delta);
        }
        if lines != 0.0 {
            orbit.zoom(lines);
        }
    }
}

fn orbit_apply_system(time: Res<Time>, mut cameras: Query<(&mut OrbitCamera, &mut Transform)>) {
    for (mut orbit, mut transform) in &mut cameras {
        orbit.step(time.delta_secs());
        *transform = orbit.transform();
    }
}
