//! Body proxies: registry keyed by name, Bevy-backed `SolarScene`, scene setup.

use std::collections::HashMap;
use std::f32::consts::FRAC_PI_2;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::camera::OrbitCamera;
use crate::data::{BodyCatalog, PositionMap};
use crate::scene::labels::{spawn_body_label, LABEL_CLEARANCE};
use crate::scene::picking::nearest_hit;
use crate::scene::{materials, starfield, SolarScene};

const SPHERE_SECTORS: u32 = 32;
const SPHERE_STACKS: u32 = 32;
const RING_SCALE: f32 = 1.5;
const RING_WIDTH: f32 = 0.3;

/// Marker + data for body mesh entities.
#[derive(Component)]
pub struct CelestialBody {
    pub name: String,
    pub radius: f32,
}

/// Marker for the highlight ring around a body.
#[derive(Component)]
pub struct HighlightRing {
    pub body: String,
}

/// Visual proxy for one body: mesh, label and optional ring.
#[derive(Clone, Debug)]
pub struct BodyProxy {
    pub radius: f32,
    pub position: Vec3,
    pub mesh: Entity,
    pub label: Entity,
    pub ring: Option<Entity>,
}

impl BodyProxy {
    pub fn label_position(&self) -> Vec3 {
        self.position + Vec3::Y * (self.radius + LABEL_CLEARANCE)
    }
}

/// Name → proxy. Authoritative for body positions; transforms are synced
/// from here each frame the registry changes.
#[derive(Resource, Default)]
pub struct BodyRegistry {
    proxies: HashMap<String, BodyProxy>,
}

impl BodyRegistry {
    /// Returns false (and keeps the existing proxy) if the name is taken.
    pub fn insert(&mut self, name: impl Into<String>, proxy: BodyProxy) -> bool {
        let name = name.into();
        if self.proxies.contains_key(&name) {
            return false;
        }
        self.proxies.insert(name, proxy);
        true
    }

    pub fn get(&self, name: &str) -> Option<&BodyProxy> {
        self.proxies.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.proxies.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BodyProxy)> {
        self.proxies.iter().map(|(name, proxy)| (name.as_str(), proxy))
    }

    /// Copies every known position from the snapshot. Returns how many
    /// bodies moved; unknown names are skipped.
    pub fn apply_positions(&mut self, positions: &PositionMap) -> usize {
        let mut moved = 0;
        for (name, position) in positions {
            if let Some(proxy) = self.proxies.get_mut(name) {
                proxy.position = (*position).into();
                moved += 1;
            }
        }
        moved
    }

    /// Records `ring` for the body, handing back the ring it replaces.
    pub fn set_ring(&mut self, name: &str, ring: Entity) -> Option<Entity> {
        self.proxies
            .get_mut(name)
            .and_then(|proxy| proxy.ring.replace(ring))
    }

    pub fn take_ring(&mut self, name: &str) -> Option<Entity> {
        self.proxies.get_mut(name).and_then(|proxy| proxy.ring.take())
    }

    pub fn take_all_rings(&mut self) -> Vec<Entity> {
        self.proxies
            .values_mut()
            .filter_map(|proxy| proxy.ring.take())
            .collect()
    }
}

/// Bevy implementation of [`SolarScene`]. Spawns and despawns through
/// `Commands`, so new proxies appear at the next sync point.
#[derive(SystemParam)]
pub struct BevyScene<'w, 's> {
    commands: Commands<'w, 's>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    registry: ResMut<'w, BodyRegistry>,
}

impl SolarScene for BevyScene<'_, '_> {
    fn create_bodies(&mut self, bodies: &BodyCatalog) {
        info!("creating {} bodies", bodies.len());

        for (name, data) in bodies {
            if self.registry.contains(name) {
                warn!("body {name} already exists; skipping");
                continue;
            }

            let position: Vec3 = data.current_position.map(Into::into).unwrap_or_default();
            let color = materials::parse_body_color(&data.color);
            let material = materials::body_material(&mut self.materials, name, color);
            let mesh = self
                .meshes
                .add(Sphere::new(data.radius).mesh().uv(SPHERE_SECTORS, SPHERE_STACKS));

            let mesh_entity = self
                .commands
                .spawn((
                    Mesh3d(mesh),
                    MeshMaterial3d(material),
                    Transform::from_translation(position),
                    CelestialBody {
                        name: name.clone(),
                        radius: data.radius,
                    },
                ))
                .id();

            let mut proxy = BodyProxy {
                radius: data.radius,
                position,
                mesh: mesh_entity,
                label: Entity::PLACEHOLDER,
                ring: None,
            };
            proxy.label = spawn_body_label(&mut self.commands, name, proxy.label_position());
            self.registry.insert(name.clone(), proxy);
        }

        info!("bodies created: {}", self.registry.len());
    }

    fn update_positions(&mut self, positions: &PositionMap) {
        self.registry.apply_positions(positions);
    }

    fn highlight_body(&mut self, name: &str, color: Color) {
        let Some(proxy) = self.registry.get(name) else {
            return;
        };

        let inner = proxy.radius * RING_SCALE;
        let mesh = self.meshes.add(Annulus::new(inner, inner + RING_WIDTH));
        let material = materials::ring_material(&mut self.materials, color);
        let ring = self
            .commands
            .spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_translation(proxy.position)
                    .with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
                HighlightRing {
                    body: name.to_string(),
                },
            ))
            .id();

        if let Some(previous) = self.registry.set_ring(name, ring) {
            self.commands.entity(previous).despawn();
        }
    }

    fn remove_highlight(&mut self, name: &str) {
        if let Some(ring) = self.registry.take_ring(name) {
            self.commands.entity(ring).despawn();
        }
    }

    fn clear_all_highlights(&mut self) {
        for ring in self.registry.take_all_rings() {
            self.commands.entity(ring).despawn();
        }
    }

    fn pick(&self, origin: Vec3, direction: Vec3) -> Option<String> {
        nearest_hit(origin, direction, self.registry.iter())
    }
}

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let orbit = OrbitCamera::default();
    commands.spawn((Camera3d::default(), orbit.transform(), orbit));
    commands.spawn((
        PointLight {
            intensity: 4.0e9,
            range: 2_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0., 0., 0.),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::srgb_u8(0x40, 0x40, 0x40),
        brightness: 400.0,
    });
    starfield::spawn_star_field(&mut commands, &mut meshes, &mut materials);
}

/// Pushes registry positions into mesh, label and ring transforms.
pub fn sync_body_transforms(registry: Res<BodyRegistry>, mut transforms: Query<&mut Transform>) {
    if !registry.is_changed() {
        return;
    }

    for (_, proxy) in registry.iter() {
        if let Ok(mut tf) = transforms.get_mut(proxy.mesh) {
            tf.translation = proxy.position;
        }
        if let Ok(mut tf) = transforms.get_mut(proxy.label) {
            tf.translation = proxy.label_position();
        }
        if let Some(ring) = proxy.ring {
            if let Ok(mut tf) = transforms.get_mut(ring) {
                tf.translation = proxy.position;
            }
        }
    }
}
