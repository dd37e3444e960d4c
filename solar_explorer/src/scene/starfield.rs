//! Backdrop of random stars, one point-list mesh.

use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;
use rand::Rng;

const STAR_COUNT: usize = 2_000;
const FIELD_EXTENT: f32 = 2_000.0;

#[derive(Component)]
pub struct StarField;

pub fn spawn_star_field(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let mut rng = rand::thread_rng();
    let positions = star_positions(&mut rng, STAR_COUNT, FIELD_EXTENT);

    let mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions);

    commands.spawn((
        StarField,
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        })),
        Transform::IDENTITY,
    ));
}

/// Uniform points in a cube of side `extent` centered on the origin.
fn star_positions(rng: &mut impl Rng, count: usize, extent: f32) -> Vec<[f32; 3]> {
    let half = extent / 2.0;
    (0..count)
        .map(|_| {
            [
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
            ]
        })
        .collect()
}
