//! Spawning the morph mesh and the eyes.

use bevy::asset::RenderAssetUsages;
use bevy::pbr::ExtendedMaterial;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use bevy::render::storage::ShaderStorageBuffer;

use morph_targets::MorphVertex;

use crate::loader::LoadedScene;
use crate::material::{MorphExtension, MorphMaterial, MorphMaterialHandle};

/// Eye placement relative to the model root: (translation, scale).
const EYES: [(Vec3, Vec3); 2] = [
    (Vec3::new(-1.276, 3.209, 2.271), Vec3::new(0.685, 0.583, 0.583)),
    (Vec3::new(1.276, 3.209, 2.271), Vec3::new(0.685, 0.583, 0.583)),
];

/// Plugin spawning the loaded scene.
pub struct MorphScenePlugin;

impl Plugin for MorphScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_scene);
    }
}

/// Parent of everything the mouse transform moves.
#[derive(Component)]
pub struct MorphRoot;

/// Build a non-indexed triangle list from unrolled vertices.
///
/// The vertex order must match the packed deltas, since the shader looks
/// them up by vertex index.
#[must_use]
pub fn triangle_list(vertices: &[MorphVertex]) -> Mesh {
    let positions: Vec<[f32; 3]> = vertices.iter().map(|v| v.position.to_array()).collect();
    let normals: Vec<[f32; 3]> = vertices.iter().map(|v| v.normal.to_array()).collect();
    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
}

#[allow(clippy::needless_pass_by_value)]
fn spawn_scene(
    mut commands: Commands,
    scene: Res<LoadedScene>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut standard_materials: ResMut<Assets<StandardMaterial>>,
    mut morph_materials: ResMut<Assets<MorphMaterial>>,
    mut buffers: ResMut<Assets<ShaderStorageBuffer>>,
) {
    let morph_mesh = meshes.add(triangle_list(&scene.targets.vertices));
    let morph_material = morph_materials.add(ExtendedMaterial {
        base: StandardMaterial {
            base_color: Color::srgb(0.8, 0.8, 0.8),
            perceptual_roughness: 0.3,
            reflectance: 0.5,
            ..default()
        },
        extension: MorphExtension::new(&scene.targets, &mut buffers),
    });
    commands.insert_resource(MorphMaterialHandle(morph_material.clone()));

    let eyes = scene.eye_mesh.as_ref().map(|eye| {
        (
            meshes.add(triangle_list(&eye.unrolled())),
            standard_materials.add(StandardMaterial {
                base_color: Color::WHITE,
                ..default()
            }),
        )
    });

    commands
        .spawn((MorphRoot, Transform::default(), Visibility::default()))
        .with_children(|root| {
            root.spawn((Mesh3d(morph_mesh), MeshMaterial3d(morph_material)));

            if let Some((mesh, material)) = eyes {
                for (translation, scale) in EYES {
                    root.spawn((
                        Mesh3d(mesh.clone()),
                        MeshMaterial3d(material.clone()),
                        Transform {
                            translation,
                            scale,
                            ..default()
                        },
                    ));
                }
            }
        });

    tracing::info!(
        "Spawned morph mesh: {} vertices, {} blend shapes",
        scene.targets.vertex_count(),
        scene.targets.shape_count
    );
}

#[cfg(test)]
mod tests {
    use bevy::mesh::VertexAttributeValues;

    use super::*;

    #[test]
    fn triangle_list_keeps_vertex_order() {
        let vertices = [
            MorphVertex {
                position: Vec3::X,
                normal: Vec3::Z,
            },
            MorphVertex {
                position: Vec3::Y,
                normal: Vec3::Z,
            },
            MorphVertex {
                position: Vec3::ZERO,
                normal: Vec3::NEG_Z,
            },
        ];
        let mesh = triangle_list(&vertices);

        assert_eq!(mesh.count_vertices(), 3);
        assert!(mesh.indices().is_none());
        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("missing positions");
        };
        assert_eq!(positions[1], [0.0, 1.0, 0.0]);
        let Some(VertexAttributeValues::Float32x3(normals)) =
            mesh.attribute(Mesh::ATTRIBUTE_NORMAL)
        else {
            panic!("missing normals");
        };
        assert_eq!(normals[2], [0.0, 0.0, -1.0]);
    }
}
