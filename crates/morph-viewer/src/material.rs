//! Morph material: standard PBR shading with a blend-shape vertex stage.
//!
//! The vertex shader reads packed deltas from a storage buffer and adds
//! `weight[s] * delta[v * 2N + s]` for every shape `s`. Wireframe display
//! is a pipeline key so toggling it re-specializes the pipeline.

use bevy::asset::{RenderAssetUsages, embedded_asset};
use bevy::mesh::MeshVertexBufferLayoutRef;
use bevy::pbr::{
    ExtendedMaterial, MaterialExtension, MaterialExtensionKey, MaterialExtensionPipeline,
};
use bevy::prelude::*;
use bevy::render::render_resource::{
    AsBindGroup, PolygonMode, RenderPipelineDescriptor, SpecializedMeshPipelineError,
};
use bevy::render::storage::ShaderStorageBuffer;
use bevy::shader::ShaderRef;

use morph_targets::MorphTargets;

use crate::input::Demo;

const SHADER_PATH: &str = "embedded://morph_viewer/shaders/morph.wgsl";

/// Material used for the morphing mesh.
pub type MorphMaterial = ExtendedMaterial<StandardMaterial, MorphExtension>;

/// Plugin registering the morph material and its shader.
pub struct MorphMaterialPlugin;

impl Plugin for MorphMaterialPlugin {
    fn build(&self, app: &mut App) {
        embedded_asset!(app, "shaders/morph.wgsl");
        app.add_plugins(MaterialPlugin::<MorphMaterial>::default())
            .add_systems(Update, sync_polygon_mode);
    }
}

/// Blend-shape bindings appended to [`StandardMaterial`].
#[derive(Asset, AsBindGroup, Reflect, Debug, Clone)]
#[bind_group_data(MorphKey)]
pub struct MorphExtension {
    /// Packed position and normal deltas, read-only after upload.
    #[storage(100, read_only)]
    pub deltas: Handle<ShaderStorageBuffer>,
    /// One weight per blend shape, rewritten when weights change.
    #[storage(101, read_only)]
    pub weights: Handle<ShaderStorageBuffer>,
    pub wireframe: bool,
}

/// Pipeline key derived from [`MorphExtension`].
#[repr(C)]
#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MorphKey {
    wireframe: u32,
}

impl From<&MorphExtension> for MorphKey {
    fn from(extension: &MorphExtension) -> Self {
        Self {
            wireframe: u32::from(extension.wireframe),
        }
    }
}

impl MaterialExtension for MorphExtension {
    fn vertex_shader() -> ShaderRef {
        SHADER_PATH.into()
    }

    fn specialize(
        _pipeline: &MaterialExtensionPipeline,
        descriptor: &mut RenderPipelineDescriptor,
        _layout: &MeshVertexBufferLayoutRef,
        key: MaterialExtensionKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        if key.bind_group_data.wireframe != 0 {
            descriptor.primitive.polygon_mode = PolygonMode::Line;
        }
        Ok(())
    }
}

impl MorphExtension {
    /// Upload packed targets once and create the weight buffer.
    pub fn new(targets: &MorphTargets, buffers: &mut Assets<ShaderStorageBuffer>) -> Self {
        let deltas = ShaderStorageBuffer::new(targets.delta_bytes(), RenderAssetUsages::RENDER_WORLD);
        let weights = ShaderStorageBuffer::from(vec![0.0_f32; targets.shape_count]);
        Self {
            deltas: buffers.add(deltas),
            weights: buffers.add(weights),
            wireframe: false,
        }
    }
}

/// Handle of the morph material, for systems that update it.
#[derive(Resource)]
pub struct MorphMaterialHandle(pub Handle<MorphMaterial>);

/// Mirror the requested polygon mode into the material key.
#[allow(clippy::needless_pass_by_value)]
fn sync_polygon_mode(
    demo: Res<Demo>,
    handle: Option<Res<MorphMaterialHandle>>,
    mut materials: ResMut<Assets<MorphMaterial>>,
) {
    let Some(handle) = handle else {
        return;
    };
    if !demo.is_changed() {
        return;
    }

    let wireframe = demo.polygon_mode == morph_targets::PolygonMode::Wireframe;
    let needs_update = materials
        .get(&handle.0)
        .is_some_and(|material| material.extension.wireframe != wireframe);
    if !needs_update {
        return;
    }
    if let Some(material) = materials.get_mut(&handle.0) {
        material.extension.wireframe = wireframe;
        tracing::info!("Wireframe {}", if wireframe { "on" } else { "off" });
    }
}
