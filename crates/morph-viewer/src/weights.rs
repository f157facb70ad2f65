//! Per-frame upload of the blend weights.

use bevy::prelude::*;
use bevy::render::storage::ShaderStorageBuffer;

use crate::input::Demo;
use crate::material::{MorphMaterial, MorphMaterialHandle};

/// Plugin writing weight changes into the material's storage buffer.
pub struct WeightUploadPlugin;

impl Plugin for WeightUploadPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PostUpdate, upload_weights);
    }
}

/// Rewrite the weight buffer when the weights differ from the last upload.
#[allow(clippy::needless_pass_by_value)]
fn upload_weights(
    demo: Res<Demo>,
    handle: Option<Res<MorphMaterialHandle>>,
    materials: Res<Assets<MorphMaterial>>,
    mut buffers: ResMut<Assets<ShaderStorageBuffer>>,
    mut uploaded: Local<Vec<f32>>,
) {
    let weights = demo.weights.weights();
    if uploaded.as_slice() == weights {
        return;
    }
    let Some(handle) = handle else {
        return;
    };
    let Some(material) = materials.get(&handle.0) else {
        return;
    };
    let Some(buffer) = buffers.get_mut(&material.extension.weights) else {
        return;
    };

    buffer.set_data(weights.to_vec());
    uploaded.clear();
    uploaded.extend_from_slice(weights);
}
