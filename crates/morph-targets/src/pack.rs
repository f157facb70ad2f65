//! Morph target packing.
//!
//! The base mesh is unrolled into one vertex per face corner. For each of
//! those vertices the packed buffer holds `N` position deltas followed by
//! `N` normal deltas, where `N` is the number of blend shapes:
//!
//! ```text
//! deltas[v * 2N + s]     = shape[s].position - base.position   (w = 1)
//! deltas[v * 2N + N + s] = shape[s].normal   - base.normal     (w = 1)
//! ```
//!
//! The vertex shader indexes the buffer with the same formula, so the order
//! here must not change.

use glam::{Vec3, Vec4};

use crate::error::{MorphError, MorphResult};
use crate::mesh::{BlendShape, MorphVertex, TriMesh};

/// Packed morph data ready for upload.
#[derive(Debug, Clone, Default)]
pub struct MorphTargets {
    /// Base mesh, one entry per face corner.
    pub vertices: Vec<MorphVertex>,
    /// Interleaved position and normal deltas.
    pub deltas: Vec<Vec4>,
    /// Number of blend shapes packed per vertex.
    pub shape_count: usize,
}

impl MorphTargets {
    /// Number of unrolled vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Offset of the first delta belonging to `vertex`.
    #[must_use]
    pub fn stride_offset(&self, vertex: usize) -> usize {
        vertex * self.shape_count * 2
    }

    /// Position delta of `shape` for `vertex`.
    #[must_use]
    pub fn position_delta(&self, vertex: usize, shape: usize) -> Vec4 {
        self.deltas[self.stride_offset(vertex) + shape]
    }

    /// Normal delta of `shape` for `vertex`.
    #[must_use]
    pub fn normal_delta(&self, vertex: usize, shape: usize) -> Vec4 {
        self.deltas[self.stride_offset(vertex) + self.shape_count + shape]
    }

    /// Blend one vertex on the CPU, matching the vertex shader.
    ///
    /// Missing weights count as zero. The normal is not renormalized.
    #[must_use]
    pub fn blend(&self, vertex: usize, weights: &[f32]) -> MorphVertex {
        let base = self.vertices[vertex];
        let (position, normal) = weights.iter().take(self.shape_count).enumerate().fold(
            (base.position, base.normal),
            |(position, normal), (shape, &weight)| {
                (
                    position + weight * self.position_delta(vertex, shape).truncate(),
                    normal + weight * self.normal_delta(vertex, shape).truncate(),
                )
            },
        );
        MorphVertex { position, normal }
    }

    /// Raw bytes of [`Self::deltas`] for GPU upload.
    #[must_use]
    pub fn delta_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.deltas)
    }
}

/// Pack the differences between each blend shape and the base mesh.
///
/// Faces come from the base mesh; blend shapes must have the same number of
/// positions and normals so the base indices address them too.
pub fn pack_morph_targets(base: &TriMesh, shapes: &[BlendShape]) -> MorphResult<MorphTargets> {
    if shapes.is_empty() {
        return Err(MorphError::NoBlendShapes);
    }
    for shape in shapes {
        let mesh = &shape.mesh;
        if mesh.positions.len() != base.positions.len() || mesh.normals.len() != base.normals.len()
        {
            return Err(MorphError::TopologyMismatch {
                name: shape.name.clone(),
                positions: mesh.positions.len(),
                normals: mesh.normals.len(),
                base_positions: base.positions.len(),
                base_normals: base.normals.len(),
            });
        }
    }

    let shape_count = shapes.len();
    let corner_count = base.faces.len() * 3;
    let mut vertices = Vec::with_capacity(corner_count);
    let mut deltas = Vec::with_capacity(corner_count * shape_count * 2);

    for face in &base.faces {
        for corner in 0..3 {
            let base_vertex = base.corner(face, corner);

            let position_index = face.vertices[corner] as usize;
            deltas.extend(shapes.iter().map(|shape| {
                delta(shape.mesh.positions[position_index], base_vertex.position)
            }));

            let normal_index = face.normals[corner] as usize;
            deltas.extend(
                shapes
                    .iter()
                    .map(|shape| delta(shape.mesh.normals[normal_index], base_vertex.normal)),
            );

            vertices.push(base_vertex);
        }
    }

    tracing::info!(
        "Packed {} blend shapes over {} faces: {} deltas ({} bytes)",
        shape_count,
        base.faces.len(),
        deltas.len(),
        deltas.len() * std::mem::size_of::<Vec4>()
    );

    Ok(MorphTargets {
        vertices,
        deltas,
        shape_count,
    })
}

fn delta(target: Vec3, base: Vec3) -> Vec4 {
    (target - base).extend(1.0)
}
