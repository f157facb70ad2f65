//! Triangle meshes loaded from Wavefront OBJ files.

use std::path::Path;

use glam::Vec3;

use crate::error::{MorphError, MorphResult};

/// A triangle referencing positions and normals by separate indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// Position indices of the three corners.
    pub vertices: [u32; 3],
    /// Normal indices of the three corners.
    pub normals: [u32; 3],
}

/// A triangulated mesh with independent position and normal lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub faces: Vec<Face>,
}

/// A face corner expanded to its position and normal.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MorphVertex {
    pub position: Vec3,
    pub normal: Vec3,
}

/// A named mesh used as a morph target.
#[derive(Debug, Clone)]
pub struct BlendShape {
    pub name: String,
    pub mesh: TriMesh,
}

impl TriMesh {
    /// Load an OBJ file, triangulating polygons.
    ///
    /// Every object in the file is appended in order, so meshes exported
    /// from the same topology line up index for index.
    pub fn load_obj(path: impl AsRef<Path>) -> MorphResult<Self> {
        let path = path.as_ref();
        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: false,
            ..Default::default()
        };
        let (models, _materials) =
            tobj::load_obj(path, &options).map_err(|source| MorphError::Obj {
                path: path.to_path_buf(),
                source,
            })?;

        let mut mesh = Self::default();
        for model in &models {
            mesh.append(&model.mesh)
                .ok_or_else(|| MorphError::MissingNormals {
                    path: path.to_path_buf(),
                })?;
        }

        tracing::debug!(
            "Loaded {}: {} positions, {} normals, {} faces",
            path.display(),
            mesh.positions.len(),
            mesh.normals.len(),
            mesh.faces.len()
        );
        Ok(mesh)
    }

    /// Append one `tobj` mesh. Returns `None` if it has faces without normals.
    #[allow(clippy::cast_possible_truncation)]
    fn append(&mut self, source: &tobj::Mesh) -> Option<()> {
        if source.indices.is_empty() {
            return Some(());
        }
        if source.normal_indices.len() != source.indices.len() {
            return None;
        }

        let position_offset = self.positions.len() as u32;
        let normal_offset = self.normals.len() as u32;

        self.positions.extend(
            source
                .positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2])),
        );
        self.normals.extend(
            source
                .normals
                .chunks_exact(3)
                .map(|n| Vec3::new(n[0], n[1], n[2])),
        );

        self.faces.extend(
            source
                .indices
                .chunks_exact(3)
                .zip(source.normal_indices.chunks_exact(3))
                .map(|(v, n)| Face {
                    vertices: [v[0], v[1], v[2]].map(|i| i + position_offset),
                    normals: [n[0], n[1], n[2]].map(|i| i + normal_offset),
                }),
        );
        Some(())
    }

    /// Position and normal of one face corner.
    #[must_use]
    pub fn corner(&self, face: &Face, corner: usize) -> MorphVertex {
        MorphVertex {
            position: self.positions[face.vertices[corner] as usize],
            normal: self.normals[face.normals[corner] as usize],
        }
    }

    /// Expand every face into three independent vertices.
    #[must_use]
    pub fn unrolled(&self) -> Vec<MorphVertex> {
        self.faces
            .iter()
            .flat_map(|face| (0..3).map(move |corner| self.corner(face, corner)))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    /// A unit quad split into two triangles, offset along Z.
    pub(crate) fn quad_obj(z: f32) -> String {
        format!(
            "v 0 0 {z}\nv 1 0 {z}\nv 1 1 {z}\nv 0 1 {z}\n\
             vn 0 0 1\n\
             f 1//1 2//1 3//1\nf 1//1 3//1 4//1\n"
        )
    }

    pub(crate) fn write_fixture(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("morph-mesh-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_faces_with_normal_indices() {
        let path = write_fixture("quad.obj", &quad_obj(0.0));
        let mesh = TriMesh::load_obj(&path).unwrap();

        assert_eq!(mesh.positions.len(), 4);
        assert_eq!(mesh.normals.len(), 1);
        assert_eq!(mesh.faces.len(), 2);
        assert!(mesh.faces.iter().all(|f| f.normals == [0, 0, 0]));
    }

    #[test]
    fn triangulates_polygons() {
        let path = write_fixture(
            "poly.obj",
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1 4//1\n",
        );
        let mesh = TriMesh::load_obj(&path).unwrap();
        assert_eq!(mesh.faces.len(), 2);
    }

    #[test]
    fn rejects_meshes_without_normals() {
        let path = write_fixture("bare.obj", "v 0 0 0\nv 1 0 0\nv 1 1 0\nf 1 2 3\n");
        let err = TriMesh::load_obj(&path).unwrap_err();
        assert!(matches!(err, MorphError::MissingNormals { .. }));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = TriMesh::load_obj("/nonexistent/mesh.obj").unwrap_err();
        assert!(matches!(err, MorphError::Obj { .. }));
    }

    #[test]
    fn unrolled_follows_face_corners() {
        let mesh = TriMesh {
            positions: vec![Vec3::X, Vec3::Y, Vec3::Z],
            normals: vec![Vec3::NEG_Z, Vec3::Z],
            faces: vec![Face {
                vertices: [2, 0, 1],
                normals: [1, 1, 0],
            }],
        };
        let corners = mesh.unrolled();
        assert_eq!(corners.len(), 3);
        assert_eq!(corners[0].position, Vec3::Z);
        assert_eq!(corners[1].position, Vec3::X);
        assert_eq!(corners[2].normal, Vec3::NEG_Z);
    }
}
