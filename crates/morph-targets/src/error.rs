//! Error types for loading and packing.

use std::io;
use std::path::PathBuf;

/// Errors raised while reading manifests and meshes or packing targets.
#[derive(Debug, thiserror::Error)]
pub enum MorphError {
    /// The manifest file could not be read.
    #[error("failed to read manifest {}: {source}", path.display())]
    ManifestIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A recognized directive is missing one of its fields.
    #[error("manifest line {line}: `{directive}` is missing its {field}")]
    MissingField {
        line: usize,
        directive: &'static str,
        field: &'static str,
    },

    /// The manifest never named a base mesh.
    #[error("manifest does not contain a BaseMesh line")]
    NoBaseMesh,

    /// An OBJ file could not be loaded.
    #[error("failed to load mesh {}: {source}", path.display())]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    /// An OBJ file has faces but no vertex normals.
    #[error("mesh {} has no vertex normals", path.display())]
    MissingNormals { path: PathBuf },

    /// There is nothing to blend.
    #[error("no blend shapes to pack")]
    NoBlendShapes,

    /// A blend shape does not share the base mesh topology.
    #[error(
        "blend shape `{name}` has {positions} positions and {normals} normals, \
         base mesh has {base_positions} and {base_normals}"
    )]
    TopologyMismatch {
        name: String,
        positions: usize,
        normals: usize,
        base_positions: usize,
        base_normals: usize,
    },
}

/// Result type for this crate.
pub type MorphResult<T> = Result<T, MorphError>;
