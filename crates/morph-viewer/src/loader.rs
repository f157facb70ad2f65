//! Startup loading of the manifest, meshes and packed morph targets.
//!
//! Everything is read synchronously before the app starts. Any failure is
//! fatal, so the caller logs the error and exits.

use bevy::prelude::*;

use morph_targets::{BlendShape, Manifest, MorphResult, MorphTargets, TriMesh, pack_morph_targets};

use crate::cli::Args;

/// Data loaded from disk, inserted as a resource for the scene to spawn.
#[derive(Resource)]
pub struct LoadedScene {
    /// Blend shape names in manifest order.
    pub shape_names: Vec<String>,
    /// Packed base mesh and deltas.
    pub targets: MorphTargets,
    /// Mesh drawn for each eye, if enabled.
    pub eye_mesh: Option<TriMesh>,
}

/// Load and pack everything named by the command line.
pub(crate) fn load_scene(args: &Args) -> MorphResult<LoadedScene> {
    let manifest = Manifest::load(&args.manifest)?;

    tracing::info!("Loading base mesh {}", manifest.base_mesh.display());
    let base = TriMesh::load_obj(&manifest.base_mesh)?;

    let shapes = manifest
        .blend_shapes
        .iter()
        .map(|entry| {
            tracing::info!("Loading blend shape {} from {}", entry.name, entry.path.display());
            Ok(BlendShape {
                name: entry.name.clone(),
                mesh: TriMesh::load_obj(&entry.path)?,
            })
        })
        .collect::<MorphResult<Vec<_>>>()?;

    let targets = pack_morph_targets(&base, &shapes)?;

    let eye_mesh = if args.no_eyes {
        None
    } else {
        tracing::info!("Loading eye mesh {}", args.eye_mesh.display());
        Some(TriMesh::load_obj(&args.eye_mesh)?)
    };

    Ok(LoadedScene {
        shape_names: shapes.into_iter().map(|shape| shape.name).collect(),
        targets,
        eye_mesh,
    })
}
