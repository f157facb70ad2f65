//! Manifest parsing.
//!
//! The manifest is a flat text file with one directive per line:
//!
//! ```text
//! BaseMesh,models/base.obj
//! BlendShape,smile,models/smile.obj
//! BlendShape,frown,models/frown.obj
//! ```
//!
//! Tokens are separated by commas and line endings. Empty tokens are skipped
//! and unrecognized lines are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MorphError, MorphResult};

const BASE_MESH: &str = "BaseMesh";
const BLEND_SHAPE: &str = "BlendShape";

/// A named blend target declared in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlendShapeEntry {
    /// Display name of the shape.
    pub name: String,
    /// Path to the shape's OBJ file.
    pub path: PathBuf,
}

/// Parsed manifest contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Path to the base mesh.
    pub base_mesh: PathBuf,
    /// Blend shapes in file order.
    pub blend_shapes: Vec<BlendShapeEntry>,
}

impl Manifest {
    /// Read and parse a manifest file.
    ///
    /// Relative mesh paths are resolved against the directory containing
    /// the manifest.
    pub fn load(path: impl AsRef<Path>) -> MorphResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MorphError::ManifestIo {
            path: path.to_path_buf(),
            source,
        })?;

        let mut manifest = Self::parse(&text)?;
        if let Some(dir) = path.parent() {
            manifest.resolve_relative_to(dir);
        }
        Ok(manifest)
    }

    /// Parse manifest text. Paths are kept exactly as written.
    pub fn parse(text: &str) -> MorphResult<Self> {
        let mut base_mesh = None;
        let mut blend_shapes = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;
            let mut tokens = line.split([',', '\r', '\n']).filter(|t| !t.is_empty());

            match tokens.next() {
                Some(BASE_MESH) => {
                    let path = tokens.next().ok_or(MorphError::MissingField {
                        line: line_number,
                        directive: BASE_MESH,
                        field: "path",
                    })?;
                    tracing::info!("Found base mesh {path}");
                    if let Some(previous) = base_mesh.replace(PathBuf::from(path)) {
                        tracing::warn!(
                            "Line {line_number}: BaseMesh replaces earlier {}",
                            previous.display()
                        );
                    }
                }
                Some(BLEND_SHAPE) => {
                    let name = tokens.next().ok_or(MorphError::MissingField {
                        line: line_number,
                        directive: BLEND_SHAPE,
                        field: "name",
                    })?;
                    let path = tokens.next().ok_or(MorphError::MissingField {
                        line: line_number,
                        directive: BLEND_SHAPE,
                        field: "path",
                    })?;
                    tracing::info!("Found blend shape {name} at {path}");
                    blend_shapes.push(BlendShapeEntry {
                        name: name.to_owned(),
                        path: PathBuf::from(path),
                    });
                }
                _ => {}
            }
        }

        Ok(Self {
            base_mesh: base_mesh.ok_or(MorphError::NoBaseMesh)?,
            blend_shapes,
        })
    }

    fn resolve_relative_to(&mut self, dir: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = dir.join(&*path);
            }
        };
        resolve(&mut self.base_mesh);
        for shape in &mut self.blend_shapes {
            resolve(&mut shape.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_base_and_shapes_in_order() {
        let manifest = Manifest::parse(
            "BaseMesh,models/base.obj\n\
             BlendShape,smile,models/smile.obj\n\
             BlendShape,frown,models/frown.obj\n",
        )
        .unwrap();

        assert_eq!(manifest.base_mesh, PathBuf::from("models/base.obj"));
        let names: Vec<_> = manifest.blend_shapes.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["smile", "frown"]);
        assert_eq!(manifest.blend_shapes[1].path, PathBuf::from("models/frown.obj"));
    }

    #[test]
    fn ignores_blank_and_unknown_lines() {
        let manifest = Manifest::parse(
            "\n# comment\nBaseMesh,base.obj\r\n\r\nMaterial,red\nBlendShape,a,a.obj\r\n",
        )
        .unwrap();
        assert_eq!(manifest.base_mesh, PathBuf::from("base.obj"));
        assert_eq!(manifest.blend_shapes.len(), 1);
        assert_eq!(manifest.blend_shapes[0].path, PathBuf::from("a.obj"));
    }

    #[test]
    fn empty_tokens_are_skipped() {
        let manifest = Manifest::parse("BaseMesh,,base.obj\nBlendShape,,a,,a.obj").unwrap();
        assert_eq!(manifest.base_mesh, PathBuf::from("base.obj"));
        assert_eq!(manifest.blend_shapes[0].name, "a");
        assert_eq!(manifest.blend_shapes[0].path, PathBuf::from("a.obj"));
    }

    #[test]
    fn later_base_mesh_wins() {
        let manifest = Manifest::parse("BaseMesh,first.obj\nBaseMesh,second.obj").unwrap();
        assert_eq!(manifest.base_mesh, PathBuf::from("second.obj"));
    }

    #[test]
    fn missing_fields_report_line() {
        let err = Manifest::parse("BaseMesh,base.obj\nBlendShape,smile").unwrap_err();
        assert!(matches!(
            err,
            MorphError::MissingField { line: 2, directive: "BlendShape", field: "path" }
        ));

        let err = Manifest::parse("BaseMesh").unwrap_err();
        assert!(matches!(err, MorphError::MissingField { line: 1, .. }));
    }

    #[test]
    fn base_mesh_is_required() {
        let err = Manifest::parse("BlendShape,a,a.obj").unwrap_err();
        assert!(matches!(err, MorphError::NoBaseMesh));
    }

    #[test]
    fn load_resolves_paths_next_to_manifest() {
        let dir = std::env::temp_dir().join(format!("morph-manifest-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("models.txt");
        fs::write(&path, "BaseMesh,base.obj\nBlendShape,a,/abs/a.obj\n").unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.base_mesh, dir.join("base.obj"));
        assert_eq!(manifest.blend_shapes[0].path, PathBuf::from("/abs/a.obj"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_missing_file_fails() {
        let err = Manifest::load("/nonexistent/models.txt").unwrap_err();
        assert!(matches!(err, MorphError::ManifestIo { .. }));
    }
}
