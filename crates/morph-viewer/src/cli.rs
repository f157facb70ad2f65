use std::path::PathBuf;

/// Blend-shape viewer
///
/// Loads a base mesh and its blend shapes from a manifest and morphs them
/// on the GPU.
#[derive(Debug, Clone, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Manifest listing `BaseMesh` and `BlendShape` lines.
    #[arg(default_value = "models.txt")]
    pub manifest: PathBuf,

    /// OBJ file drawn for both eyes.
    #[arg(long, default_value = "models/Eyeball.obj")]
    pub eye_mesh: PathBuf,

    /// Skip loading and drawing the eyes.
    #[arg(long)]
    pub no_eyes: bool,
}
