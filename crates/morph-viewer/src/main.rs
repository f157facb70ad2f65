//! Interactive blend-shape viewer.
//!
//! Loads a base mesh and its blend shapes from a manifest, packs the deltas
//! into a storage buffer and blends them in the vertex shader. Weights are
//! edited from the keyboard; the mouse spins, pans and zooms the model.

mod camera;
mod cli;
mod input;
mod loader;
mod material;
mod overlay;
mod scene;
mod weights;

use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::settings::{RenderCreation, WgpuFeatures, WgpuSettings};
use bevy_egui::EguiPlugin;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use morph_targets::DemoState;

use camera::CameraControllerPlugin;
use input::{Demo, DemoInputPlugin};
use material::MorphMaterialPlugin;
use overlay::OverlayPlugin;
use scene::MorphScenePlugin;
use weights::WeightUploadPlugin;

const TITLE: &str = "Blend Shapes";

fn main() -> AppExit {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = cli::Args::parse();
    let scene = match loader::load_scene(&args) {
        Ok(scene) => scene,
        Err(e) => {
            tracing::error!("{e}");
            return AppExit::error();
        }
    };
    let demo = Demo(DemoState::new(scene.targets.shape_count));

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: TITLE.into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(RenderPlugin {
                    // Wireframe display needs line polygon mode.
                    render_creation: RenderCreation::Automatic(WgpuSettings {
                        features: WgpuFeatures::POLYGON_MODE_LINE,
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(EguiPlugin::default())
        .insert_resource(ClearColor(Color::srgb(0.4, 0.4, 0.4)))
        .insert_resource(scene)
        .insert_resource(demo)
        .add_plugins((
            MorphMaterialPlugin,
            MorphScenePlugin,
            CameraControllerPlugin,
            DemoInputPlugin,
            WeightUploadPlugin,
            OverlayPlugin,
        ))
        .run()
}
