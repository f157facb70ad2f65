//! Load blend-shape manifests and pack morph target deltas for GPU blending.
//!
//! This crate holds everything about the blend-shape demo that does not need
//! a window or a GPU. It is synchronous and deterministic so the viewer can
//! call it from startup code and tests can drive it directly.
//!
//! # Key items
//!
//! - [`Manifest`]: the `BaseMesh` / `BlendShape` directive file
//! - [`TriMesh`]: a triangulated OBJ mesh with separate normal indices
//! - [`pack_morph_targets`]: flatten per-corner deltas into one buffer
//! - [`WeightState`]: per-shape weights and the active selection
//! - [`ViewControl`]: mouse-driven rotation, panning and zoom
//! - [`DemoState`]: all mutable demo state behind a single dispatch

mod error;

pub mod input;
pub mod manifest;
pub mod mesh;
pub mod pack;
pub mod view;
pub mod weights;

pub use error::{MorphError, MorphResult};
pub use input::{DemoState, InputEvent, MouseButton, PolygonMode, WindowMode};
pub use manifest::{BlendShapeEntry, Manifest};
pub use mesh::{BlendShape, Face, MorphVertex, TriMesh};
pub use pack::{MorphTargets, pack_morph_targets};
pub use view::ViewControl;
pub use weights::{Direction, WEIGHT_STEP, WeightState};
