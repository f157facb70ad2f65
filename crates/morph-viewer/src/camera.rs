//! Fixed camera and mouse-driven model transform.
//!
//! The camera never moves. Mouse drags are accumulated in
//! [`ViewControl`](morph_targets::ViewControl) and applied to the
//! [`MorphRoot`] entity, which carries the morph mesh and the eyes.

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;

use crate::input::Demo;
use crate::scene::MorphRoot;

/// Plugin for the camera, its light and the mouse transform.
pub struct CameraControllerPlugin;

impl Plugin for CameraControllerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraSettings>()
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, apply_view_transform);
    }
}

/// Camera placement and projection.
#[derive(Resource)]
pub struct CameraSettings {
    /// Camera position, also used for the light.
    pub eye: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Point light intensity in lumens.
    pub light_intensity: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 1.5, 15.0),
            target: Vec3::new(0.0, 1.5, 0.0),
            fov_degrees: 45.0,
            near: 0.05,
            far: 350.0,
            light_intensity: 4_000_000.0,
        }
    }
}

#[allow(clippy::needless_pass_by_value)]
fn spawn_camera(mut commands: Commands, settings: Res<CameraSettings>) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: settings.fov_degrees.to_radians(),
            near: settings.near,
            far: settings.far,
            ..default()
        }),
        Tonemapping::None,
        Transform::from_translation(settings.eye).looking_at(settings.target, Vec3::Y),
    ));

    commands.spawn((
        PointLight {
            intensity: settings.light_intensity,
            range: settings.far,
            ..default()
        },
        Transform::from_translation(settings.eye),
    ));
}

/// Copy the accumulated mouse transform onto the model root.
#[allow(clippy::needless_pass_by_value)]
fn apply_view_transform(demo: Res<Demo>, mut query: Query<&mut Transform, With<MorphRoot>>) {
    if !demo.is_changed() {
        return;
    }
    let transform = Transform::from_matrix(demo.view.matrix());
    for mut root in &mut query {
        *root = transform;
    }
}
