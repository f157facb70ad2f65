//! Mouse-driven model transform.
//!
//! Left-drag spins the model, right-drag pans it and the wheel moves it
//! towards or away from the camera.

use glam::{Mat4, Vec2, Vec3};

/// Degrees of spin per pixel of drag.
pub const ROTATE_DEGREES_PER_PIXEL: f32 = 0.5;
/// World units of pan per pixel of drag.
pub const TRANSLATE_INCREMENT: f32 = 0.01;
/// World units moved per wheel notch.
pub const ZOOM_INCREMENT: f32 = 0.1;

/// Accumulated mouse transform state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewControl {
    /// Rotation about X in degrees.
    pub spin_x: f32,
    /// Rotation about Y in degrees.
    pub spin_y: f32,
    /// Translation applied after rotation.
    pub model_position: Vec3,
    cursor: Vec2,
    rotate_anchor: Option<Vec2>,
    translate_anchor: Option<Vec2>,
}

impl ViewControl {
    /// Start spinning from the current cursor position.
    pub fn begin_rotate(&mut self) {
        self.rotate_anchor = Some(self.cursor);
    }

    pub fn end_rotate(&mut self) {
        self.rotate_anchor = None;
    }

    /// Start panning from the current cursor position.
    pub fn begin_translate(&mut self) {
        self.translate_anchor = Some(self.cursor);
    }

    pub fn end_translate(&mut self) {
        self.translate_anchor = None;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.rotate_anchor.is_some() || self.translate_anchor.is_some()
    }

    /// End any drag whose button is no longer held.
    pub fn release_unheld(&mut self, left: bool, right: bool) {
        if !left {
            self.end_rotate();
        }
        if !right {
            self.end_translate();
        }
    }

    /// Track the cursor, applying a drag if exactly one is in progress.
    pub fn cursor_moved(&mut self, position: Vec2) {
        self.cursor = position;
        match (&mut self.rotate_anchor, &mut self.translate_anchor) {
            (Some(anchor), None) => {
                let diff = position - *anchor;
                *anchor = position;
                self.spin_x += ROTATE_DEGREES_PER_PIXEL * diff.y;
                self.spin_y += ROTATE_DEGREES_PER_PIXEL * diff.x;
            }
            (None, Some(anchor)) => {
                let diff = position - *anchor;
                *anchor = position;
                self.model_position.x += TRANSLATE_INCREMENT * diff.x;
                self.model_position.y -= TRANSLATE_INCREMENT * diff.y;
            }
            _ => {}
        }
    }

    /// Move along Z by one notch per wheel event, by sign only.
    pub fn wheel(&mut self, delta: f32) {
        if delta > 0.0 {
            self.model_position.z += ZOOM_INCREMENT;
        } else if delta < 0.0 {
            self.model_position.z -= ZOOM_INCREMENT;
        }
    }

    /// Model transform: spin about Y, then X, then translate.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.model_position)
            * Mat4::from_rotation_x(self.spin_x.to_radians())
            * Mat4::from_rotation_y(self.spin_y.to_radians())
    }
}
