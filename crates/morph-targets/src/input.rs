//! Input events and the state they act on.
//!
//! Front ends translate their native keyboard and mouse events into
//! [`InputEvent`] and feed them to [`DemoState::dispatch`]. Everything the
//! demo mutates in response to input lives in [`DemoState`].

use glam::Vec2;

use crate::view::ViewControl;
use crate::weights::{Direction, WeightState};

/// How triangles are rasterized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PolygonMode {
    #[default]
    Fill,
    Wireframe,
}

/// Window presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WindowMode {
    #[default]
    Windowed,
    Fullscreen,
}

/// Mouse buttons that drive the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

/// A discrete input the demo responds to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Exit,
    SetPolygonMode(PolygonMode),
    SetWindowMode(WindowMode),
    ChangeWeight(Direction),
    ChangeActiveWeight(Direction),
    ResetWeights,
    MousePressed(MouseButton),
    MouseReleased(MouseButton),
    /// Current held state of the drag buttons.
    ButtonsHeld {
        left: bool,
        right: bool,
    },
    CursorMoved(Vec2),
    Wheel(f32),
}

/// All mutable demo state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemoState {
    pub weights: WeightState,
    pub view: ViewControl,
    pub polygon_mode: PolygonMode,
    pub window_mode: WindowMode,
    pub exit_requested: bool,
}

impl DemoState {
    #[must_use]
    pub fn new(shape_count: usize) -> Self {
        Self {
            weights: WeightState::new(shape_count),
            ..Self::default()
        }
    }

    /// Apply one input event.
    pub fn dispatch(&mut self, event: InputEvent) {
        match event {
            InputEvent::Exit => self.exit_requested = true,
            InputEvent::SetPolygonMode(mode) => self.polygon_mode = mode,
            InputEvent::SetWindowMode(mode) => self.window_mode = mode,
            InputEvent::ChangeWeight(direction) => self.weights.change_weight(direction),
            InputEvent::ChangeActiveWeight(direction) => {
                self.weights.change_active_weight(direction);
            }
            InputEvent::ResetWeights => self.weights.reset_weights(),
            InputEvent::MousePressed(MouseButton::Left) => self.view.begin_rotate(),
            InputEvent::MousePressed(MouseButton::Right) => self.view.begin_translate(),
            InputEvent::MouseReleased(MouseButton::Left) => self.view.end_rotate(),
            InputEvent::MouseReleased(MouseButton::Right) => self.view.end_translate(),
            InputEvent::ButtonsHeld { left, right } => self.view.release_unheld(left, right),
            InputEvent::CursorMoved(position) => self.view.cursor_moved(position),
            InputEvent::Wheel(delta) => self.view.wheel(delta),
        }
    }
}
