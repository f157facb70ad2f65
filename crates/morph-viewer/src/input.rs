//! Keyboard and mouse handling.
//!
//! Bevy input messages are translated into [`InputEvent`]s and dispatched to
//! the [`Demo`] resource. Window-level effects (fullscreen, exit) are applied
//! afterwards from the resulting state.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::input::ButtonState;
use bevy::input::keyboard::KeyboardInput;
use bevy::prelude::*;
use bevy::window::{MonitorSelection, PrimaryWindow, WindowEvent, WindowMode};
use bevy_egui::input::{egui_wants_any_keyboard_input, egui_wants_any_pointer_input};

use morph_targets::{DemoState, Direction, InputEvent, PolygonMode};

/// Demo state shared by every system.
#[derive(Resource, Deref, DerefMut, Debug, Default)]
pub struct Demo(pub DemoState);

/// Plugin translating input into demo state changes.
pub struct DemoInputPlugin;

impl Plugin for DemoInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                read_keyboard.run_if(not(egui_wants_any_keyboard_input)),
                read_mouse.run_if(not(egui_wants_any_pointer_input)),
                release_unheld_buttons,
                apply_window_mode,
                exit_on_request,
            )
                .chain(),
        );
    }
}

/// Map a key to the event it triggers.
#[must_use]
pub fn key_event(key: KeyCode) -> Option<InputEvent> {
    let event = match key {
        KeyCode::Escape => InputEvent::Exit,
        KeyCode::Digit1 | KeyCode::Numpad1 => InputEvent::SetPolygonMode(PolygonMode::Wireframe),
        KeyCode::Digit2 | KeyCode::Numpad2 => InputEvent::SetPolygonMode(PolygonMode::Fill),
        KeyCode::KeyF => InputEvent::SetWindowMode(morph_targets::WindowMode::Fullscreen),
        KeyCode::KeyN => InputEvent::SetWindowMode(morph_targets::WindowMode::Windowed),
        KeyCode::KeyQ => InputEvent::ChangeWeight(Direction::Down),
        KeyCode::KeyW => InputEvent::ChangeWeight(Direction::Up),
        KeyCode::ArrowLeft => InputEvent::ChangeActiveWeight(Direction::Down),
        KeyCode::ArrowRight => InputEvent::ChangeActiveWeight(Direction::Up),
        KeyCode::Space => InputEvent::ResetWeights,
        _ => return None,
    };
    Some(event)
}

/// Map a Bevy mouse button to the buttons the view reacts to.
#[must_use]
pub fn mouse_button(button: MouseButton) -> Option<morph_targets::MouseButton> {
    match button {
        MouseButton::Left => Some(morph_targets::MouseButton::Left),
        MouseButton::Right => Some(morph_targets::MouseButton::Right),
        _ => None,
    }
}

/// Map a pointer message to the event it triggers.
#[must_use]
pub fn pointer_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::CursorMoved(moved) => Some(InputEvent::CursorMoved(moved.position)),
        WindowEvent::MouseButtonInput(input) => {
            let button = mouse_button(input.button)?;
            Some(match input.state {
                ButtonState::Pressed => InputEvent::MousePressed(button),
                ButtonState::Released => InputEvent::MouseReleased(button),
            })
        }
        WindowEvent::MouseWheel(wheel) => Some(InputEvent::Wheel(wheel.y)),
        _ => None,
    }
}

/// Dispatch key presses, including auto-repeat.
fn read_keyboard(mut keys: MessageReader<KeyboardInput>, mut demo: ResMut<Demo>) {
    for key in keys.read() {
        if key.state != ButtonState::Pressed {
            continue;
        }
        if let Some(event) = key_event(key.key_code) {
            tracing::debug!("Key {:?} -> {:?}", key.key_code, event);
            demo.dispatch(event);
        }
    }
}

/// Dispatch button, cursor and wheel messages in arrival order.
fn read_mouse(mut window_events: MessageReader<WindowEvent>, mut demo: ResMut<Demo>) {
    for event in window_events.read().filter_map(pointer_event) {
        demo.dispatch(event);
    }
}

/// End drags whose button was released while the mouse reader was skipped.
#[allow(clippy::needless_pass_by_value)]
fn release_unheld_buttons(buttons: Res<ButtonInput<MouseButton>>, mut demo: ResMut<Demo>) {
    let left = buttons.pressed(MouseButton::Left);
    let right = buttons.pressed(MouseButton::Right);
    if demo.view.is_dragging() {
        demo.dispatch(InputEvent::ButtonsHeld { left, right });
    }
}

#[allow(clippy::needless_pass_by_value)]
fn apply_window_mode(demo: Res<Demo>, mut window: Single<&mut Window, With<PrimaryWindow>>) {
    if !demo.is_changed() {
        return;
    }
    let mode = match demo.window_mode {
        morph_targets::WindowMode::Windowed => WindowMode::Windowed,
        morph_targets::WindowMode::Fullscreen => {
            WindowMode::BorderlessFullscreen(MonitorSelection::Current)
        }
    };
    if window.mode != mode {
        window.mode = mode;
    }
}

#[allow(clippy::needless_pass_by_value)]
fn exit_on_request(demo: Res<Demo>, mut exit: MessageWriter<AppExit>) {
    if demo.exit_requested {
        tracing::info!("Exit requested");
        exit.write(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use bevy::input::mouse::MouseButtonInput;
    use bevy::window::{CursorMoved, WindowFocused};

    use super::*;

    fn moved(x: f32, y: f32) -> WindowEvent {
        WindowEvent::CursorMoved(CursorMoved {
            window: Entity::PLACEHOLDER,
            position: Vec2::new(x, y),
            delta: None,
        })
    }

    fn button(button: MouseButton, state: ButtonState) -> WindowEvent {
        WindowEvent::MouseButtonInput(MouseButtonInput {
            button,
            state,
            window: Entity::PLACEHOLDER,
        })
    }

    fn replay(demo: &mut Demo, events: &[WindowEvent]) {
        for event in events.iter().filter_map(pointer_event) {
            demo.dispatch(event);
        }
    }

    #[test]
    fn keys_map_to_demo_events() {
        assert_eq!(key_event(KeyCode::Escape), Some(InputEvent::Exit));
        assert_eq!(
            key_event(KeyCode::Digit1),
            Some(InputEvent::SetPolygonMode(PolygonMode::Wireframe))
        );
        assert_eq!(
            key_event(KeyCode::KeyW),
            Some(InputEvent::ChangeWeight(Direction::Up))
        );
        assert_eq!(
            key_event(KeyCode::ArrowLeft),
            Some(InputEvent::ChangeActiveWeight(Direction::Down))
        );
        assert_eq!(key_event(KeyCode::Space), Some(InputEvent::ResetWeights));
        assert_eq!(key_event(KeyCode::KeyZ), None);
    }

    #[test]
    fn only_left_and_right_buttons_drive_the_view() {
        assert_eq!(
            mouse_button(MouseButton::Right),
            Some(morph_targets::MouseButton::Right)
        );
        assert_eq!(mouse_button(MouseButton::Middle), None);
    }

    #[test]
    fn repeated_w_presses_saturate_at_one() {
        let mut demo = Demo(DemoState::new(2));
        for _ in 0..40 {
            if let Some(event) = key_event(KeyCode::KeyW) {
                demo.dispatch(event);
            }
        }
        assert_eq!(demo.weights.weights(), [1.0, 0.0]);
    }

    #[test]
    fn move_after_press_in_one_frame_rotates() {
        let mut demo = Demo(DemoState::new(1));
        replay(&mut demo, &[
            moved(10.0, 10.0),
            button(MouseButton::Left, ButtonState::Pressed),
            moved(20.0, 10.0),
        ]);
        assert_eq!(demo.view.spin_y, 5.0);
    }

    #[test]
    fn move_after_release_in_one_frame_is_ignored() {
        let mut demo = Demo(DemoState::new(1));
        replay(&mut demo, &[
            moved(10.0, 10.0),
            button(MouseButton::Left, ButtonState::Pressed),
            moved(20.0, 10.0),
            button(MouseButton::Left, ButtonState::Released),
            moved(300.0, 200.0),
        ]);
        assert_eq!(demo.view.spin_y, 5.0);
        assert_eq!(demo.view.spin_x, 0.0);
    }

    #[test]
    fn middle_button_and_focus_messages_are_skipped() {
        assert_eq!(
            pointer_event(&button(MouseButton::Middle, ButtonState::Pressed)),
            None
        );
        assert_eq!(
            pointer_event(&button(MouseButton::Right, ButtonState::Released)),
            Some(InputEvent::MouseReleased(morph_targets::MouseButton::Right))
        );
        let focus = WindowEvent::WindowFocused(WindowFocused {
            window: Entity::PLACEHOLDER,
            focused: true,
        });
        assert_eq!(pointer_event(&focus), None);
    }

    #[test]
    fn release_over_ui_does_not_leave_the_view_spinning() {
        let mut app = App::new();
        app.init_resource::<ButtonInput<MouseButton>>()
            .insert_resource(Demo(DemoState::new(1)))
            .add_systems(Update, release_unheld_buttons);

        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        {
            let mut demo = app.world_mut().resource_mut::<Demo>();
            demo.dispatch(InputEvent::MousePressed(morph_targets::MouseButton::Left));
        }
        app.update();
        assert!(app.world().resource::<Demo>().view.is_dragging());

        // The release message went to the overlay; only the held state changed.
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .release(MouseButton::Left);
        app.update();

        let mut demo = app.world_mut().resource_mut::<Demo>();
        assert!(!demo.view.is_dragging());
        demo.dispatch(InputEvent::CursorMoved(Vec2::new(400.0, 300.0)));
        assert_eq!(demo.view.spin_y, 0.0);
    }
}
