//! Translation of winit events into explorer input events.

use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::Key;

use crate::controllers::interactive::events::input::InputEvent;

/// Pixel-precise scrolling reported by touchpads, converted to wheel notches.
const SCROLL_PIXELS_PER_LINE: f64 = 40.0;

/// Maps a window event to an input event, if it is one the explorer uses.
///
/// Resizes are handled by the caller, which also has to resize the surface.
#[must_use]
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::MouseWheel { delta, .. } => scroll(*delta),
        WindowEvent::MouseInput { state, button, .. } => mouse_button(*button, *state),
        WindowEvent::KeyboardInput { event, .. } => key(&event.logical_key, event.state),
        _ => None,
    }
}

#[must_use]
pub fn scroll(delta: MouseScrollDelta) -> Option<InputEvent> {
    let amount = match delta {
        MouseScrollDelta::LineDelta(_, y) => f64::from(y),
        MouseScrollDelta::PixelDelta(position) => position.y / SCROLL_PIXELS_PER_LINE,
    };

    (amount != 0.0).then_some(InputEvent::ZoomDelta(amount))
}

#[must_use]
pub fn mouse_button(button: MouseButton, state: ElementState) -> Option<InputEvent> {
    match (button, state) {
        (MouseButton::Right, ElementState::Pressed) => Some(InputEvent::ResolutionToggle),
        (MouseButton::Left, ElementState::Pressed) => Some(InputEvent::DisplayToggle),
        _ => None,
    }
}

#[must_use]
pub fn key(key: &Key, state: ElementState) -> Option<InputEvent> {
    match (key, state) {
        (Key::Character(text), ElementState::Pressed) if text.eq_ignore_ascii_case("s") => {
            Some(InputEvent::ExportRequested)
        }
        _ => None,
    }
}

/// Raw pointer motion pans only while the cursor is grabbed.
#[must_use]
pub fn mouse_motion(delta: (f64, f64), cursor_grabbed: bool) -> Option<InputEvent> {
    cursor_grabbed.then_some(InputEvent::PanDelta {
        dx: delta.0,
        dy: delta.1,
    })
}
