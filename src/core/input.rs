//! Translation from winit window events to the small set of commands the
//! game understands. Context decides what Select means: begin on the title
//! screen, finish while running, reset on the results screen.

use winit::event::{ElementState, KeyEvent, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Quit,
    MoveLeft,
    MoveRight,
    Select,
    Wheel(f32),
    MouseDown { x: i32, y: i32 },
}

pub fn translate_key(event: &KeyEvent) -> Option<InputEvent> {
    if event.state != ElementState::Pressed || event.repeat {
        return None;
    }
    let PhysicalKey::Code(code) = event.physical_key else {
        return None;
    };
    match code {
        KeyCode::Escape => Some(InputEvent::Quit),
        KeyCode::ArrowLeft | KeyCode::KeyA => Some(InputEvent::MoveLeft),
        KeyCode::ArrowRight | KeyCode::KeyD => Some(InputEvent::MoveRight),
        KeyCode::Space | KeyCode::Enter => Some(InputEvent::Select),
        _ => None,
    }
}

/// Wheel deltas in lines or pixels both normalize to "lines": positive is up.
pub fn translate_wheel(delta: MouseScrollDelta) -> InputEvent {
    let lines = match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => (pos.y as f32) / 24.0,
    };
    InputEvent::Wheel(lines)
}
