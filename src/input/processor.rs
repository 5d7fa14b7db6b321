//! Converts raw platform events into session commands.
//!
//! The `InputProcessor` owns all transient input state (cursor tracking,
//! held buttons, modifier keys). Wheel events become dolly-zoom commands and
//! never reach the orbit controls.

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use super::keyboard::KeyAction;
use crate::session::Command;

impl KeyAction {
    /// The command this action stands for.
    #[must_use]
    pub fn to_command(self) -> Command {
        match self {
            Self::ToggleProjection => Command::ToggleProjection,
            Self::ToggleDebug => Command::ToggleDebug,
            Self::FrameContent => Command::FrameContent,
        }
    }
}

/// Converts raw window events into [`Command`]s.
///
/// Left drag rotates, shift+left drag or right drag pans, the wheel
/// dolly-zooms.
#[derive(Debug, Default)]
pub struct InputProcessor {
    last_cursor: Option<Vec2>,
    left_pressed: bool,
    right_pressed: bool,
    shift_pressed: bool,
}

impl InputProcessor {
    /// Create a processor with no buttons held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the shift modifier is held.
    #[must_use]
    pub fn shift_pressed(&self) -> bool {
        self.shift_pressed
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<Command> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseButton { button, pressed } => {
                match button {
                    MouseButton::Left => self.left_pressed = pressed,
                    MouseButton::Right => self.right_pressed = pressed,
                    MouseButton::Middle => {}
                }
                None
            }
            InputEvent::Scroll { delta } => {
                (delta != 0.0).then_some(Command::Zoom { delta })
            }
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                None
            }
        }
    }

    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Option<Command> {
        let current = Vec2::new(x, y);
        let previous = self.last_cursor.replace(current)?;
        let delta = current - previous;
        if delta == Vec2::ZERO {
            return None;
        }

        if self.right_pressed || (self.left_pressed && self.shift_pressed) {
            Some(Command::Pan { delta })
        } else if self.left_pressed {
            Some(Command::Rotate { delta })
        } else {
            None
        }
    }
}
