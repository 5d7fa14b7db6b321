//! Input handling: event types and the input processor that converts raw
//! window events into session commands.

/// Platform-agnostic input events.
pub mod event;
/// Bindable key actions.
pub mod keyboard;
/// Converts raw events into session commands.
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use keyboard::KeyAction;
pub use processor::InputProcessor;
