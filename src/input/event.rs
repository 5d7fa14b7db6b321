/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// converts them into [`Command`](crate::session::Command) values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel, using the browser sign convention.
    Scroll {
        /// Scroll amount (positive = zoom out, negative = zoom in).
        delta: f32,
    },
    /// Modifier key state changed.
    ModifiersChanged {
        /// Whether the shift key is held.
        shift: bool,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

#[cfg(feature = "viewer")]
impl MouseButton {
    /// The orbit-relevant button for a winit button. Back, forward and
    /// vendor buttons map to `None` and never start a drag.
    #[must_use]
    pub fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        use winit::event::MouseButton as Winit;
        match button {
            Winit::Left => Some(Self::Left),
            Winit::Right => Some(Self::Right),
            Winit::Middle => Some(Self::Middle),
            Winit::Back | Winit::Forward | Winit::Other(_) => None,
        }
    }
}

#[cfg(all(test, feature = "viewer"))]
mod tests {
    use winit::event::MouseButton as Winit;

    use super::*;

    #[test]
    fn side_buttons_are_ignored() {
        assert_eq!(MouseButton::from_winit(Winit::Left), Some(MouseButton::Left));
        assert_eq!(MouseButton::from_winit(Winit::Right), Some(MouseButton::Right));
        assert_eq!(MouseButton::from_winit(Winit::Back), None);
        assert_eq!(MouseButton::from_winit(Winit::Forward), None);
        assert_eq!(MouseButton::from_winit(Winit::Other(9)), None);
    }
}
