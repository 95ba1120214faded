/// Pixels per scrolled text line.
pub const LINE_HEIGHT_PX: f32 = 15.0;

/// Text lines scrolled per wheel notch; winit reports one notch as one line.
pub const LINES_PER_NOTCH: f32 = 3.0;

/// Keyboard key identifier.
///
/// Only the keys the demo binds are named; everything else maps to
/// `Unknown` with the platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    H,
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Mouse wheel delta.
///
/// Sign convention follows winit: positive `y` means the wheel rolled
/// up/away from the user. `Line` comes from notched wheels, `Pixel` from
/// touchpads.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl MouseWheelDelta {
    /// Vertical component in logical pixels.
    pub fn y_pixels(&self) -> f32 {
        match *self {
            MouseWheelDelta::Line { y, .. } => y * LINES_PER_NOTCH * LINE_HEIGHT_PX,
            MouseWheelDelta::Pixel { y, .. } => y,
        }
    }
}

/// Pointer move event in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Pointer button event, with the pointer position at the time of the press.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: f32,
    pub y: f32,
    pub modifiers: Modifiers,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),

    Key {
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
        /// True when the event is a key-repeat.
        repeat: bool,
    },

    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),

    MouseWheel {
        delta: MouseWheelDelta,
        modifiers: Modifiers,
    },

    /// Pointer left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_deltas_scale_to_pixels() {
        let d = MouseWheelDelta::Line { x: 0.0, y: -2.0 };
        assert_eq!(d.y_pixels(), -90.0);
    }

    #[test]
    fn one_notch_is_three_lines() {
        let d = MouseWheelDelta::Line { x: 0.0, y: 1.0 };
        assert_eq!(d.y_pixels(), 45.0);
    }

    #[test]
    fn pixel_deltas_pass_through() {
        let d = MouseWheelDelta::Pixel { x: 3.0, y: 42.5 };
        assert_eq!(d.y_pixels(), 42.5);
    }
}
