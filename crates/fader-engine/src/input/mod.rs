//! Input subsystem.
//!
//! Public API is platform-agnostic. `platform::winit` translates window
//! events into `InputEvent`s; the runtime buffers them into an `InputFrame`
//! that the app drains once per frame.

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    MouseWheelDelta,
    PointerButtonEvent,
    PointerMoveEvent,
    LINES_PER_NOTCH,
    LINE_HEIGHT_PX,
};
