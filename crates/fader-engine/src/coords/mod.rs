//! Screen-space geometry used by overlays (the debug panel) and input
//! hit-testing.
//!
//! Canonical CPU space: logical pixels, origin top-left, +X right, +Y down.
//! Overlay renderers convert to NDC in the vertex shader using a viewport
//! uniform.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
