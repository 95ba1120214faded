//! Fader engine crate.
//!
//! Platform + GPU runtime used by the cross-fade demo: window loop, input
//! translation, wgpu device/surface, off-screen targets and render passes.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod mesh;
pub mod paint;
pub mod render;
