//! GPU rendering subsystem.
//!
//! Each pass owns its GPU resources (pipelines, buffers, bind groups) and
//! creates them lazily on first use against the format it is asked to
//! render into.
//!
//! Conventions:
//! - 3-D passes use right-handed view space, camera looking down -Z, wgpu
//!   depth range [0, 1].
//! - Overlay geometry is in logical pixels (top-left origin, +Y down); the
//!   vertex shader converts to NDC using a viewport uniform.
//! - Texture coordinates have (0, 0) at the top-left texel.

mod camera;
mod ctx;
mod target;
mod texture;

pub mod passes;

pub use camera::PerspectiveCamera;
pub use ctx::{RenderCtx, RenderTarget};
pub use target::OffscreenTarget;
pub use texture::{linear_clamp_sampler, Texture2d};
