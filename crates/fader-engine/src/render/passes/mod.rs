//! Render passes.
//!
//! - [`scene::ScenePass`]: background + instanced matcap meshes into an
//!   off-screen target
//! - [`crossfade::CrossfadePass`]: blends two off-screen targets onto the
//!   surface
//! - [`overlay::RectRenderer`]: solid screen-space rectangles for debug UI

mod common;

pub mod crossfade;
pub mod overlay;
pub mod scene;
