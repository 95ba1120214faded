//! Color model shared by the clear pass and overlay renderers.

pub mod color;

pub use color::Color;
