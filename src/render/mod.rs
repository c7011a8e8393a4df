//! Immediate-mode drawing and rasterization.
//!
//! Scenes record into a [`draw::Painter`]; a [`backend::RenderBackend`] turns the resulting
//! [`draw::DrawList`] into pixels.

/// Backend trait and frame type.
pub mod backend;
/// `vello_cpu` backend.
pub mod cpu;
/// Draw recording.
pub mod draw;
pub(crate) mod text;
