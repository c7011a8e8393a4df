//! Spiral-arm particle layers and the pluggable renderers that draw them.

#[cfg(feature = "gpu")]
/// `vello`/`wgpu` particle renderer.
pub mod gpu;
/// Layer generation and CPU drawing.
pub mod layer;
/// The [`renderer::ParticleRenderer`] seam.
pub mod renderer;
