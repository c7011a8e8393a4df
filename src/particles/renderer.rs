use crate::foundation::core::{Point, Viewport};
use crate::foundation::error::OrreryResult;
use crate::particles::layer::{ParticleLayer, draw_layer};
use crate::render::draw::Painter;

/// Backend that draws one designated particle layer on behalf of a scene.
///
/// The scene keeps the renderer's center and layer snapshot in sync every tick. Hit-testing
/// never goes through a renderer, so the choice of implementation cannot change what is
/// clickable.
pub trait ParticleRenderer {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;
    /// Logical center the layer rotates around, in screen space.
    fn set_center(&mut self, center: Point);
    /// Take a snapshot of the layer's buffers and rotation.
    fn sync(&mut self, layer: &ParticleLayer);
    /// Draw the last synced snapshot.
    fn draw(&mut self, painter: &mut Painter, alpha: f64) -> OrreryResult<()>;
    /// React to a surface size change.
    fn resize(&mut self, viewport: Viewport);
}

/// Which [`ParticleRenderer`] a galaxy scene uses for its foreground layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleBackend {
    /// Painter ops rasterized with everything else.
    #[default]
    Cpu,
    /// Offscreen `vello` render composited as an image. Requires the `gpu` feature.
    Gpu,
}

/// Default renderer: records the layer as painter circles.
#[derive(Debug, Default)]
pub struct CpuParticleRenderer {
    center: Point,
    layer: Option<ParticleLayer>,
}

impl CpuParticleRenderer {
    /// Renderer with no layer synced yet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ParticleRenderer for CpuParticleRenderer {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    fn sync(&mut self, layer: &ParticleLayer) {
        // Buffers are Arc-backed, so this only copies the rotation.
        self.layer = Some(layer.clone());
    }

    fn draw(&mut self, painter: &mut Painter, alpha: f64) -> OrreryResult<()> {
        if let Some(layer) = &self.layer {
            draw_layer(painter, layer, self.center, alpha);
        }
        Ok(())
    }

    fn resize(&mut self, _viewport: Viewport) {}
}

/// Build the renderer for `backend`, falling back to the CPU renderer when the accelerated one
/// is unavailable.
pub fn create_particle_renderer(
    backend: ParticleBackend,
    viewport: Viewport,
) -> Box<dyn ParticleRenderer> {
    match backend {
        ParticleBackend::Cpu => Box::new(CpuParticleRenderer::new()),
        ParticleBackend::Gpu => gpu_or_cpu(viewport),
    }
}

#[cfg(feature = "gpu")]
fn gpu_or_cpu(viewport: Viewport) -> Box<dyn ParticleRenderer> {
    match crate::particles::gpu::VelloParticleRenderer::new(viewport) {
        Ok(r) => Box::new(r),
        Err(e) => {
            tracing::warn!(error = %e, "gpu particle renderer unavailable, using cpu");
            Box::new(CpuParticleRenderer::new())
        }
    }
}

#[cfg(not(feature = "gpu"))]
fn gpu_or_cpu(_viewport: Viewport) -> Box<dyn ParticleRenderer> {
    tracing::warn!("built without the `gpu` feature, using cpu particle renderer");
    Box::new(CpuParticleRenderer::new())
}

#[cfg(test)]
#[path = "../../tests/unit/particles/renderer.rs"]
mod tests;
