use crate::foundation::core::{Point, Viewport};
use crate::foundation::error::{OrreryError, OrreryResult};
use crate::particles::layer::ParticleLayer;
use crate::particles::renderer::ParticleRenderer;
use crate::render::draw::{Painter, RasterImage};
use std::sync::Arc;

struct Target {
    width: u32,
    height: u32,
    texture: vello::wgpu::Texture,
    view: vello::wgpu::TextureView,
    readback: vello::wgpu::Buffer,
    bytes_per_row: u32,
}

/// Accelerated particle renderer: the layer is encoded as a `vello` scene, rendered offscreen
/// with `wgpu`, read back and placed on the painter as a full-surface image.
pub struct VelloParticleRenderer {
    device: vello::wgpu::Device,
    queue: vello::wgpu::Queue,
    renderer: vello::Renderer,
    scene: vello::Scene,
    target: Option<Target>,
    viewport: Viewport,
    center: Point,
    layer: Option<ParticleLayer>,
}

impl VelloParticleRenderer {
    /// Acquire a GPU device. Fails when no adapter is available.
    pub fn new(viewport: Viewport) -> OrreryResult<Self> {
        let instance = vello::wgpu::Instance::new(&vello::wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(instance.request_adapter(
            &vello::wgpu::RequestAdapterOptions {
                power_preference: vello::wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            },
        ))
        .map_err(|e| match e {
            vello::wgpu::RequestAdapterError::NotFound { .. } => {
                OrreryError::render("no gpu adapter available")
            }
            other => OrreryError::render(format!("wgpu request_adapter failed: {other:?}")),
        })?;

        let (device, queue) =
            pollster::block_on(adapter.request_device(&vello::wgpu::DeviceDescriptor {
                label: Some("orrery_particles"),
                required_features: vello::wgpu::Features::empty(),
                required_limits: vello::wgpu::Limits::default(),
                experimental_features: vello::wgpu::ExperimentalFeatures::default(),
                memory_hints: vello::wgpu::MemoryHints::Performance,
                trace: vello::wgpu::Trace::Off,
            }))
            .map_err(|e| OrreryError::render(format!("wgpu request_device failed: {e:?}")))?;

        let renderer = vello::Renderer::new(&device, vello::RendererOptions::default())
            .map_err(|e| OrreryError::render(format!("vello renderer init failed: {e:?}")))?;

        tracing::debug!("gpu particle renderer ready");
        Ok(Self {
            device,
            queue,
            renderer,
            scene: vello::Scene::new(),
            target: None,
            viewport,
            center: viewport.center(),
            layer: None,
        })
    }

    fn ensure_target(&mut self) -> OrreryResult<()> {
        let (w, h) = self.viewport.pixel_size()?;
        let (width, height) = (u32::from(w), u32::from(h));
        if self
            .target
            .as_ref()
            .is_some_and(|t| t.width == width && t.height == height)
        {
            return Ok(());
        }

        let texture = self.device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("orrery_particles_target"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::TEXTURE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        let bytes_per_row = align_to(width * 4, vello::wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);
        let readback = self.device.create_buffer(&vello::wgpu::BufferDescriptor {
            label: Some("orrery_particles_readback"),
            size: u64::from(bytes_per_row) * u64::from(height),
            usage: vello::wgpu::BufferUsages::MAP_READ | vello::wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        self.target = Some(Target {
            width,
            height,
            texture,
            view,
            readback,
            bytes_per_row,
        });
        Ok(())
    }

    fn encode(&mut self, alpha: f64) {
        self.scene.reset();
        let Some(layer) = &self.layer else {
            return;
        };
        let transform = kurbo::Affine::translate(self.center.to_vec2())
            * kurbo::Affine::rotate(layer.rotation);
        let c = layer.config().color;
        for i in 0..layer.len() {
            let a = f64::from(layer.alphas()[i]) * alpha;
            if a <= 0.05 {
                continue;
            }
            let color = c.with_alpha_mul(a);
            self.scene.fill(
                vello::peniko::Fill::NonZero,
                transform,
                vello::peniko::Color::from_rgba8(color.r, color.g, color.b, color.a),
                None,
                &kurbo::Circle::new(layer.position(i), f64::from(layer.sizes()[i])),
            );
        }
    }

    fn render_and_read(&mut self) -> OrreryResult<RasterImage> {
        self.ensure_target()?;
        let target = self
            .target
            .as_ref()
            .ok_or_else(|| OrreryError::render("gpu target not initialized"))?;

        self.renderer
            .render_to_texture(
                &self.device,
                &self.queue,
                &self.scene,
                &target.view,
                &vello::RenderParams {
                    base_color: vello::peniko::Color::from_rgba8(0, 0, 0, 0),
                    width: target.width,
                    height: target.height,
                    antialiasing_method: vello::AaConfig::Area,
                },
            )
            .map_err(|e| OrreryError::render(format!("vello render failed: {e:?}")))?;

        let mut encoder =
            self.device
                .create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("orrery_particles_readback_encoder"),
                });
        encoder.copy_texture_to_buffer(
            vello::wgpu::TexelCopyTextureInfo {
                texture: &target.texture,
                mip_level: 0,
                origin: vello::wgpu::Origin3d::ZERO,
                aspect: vello::wgpu::TextureAspect::All,
            },
            vello::wgpu::TexelCopyBufferInfo {
                buffer: &target.readback,
                layout: vello::wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(target.bytes_per_row),
                    rows_per_image: Some(target.height),
                },
            },
            vello::wgpu::Extent3d {
                width: target.width,
                height: target.height,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(Some(encoder.finish()));

        let slice = target.readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(vello::wgpu::MapMode::Read, move |res| {
            let _ = tx.send(res);
        });
        self.device
            .poll(vello::wgpu::PollType::wait_indefinitely())
            .map_err(|e| OrreryError::render(format!("wgpu poll failed: {e:?}")))?;
        rx.recv()
            .map_err(|_| OrreryError::render("readback channel closed"))?
            .map_err(|e| OrreryError::render(format!("readback map failed: {e:?}")))?;

        let mapped = slice.get_mapped_range();
        let row_bytes = target.width as usize * 4;
        let mut data = Vec::with_capacity(row_bytes * target.height as usize);
        for row in 0..target.height as usize {
            let start = row * target.bytes_per_row as usize;
            data.extend_from_slice(&mapped[start..start + row_bytes]);
        }
        drop(mapped);
        target.readback.unmap();

        Ok(RasterImage {
            width: target.width,
            height: target.height,
            data,
        })
    }
}

impl ParticleRenderer for VelloParticleRenderer {
    fn name(&self) -> &'static str {
        "vello"
    }

    fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    fn sync(&mut self, layer: &ParticleLayer) {
        self.layer = Some(layer.clone());
    }

    fn draw(&mut self, painter: &mut Painter, alpha: f64) -> OrreryResult<()> {
        if self.layer.is_none() {
            return Ok(());
        }
        self.encode(alpha);
        let image = self.render_and_read()?;
        painter.save();
        painter.set_alpha(1.0);
        painter.image(Arc::new(image), Point::ZERO);
        painter.restore();
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

fn align_to(value: u32, alignment: u32) -> u32 {
    let mask = alignment - 1;
    (value + mask) & !mask
}
