use crate::foundation::color::Rgba8;
use crate::foundation::core::{Affine, Point, Rect};
use crate::foundation::error::{OrreryError, OrreryResult};
use crate::render::backend::{FrameRGBA, RenderBackend, RenderSettings};
use crate::render::draw::{DrawList, DrawOp, RasterImage, TextAlign, TextBaseline};
use crate::render::text::{TextBrushRgba8, TextLayoutEngine};
use kurbo::Shape;
use std::sync::Arc;

const TOLERANCE: f64 = 0.1;
const LINE_STEPS: usize = 8;
const GLOW_RINGS: usize = 12;

/// CPU backend powered by `vello_cpu`.
///
/// Strokes are expanded to fills with `kurbo::stroke`. Gradients are approximated with stepped
/// solid fills: lines are split into short segments and glows into concentric rings.
pub struct CpuBackend {
    text: Option<TextLayoutEngine>,
}

impl CpuBackend {
    /// Create a backend; fails only when the configured font cannot be registered.
    pub fn new(settings: RenderSettings) -> OrreryResult<Self> {
        let text = match settings.font_bytes {
            Some(bytes) => Some(TextLayoutEngine::new(bytes)?),
            None => None,
        };
        Ok(Self { text })
    }

    /// `true` when text ops will be drawn.
    pub fn has_font(&self) -> bool {
        self.text.is_some()
    }

    fn draw_op(&mut self, ctx: &mut vello_cpu::RenderContext, op: &DrawOp) -> OrreryResult<()> {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match op {
            DrawOp::FillCircle {
                center,
                radius,
                color,
            } => {
                set_color(ctx, *color);
                ctx.fill_path(&bezpath_to_cpu(
                    &kurbo::Circle::new(*center, *radius).to_path(TOLERANCE),
                ));
            }
            DrawOp::StrokeCircle {
                center,
                radius,
                width,
                color,
            } => {
                set_color(ctx, *color);
                let outline = stroke_outline(
                    kurbo::Circle::new(*center, *radius).path_elements(TOLERANCE),
                    *width,
                );
                ctx.fill_path(&bezpath_to_cpu(&outline));
            }
            DrawOp::FillRect { rect, color } => {
                set_color(ctx, *color);
                ctx.fill_rect(&rect_to_cpu(*rect));
            }
            DrawOp::StrokeRect { rect, width, color } => {
                set_color(ctx, *color);
                let outline = stroke_outline(rect.path_elements(TOLERANCE), *width);
                ctx.fill_path(&bezpath_to_cpu(&outline));
            }
            DrawOp::Line {
                from,
                to,
                width,
                from_color,
                to_color,
            } => draw_gradient_line(ctx, *from, *to, *width, *from_color, *to_color),
            DrawOp::RadialGlow {
                center,
                radius,
                stops,
            } => draw_glow(ctx, *center, *radius, stops),
            DrawOp::Text {
                text,
                pos,
                size,
                color,
                align,
                baseline,
            } => {
                if let Err(e) = self.draw_text(ctx, text, *pos, *size, *color, *align, *baseline) {
                    tracing::warn!(error = %e, "skipping text op");
                }
            }
            DrawOp::Image {
                image,
                origin,
                opacity,
            } => draw_image(ctx, image, *origin, *opacity)?,
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        pos: Point,
        size: f64,
        color: Rgba8,
        align: TextAlign,
        baseline: TextBaseline,
    ) -> OrreryResult<()> {
        let Some(engine) = self.text.as_mut() else {
            return Ok(());
        };
        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        let layout = engine.layout_line(text, size as f32, brush)?;
        let w = f64::from(layout.width());
        let h = f64::from(layout.height());
        let x = match align {
            TextAlign::Left => pos.x,
            TextAlign::Center => pos.x - w / 2.0,
        };
        let y = match baseline {
            TextBaseline::Top => pos.y,
            TextBaseline::Middle => pos.y - h / 2.0,
        };

        ctx.set_transform(affine_to_cpu(Affine::translate((x, y))));
        let font = engine.font().clone();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let mut pen_x = run.offset();
                let base_y = run.baseline();
                let glyphs = run.glyphs().map(|g| {
                    let glyph = vello_cpu::Glyph {
                        id: g.id,
                        x: pen_x + g.x,
                        y: base_y - g.y,
                    };
                    pen_x += g.advance;
                    glyph
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(skip_all, fields(ops = list.ops.len()))]
    fn render(&mut self, list: &DrawList) -> OrreryResult<FrameRGBA> {
        let (w, h) = list.viewport.pixel_size()?;
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        set_color(&mut ctx, list.background);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(w),
            f64::from(h),
        ));
        for op in &list.ops {
            self.draw_op(&mut ctx, op)?;
        }
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        Ok(FrameRGBA {
            width: u32::from(w),
            height: u32::from(h),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn set_color(ctx: &mut vello_cpu::RenderContext, c: Rgba8) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
}

fn stroke_outline(path: impl IntoIterator<Item = kurbo::PathEl>, width: f64) -> kurbo::BezPath {
    kurbo::stroke(
        path,
        &kurbo::Stroke::new(width).with_caps(kurbo::Cap::Butt),
        &kurbo::StrokeOpts::default(),
        TOLERANCE,
    )
}

fn lerp_color(a: Rgba8, b: Rgba8, t: f64) -> Rgba8 {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| -> u8 {
        (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8
    };
    Rgba8::rgba(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b), mix(a.a, b.a))
}

fn draw_gradient_line(
    ctx: &mut vello_cpu::RenderContext,
    from: Point,
    to: Point,
    width: f64,
    from_color: Rgba8,
    to_color: Rgba8,
) {
    if (to - from).hypot2() < 1e-12 {
        return;
    }
    let steps = if from_color == to_color { 1 } else { LINE_STEPS };
    for i in 0..steps {
        let t0 = i as f64 / steps as f64;
        let t1 = (i + 1) as f64 / steps as f64;
        let color = lerp_color(from_color, to_color, (t0 + t1) / 2.0);
        if color.a == 0 {
            continue;
        }
        let seg = kurbo::Line::new(from.lerp(to, t0), from.lerp(to, t1));
        set_color(ctx, color);
        let outline = stroke_outline(seg.path_elements(TOLERANCE), width);
        ctx.fill_path(&bezpath_to_cpu(&outline));
    }
}

/// Color of a radial gradient at `offset` in `0..=1`.
pub(crate) fn sample_stops(stops: &[(f64, Rgba8)], offset: f64) -> Rgba8 {
    let Some(&(first_o, first_c)) = stops.first() else {
        return Rgba8::TRANSPARENT;
    };
    if offset <= first_o {
        return first_c;
    }
    for pair in stops.windows(2) {
        let (o0, c0) = pair[0];
        let (o1, c1) = pair[1];
        if offset <= o1 {
            let span = o1 - o0;
            let t = if span > 0.0 { (offset - o0) / span } else { 1.0 };
            return lerp_color(c0, c1, t);
        }
    }
    stops.last().map(|&(_, c)| c).unwrap_or(Rgba8::TRANSPARENT)
}

fn draw_glow(
    ctx: &mut vello_cpu::RenderContext,
    center: Point,
    radius: f64,
    stops: &[(f64, Rgba8)],
) {
    for k in 0..GLOW_RINGS {
        let r0 = radius * k as f64 / GLOW_RINGS as f64;
        let r1 = radius * (k + 1) as f64 / GLOW_RINGS as f64;
        let color = sample_stops(stops, (k as f64 + 0.5) / GLOW_RINGS as f64);
        if color.a == 0 {
            continue;
        }
        let mut ring = kurbo::Circle::new(center, r1).to_path(TOLERANCE);
        if r0 > 0.0 {
            let inner = kurbo::Circle::new(center, r0).to_path(TOLERANCE);
            ring.extend(inner.reverse_subpaths());
        }
        set_color(ctx, color);
        ctx.fill_path(&bezpath_to_cpu(&ring));
    }
}

fn draw_image(
    ctx: &mut vello_cpu::RenderContext,
    image: &Arc<RasterImage>,
    origin: Point,
    opacity: f64,
) -> OrreryResult<()> {
    let pixmap = pixmap_from_premul_bytes(&image.data, image.width, image.height)?;
    let paint = vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    };
    ctx.set_transform(affine_to_cpu(Affine::translate(origin.to_vec2())));
    ctx.set_paint(paint);
    let opacity = opacity.clamp(0.0, 1.0) as f32;
    if opacity < 1.0 {
        ctx.push_opacity_layer(opacity);
    }
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(image.width),
        f64::from(image.height),
    ));
    if opacity < 1.0 {
        ctx.pop_layer();
    }
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    Ok(())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> OrreryResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| OrreryError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| OrreryError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(OrreryError::render("pixmap byte len mismatch"));
    }
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
