use crate::foundation::color::Rgba8;
use crate::foundation::core::{Affine, Point, Rect, Vec2, Viewport};
use std::sync::Arc;

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// `pos.x` is the left edge.
    #[default]
    Left,
    /// `pos.x` is the horizontal center.
    Center,
}

/// Vertical text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    /// `pos.y` is the top of the line box.
    #[default]
    Top,
    /// `pos.y` is the vertical middle of the line box.
    Middle,
}

/// Premultiplied RGBA8 raster placed by [`DrawOp::Image`].
#[derive(Clone, Debug, PartialEq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Tightly packed premultiplied RGBA8 rows.
    pub data: Vec<u8>,
}

/// One screen-space drawing command.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Solid disc.
    FillCircle {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
        /// Fill color.
        color: Rgba8,
    },
    /// Circle outline.
    StrokeCircle {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
        /// Line width.
        width: f64,
        /// Stroke color.
        color: Rgba8,
    },
    /// Axis-aligned filled rectangle.
    FillRect {
        /// Rectangle.
        rect: Rect,
        /// Fill color.
        color: Rgba8,
    },
    /// Axis-aligned rectangle outline.
    StrokeRect {
        /// Rectangle.
        rect: Rect,
        /// Line width.
        width: f64,
        /// Stroke color.
        color: Rgba8,
    },
    /// Straight segment whose color ramps linearly from `from_color` to `to_color`.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Line width.
        width: f64,
        /// Color at `from`.
        from_color: Rgba8,
        /// Color at `to`.
        to_color: Rgba8,
    },
    /// Disc filled with a radial gradient. Stops are `(offset in 0..=1, color)`, ascending.
    RadialGlow {
        /// Center.
        center: Point,
        /// Outer radius (offset 1.0).
        radius: f64,
        /// Gradient stops.
        stops: Vec<(f64, Rgba8)>,
    },
    /// Single line of text.
    Text {
        /// Text content.
        text: String,
        /// Anchor position.
        pos: Point,
        /// Font size in pixels.
        size: f64,
        /// Fill color.
        color: Rgba8,
        /// Horizontal anchor.
        align: TextAlign,
        /// Vertical anchor.
        baseline: TextBaseline,
    },
    /// Raster placed with its top-left corner at `origin`, scaled by `opacity`.
    Image {
        /// Pixels.
        image: Arc<RasterImage>,
        /// Top-left corner.
        origin: Point,
        /// Opacity multiplier.
        opacity: f64,
    },
}

/// Everything needed to produce one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawList {
    /// Surface size.
    pub viewport: Viewport,
    /// Clear color.
    pub background: Rgba8,
    /// Commands in paint order.
    pub ops: Vec<DrawOp>,
}

impl DrawList {
    /// Empty list for a surface.
    pub fn new(viewport: Viewport, background: Rgba8) -> Self {
        Self {
            viewport,
            background,
            ops: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct PaintState {
    transform: Affine,
    alpha: f64,
}

/// Immediate-mode recorder with a canvas-like transform stack.
///
/// Only translation and rotation are supported, so radii and widths pass through unchanged.
/// Colors are multiplied by the current global alpha, and fully transparent ops are dropped.
#[derive(Debug)]
pub struct Painter {
    list: DrawList,
    state: PaintState,
    stack: Vec<PaintState>,
}

impl Painter {
    /// Start recording a frame.
    pub fn new(viewport: Viewport, background: Rgba8) -> Self {
        Self {
            list: DrawList::new(viewport, background),
            state: PaintState {
                transform: Affine::IDENTITY,
                alpha: 1.0,
            },
            stack: Vec::new(),
        }
    }

    /// Surface size.
    pub fn viewport(&self) -> Viewport {
        self.list.viewport
    }

    /// Push the current transform and alpha.
    pub fn save(&mut self) {
        self.stack.push(self.state);
    }

    /// Pop to the last saved state. Unbalanced calls reset to identity.
    pub fn restore(&mut self) {
        self.state = self.stack.pop().unwrap_or(PaintState {
            transform: Affine::IDENTITY,
            alpha: 1.0,
        });
    }

    /// Translate subsequent drawing.
    pub fn translate(&mut self, by: Vec2) {
        self.state.transform *= Affine::translate(by);
    }

    /// Rotate subsequent drawing by `angle` radians about the current origin.
    pub fn rotate(&mut self, angle: f64) {
        self.state.transform *= Affine::rotate(angle);
    }

    /// Replace the global alpha multiplier.
    pub fn set_alpha(&mut self, alpha: f64) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    /// Current global alpha multiplier.
    pub fn alpha(&self) -> f64 {
        self.state.alpha
    }

    /// Map a local point to screen space.
    pub fn to_screen(&self, p: Point) -> Point {
        self.state.transform * p
    }

    fn tint(&self, c: Rgba8) -> Rgba8 {
        c.with_alpha_mul(self.state.alpha)
    }

    fn push(&mut self, op: DrawOp) {
        self.list.ops.push(op);
    }

    /// Solid disc.
    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        let color = self.tint(color);
        if color.a == 0 || radius <= 0.0 {
            return;
        }
        let center = self.to_screen(center);
        self.push(DrawOp::FillCircle {
            center,
            radius,
            color,
        });
    }

    /// Circle outline.
    pub fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: Rgba8) {
        let color = self.tint(color);
        if color.a == 0 || radius <= 0.0 || width <= 0.0 {
            return;
        }
        let center = self.to_screen(center);
        self.push(DrawOp::StrokeCircle {
            center,
            radius,
            width,
            color,
        });
    }

    /// Filled rectangle. Must be drawn without rotation.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        let color = self.tint(color);
        if color.a == 0 {
            return;
        }
        let rect = self.rect_to_screen(rect);
        self.push(DrawOp::FillRect { rect, color });
    }

    /// Rectangle outline. Must be drawn without rotation.
    pub fn stroke_rect(&mut self, rect: Rect, width: f64, color: Rgba8) {
        let color = self.tint(color);
        if color.a == 0 || width <= 0.0 {
            return;
        }
        let rect = self.rect_to_screen(rect);
        self.push(DrawOp::StrokeRect { rect, width, color });
    }

    fn rect_to_screen(&self, rect: Rect) -> Rect {
        let a = self.to_screen(Point::new(rect.x0, rect.y0));
        let b = self.to_screen(Point::new(rect.x1, rect.y1));
        Rect::from_points(a, b)
    }

    /// Gradient line segment.
    pub fn line(&mut self, from: Point, to: Point, width: f64, from_color: Rgba8, to_color: Rgba8) {
        let from_color = self.tint(from_color);
        let to_color = self.tint(to_color);
        if (from_color.a == 0 && to_color.a == 0) || width <= 0.0 {
            return;
        }
        let from = self.to_screen(from);
        let to = self.to_screen(to);
        self.push(DrawOp::Line {
            from,
            to,
            width,
            from_color,
            to_color,
        });
    }

    /// Radial gradient disc.
    pub fn radial_glow(&mut self, center: Point, radius: f64, stops: &[(f64, Rgba8)]) {
        if radius <= 0.0 || stops.is_empty() {
            return;
        }
        let stops: Vec<(f64, Rgba8)> = stops
            .iter()
            .map(|&(o, c)| (o.clamp(0.0, 1.0), self.tint(c)))
            .collect();
        if stops.iter().all(|(_, c)| c.a == 0) {
            return;
        }
        let center = self.to_screen(center);
        self.push(DrawOp::RadialGlow {
            center,
            radius,
            stops,
        });
    }

    /// One line of text.
    pub fn text(
        &mut self,
        text: impl Into<String>,
        pos: Point,
        size: f64,
        color: Rgba8,
        align: TextAlign,
        baseline: TextBaseline,
    ) {
        let text = text.into();
        let color = self.tint(color);
        if color.a == 0 || text.is_empty() || size <= 0.0 {
            return;
        }
        let pos = self.to_screen(pos);
        self.push(DrawOp::Text {
            text,
            pos,
            size,
            color,
            align,
            baseline,
        });
    }

    /// Raster image at a local origin.
    pub fn image(&mut self, image: Arc<RasterImage>, origin: Point) {
        let opacity = self.state.alpha;
        if opacity <= 0.0 {
            return;
        }
        let origin = self.to_screen(origin);
        self.push(DrawOp::Image {
            image,
            origin,
            opacity,
        });
    }

    /// Recorded commands so far.
    pub fn ops(&self) -> &[DrawOp] {
        &self.list.ops
    }

    /// Finish recording.
    pub fn finish(self) -> DrawList {
        self.list
    }
}

/// Width of `text` in a monospace face of `size` pixels.
pub fn monospace_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * 0.6
}

#[cfg(test)]
#[path = "../../tests/unit/render/draw.rs"]
mod tests;
