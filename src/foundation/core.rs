use crate::foundation::error::{OrreryError, OrreryResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Logical size of the drawing surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    /// Create a validated viewport with finite, positive dimensions.
    pub fn new(width: f64, height: f64) -> OrreryResult<Self> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(OrreryError::validation(format!(
                "viewport must be finite and > 0, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Center of the surface.
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Length of the surface diagonal.
    pub fn diagonal(self) -> f64 {
        self.width.hypot(self.height)
    }

    /// `min(width, height) / 2`, the radius of the largest centered circle.
    pub fn half_min(self) -> f64 {
        self.width.min(self.height) / 2.0
    }

    /// `max(width, height) / 2`.
    pub fn half_max(self) -> f64 {
        self.width.max(self.height) / 2.0
    }

    /// Return `true` when `p` lies inside the surface grown by `margin` on every side.
    pub fn contains_with_margin(self, p: Point, margin: f64) -> bool {
        p.x >= -margin && p.x <= self.width + margin && p.y >= -margin && p.y <= self.height + margin
    }

    /// Pixel dimensions rounded for raster targets.
    pub fn pixel_size(self) -> OrreryResult<(u16, u16)> {
        let w = self.width.round();
        let h = self.height.round();
        if !(1.0..=f64::from(u16::MAX)).contains(&w) || !(1.0..=f64::from(u16::MAX)).contains(&h) {
            return Err(OrreryError::render(format!(
                "viewport {w}x{h} does not fit a raster target"
            )));
        }
        Ok((w as u16, h as u16))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
