use crate::foundation::color::Rgba8;
use crate::foundation::core::{Point, Viewport};
use crate::foundation::rng::Rng64;
use crate::render::draw::Painter;

/// Sampling ranges for a background starfield.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarfieldStyle {
    /// Radius range.
    pub size: (f64, f64),
    /// Alpha range.
    pub alpha: (f64, f64),
    /// Downward drift per tick. `(0, 0)` keeps the field static.
    pub speed: (f64, f64),
    /// Stars at or below this effective alpha are not drawn.
    pub min_draw_alpha: f64,
}

impl StarfieldStyle {
    /// Galaxy backdrop: larger, faster stars.
    pub const GALAXY: Self = Self {
        size: (0.3, 2.1),
        alpha: (0.1, 0.8),
        speed: (0.1, 0.5),
        min_draw_alpha: 0.01,
    };

    /// Solar system backdrop: slow drift.
    pub const SOLAR: Self = Self {
        size: (0.5, 2.0),
        alpha: (0.1, 0.6),
        speed: (0.05, 0.15),
        min_draw_alpha: 0.05,
    };

    /// About page backdrop: static.
    pub const STATIC: Self = Self {
        size: (0.5, 2.0),
        alpha: (0.1, 0.6),
        speed: (0.0, 0.0),
        min_draw_alpha: 0.0,
    };
}

/// One background star.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    /// Screen position.
    pub pos: Point,
    /// Radius.
    pub size: f64,
    /// Base alpha.
    pub alpha: f64,
    /// Downward drift per tick.
    pub speed: f64,
}

/// Screen-space stars drifting down and wrapping to the top.
#[derive(Clone, Debug)]
pub struct Starfield {
    stars: Vec<Star>,
    style: StarfieldStyle,
    viewport: Viewport,
    rng: Rng64,
}

impl Starfield {
    /// Scatter `count` stars over `viewport`.
    pub fn new(count: usize, style: StarfieldStyle, viewport: Viewport, mut rng: Rng64) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                pos: Point::new(
                    rng.next_f64() * viewport.width,
                    rng.next_f64() * viewport.height,
                ),
                size: rng.range(style.size.0, style.size.1),
                alpha: rng.range(style.alpha.0, style.alpha.1),
                speed: rng.range(style.speed.0, style.speed.1),
            })
            .collect();
        Self {
            stars,
            style,
            viewport,
            rng,
        }
    }

    /// Drift every star; stars past the bottom edge restart above the top at a fresh x.
    pub fn update(&mut self) {
        let Viewport { width, height } = self.viewport;
        for s in &mut self.stars {
            s.pos.y += s.speed;
            if s.pos.y > height {
                s.pos.y = -s.size;
                s.pos.x = self.rng.next_f64() * width;
            }
        }
    }

    /// Re-scatter stars that fall outside the new bounds.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        for s in &mut self.stars {
            if s.pos.x > viewport.width || s.pos.y > viewport.height {
                s.pos = Point::new(
                    self.rng.next_f64() * viewport.width,
                    self.rng.next_f64() * viewport.height,
                );
            }
        }
    }

    /// White discs scaled by `alpha`.
    pub fn draw(&self, painter: &mut Painter, alpha: f64) {
        for s in &self.stars {
            let a = s.alpha * alpha;
            if a <= self.style.min_draw_alpha {
                continue;
            }
            painter.fill_circle(s.pos, s.size, Rgba8::WHITE.with_alpha(a));
        }
    }

    /// Current stars.
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/starfield.rs"]
mod tests;
