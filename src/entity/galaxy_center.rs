use crate::entity::hover::HoverRadius;
use crate::foundation::color::Rgba8;
use crate::foundation::core::Point;
use crate::foundation::error::{OrreryError, OrreryResult};
use crate::foundation::math::within_radius;
use crate::render::draw::Painter;

/// The dark core at the galaxy origin; clicking it opens the about page.
#[derive(Clone, Debug)]
pub struct GalaxyCenter {
    /// Eased radius; `radius.hover` is the hit radius.
    pub radius: HoverRadius,
    pulse_amplitude: f64,
    pulse: f64,
}

impl GalaxyCenter {
    /// Core with a pulse of `pulse_amplitude` pixels.
    pub fn new(radius: HoverRadius, pulse_amplitude: f64) -> Self {
        Self {
            radius,
            pulse_amplitude,
            pulse: 0.0,
        }
    }

    /// Ease the radius and recompute the pulse from scene time.
    pub fn update(&mut self, time_ms: f64) {
        self.radius.update();
        self.pulse = (time_ms * 0.001).sin() * self.pulse_amplitude;
    }

    /// Current pulse offset.
    pub fn pulse(&self) -> f64 {
        self.pulse
    }

    /// `true` when the unrotated point `p` is within the hover radius of the origin.
    pub fn hit_test(&self, p: Point) -> OrreryResult<bool> {
        if !self.radius.hover.is_finite() {
            return Err(OrreryError::data("galaxy center radius is not finite"));
        }
        Ok(within_radius(p, Point::ORIGIN, self.radius.hover))
    }

    /// Soft purple halo around a black disc.
    pub fn draw(&self, painter: &mut Painter, alpha: f64) {
        let r = (self.radius.current() + self.pulse).max(0.0);
        painter.radial_glow(
            Point::ORIGIN,
            r * 2.5,
            &[
                (0.0, Rgba8::rgb(10, 5, 20).with_alpha(alpha)),
                (0.8, Rgba8::rgb(50, 30, 80).with_alpha(alpha * 0.5)),
                (1.0, Rgba8::rgba(100, 80, 150, 0)),
            ],
        );
        painter.fill_circle(Point::ORIGIN, r, Rgba8::BLACK.with_alpha(alpha));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/entity/galaxy_center.rs"]
mod tests;
