use crate::data::model::PlanetRecord;
use crate::foundation::color::Rgba8;
use crate::foundation::core::Point;
use crate::foundation::error::{OrreryError, OrreryResult};
use crate::foundation::rng::Rng64;
use crate::render::draw::Painter;
use std::f64::consts::TAU;

/// Radians per second for an orbit. `jitter` in `0..1` scales the base speed by `0.6..2.2`.
///
/// Jitter alone does not keep orbits ordered; see [`order_speeds_by_radius`].
pub fn angular_speed_for(orbit_radius: f64, jitter: f64) -> f64 {
    (4.5 / orbit_radius.max(1.0)) * (0.6 + jitter * 1.6)
}

/// Redistribute the jittered speeds of `planets` so that a smaller orbit is never slower.
///
/// The multiset of speeds is kept; the fastest goes to the innermost orbit. Planets sharing a
/// radius keep their relative order.
pub fn order_speeds_by_radius(planets: &mut [Planet]) {
    let mut speeds: Vec<f64> = planets.iter().map(|p| p.angular_speed).collect();
    speeds.sort_by(|a, b| b.total_cmp(a));
    let mut by_radius: Vec<usize> = (0..planets.len()).collect();
    by_radius.sort_by(|&a, &b| planets[a].orbit_radius().total_cmp(&planets[b].orbit_radius()));
    for (idx, speed) in by_radius.into_iter().zip(speeds) {
        planets[idx].angular_speed = speed;
    }
}

/// A planet on a circular orbit around the scene center.
#[derive(Clone, Debug)]
pub struct Planet {
    record: PlanetRecord,
    color: Rgba8,
    angle: f64,
    angular_speed: f64,
    position: Point,
    click_radius: f64,
}

impl Planet {
    /// Random start angle and speed jitter drawn from `rng`.
    pub fn new(record: PlanetRecord, click_margin: f64, rng: &mut Rng64) -> Self {
        let angle = rng.next_f64() * TAU;
        let speed = angular_speed_for(record.orbit_radius, rng.next_f64());
        Self::with_motion(record, click_margin, angle, speed)
    }

    /// Explicit start angle and speed.
    pub fn with_motion(
        record: PlanetRecord,
        click_margin: f64,
        angle: f64,
        angular_speed: f64,
    ) -> Self {
        let color = Rgba8::parse_or_white(&record.color);
        let click_radius = record.size + click_margin;
        let mut p = Self {
            record,
            color,
            angle,
            angular_speed,
            position: Point::ZERO,
            click_radius,
        };
        p.place();
        p
    }

    fn place(&mut self) {
        let r = self.record.orbit_radius;
        self.position = Point::new(self.angle.cos() * r, self.angle.sin() * r);
    }

    /// Integrate `clamp(dt_ms, 0, max_dt_ms)` of orbital motion.
    pub fn update(&mut self, dt_ms: f64, max_dt_ms: f64) {
        let dt = dt_ms.clamp(0.0, max_dt_ms) / 1000.0;
        self.angle += self.angular_speed * dt;
        self.place();
    }

    /// Radians per second.
    pub fn angular_speed(&self) -> f64 {
        self.angular_speed
    }

    /// Current angle.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Position relative to the scene center.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Orbit radius.
    pub fn orbit_radius(&self) -> f64 {
        self.record.orbit_radius
    }

    /// Backing record.
    pub fn record(&self) -> &PlanetRecord {
        &self.record
    }

    /// `true` when `p` (relative to the scene center) is within `size + margin`.
    pub fn hit_test(&self, p: Point) -> OrreryResult<bool> {
        if !self.position.is_finite() || !self.click_radius.is_finite() {
            return Err(OrreryError::data(format!(
                "planet '{}' has non-finite geometry",
                self.record.name
            )));
        }
        let d = p - self.position;
        Ok(d.hypot2() < self.click_radius * self.click_radius)
    }

    /// Glow plus disc, relative to the scene center.
    pub fn draw(&self, painter: &mut Painter, alpha: f64) {
        let c = self.color.with_alpha_mul(alpha);
        let size = self.record.size;
        painter.radial_glow(
            self.position,
            size * 2.0,
            &[(0.0, c.with_alpha_mul(0.5)), (1.0, c.with_alpha(0.0))],
        );
        painter.fill_circle(self.position, size, c);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/entity/planet.rs"]
mod tests;
