use crate::data::model::ProjectRecord;
use crate::entity::hover::HoverRadius;
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Point, Viewport};
use crate::foundation::error::{OrreryError, OrreryResult};
use crate::foundation::math::within_radius;
use crate::render::draw::Painter;

/// A project's star, positioned in the unrotated galaxy frame.
#[derive(Clone, Debug)]
pub struct StarSystem {
    project: ProjectRecord,
    color: Rgba8,
    position: Point,
    /// Eased radius; `radius.hover` is the hit radius.
    pub radius: HoverRadius,
}

impl StarSystem {
    /// Place `project` for `viewport`.
    pub fn new(project: ProjectRecord, viewport: Viewport, radius: HoverRadius) -> Self {
        let color = Rgba8::parse_or_white(&project.color);
        let mut s = Self {
            project,
            color,
            position: Point::ZERO,
            radius,
        };
        s.layout(viewport);
        s
    }

    /// Recompute the logical position: `(gp - 0.5) · min(w, h) / 2 · 1.5`.
    pub fn layout(&mut self, viewport: Viewport) {
        let scale = viewport.half_min() * 1.5;
        let gp = self.project.galaxy_position;
        self.position = Point::new((gp.x - 0.5) * scale, (gp.y - 0.5) * scale);
    }

    /// Place at an explicit logical position.
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Logical (unrotated) position relative to the galaxy center.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Backing project record.
    pub fn project(&self) -> &ProjectRecord {
        &self.project
    }

    /// `true` when the unrotated point `p` is within the hover radius.
    ///
    /// Fails on non-finite entity data so callers can skip the entity.
    pub fn hit_test(&self, p: Point) -> OrreryResult<bool> {
        if !self.position.is_finite() || !self.radius.hover.is_finite() {
            return Err(OrreryError::data(format!(
                "star system '{}' has non-finite geometry",
                self.project.id
            )));
        }
        Ok(within_radius(p, self.position, self.radius.hover))
    }

    /// One easing step.
    pub fn update(&mut self) {
        self.radius.update();
    }

    /// Glow plus disc, in the painter's current (rotated) frame.
    pub fn draw(&self, painter: &mut Painter, alpha: f64) {
        let r = self.radius.current();
        let c = self.color.with_alpha_mul(alpha);
        painter.radial_glow(
            self.position,
            r * 2.5,
            &[(0.0, c.with_alpha_mul(0.6)), (0.4, c.with_alpha_mul(0.25)), (1.0, c.with_alpha(0.0))],
        );
        painter.fill_circle(self.position, r, c);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/entity/star_system.rs"]
mod tests;
