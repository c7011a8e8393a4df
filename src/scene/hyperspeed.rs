use crate::config::HyperspeedOpts;
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Point, Vec2, Viewport};
use crate::foundation::rng::Rng64;
use crate::render::draw::Painter;
use crate::scene::TransitionEffect;
use std::f64::consts::TAU;

/// Travel direction of the streaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Streaks fly outward from the center.
    In,
    /// Streaks fall back toward the center.
    Out,
}

/// Radial streak field shown between scenes.
///
/// Streaks are stored as parallel arrays. Each has a fixed angle and speed until it is recycled.
#[derive(Clone, Debug)]
pub struct HyperspeedScene {
    direction: Direction,
    viewport: Viewport,
    opts: HyperspeedOpts,
    max_distance: f64,
    angles: Vec<f64>,
    distances: Vec<f64>,
    speeds: Vec<f64>,
    sizes: Vec<f64>,
    alphas: Vec<f64>,
    trails: Vec<f64>,
    rng: Rng64,
}

impl HyperspeedScene {
    /// Scatter streaks for `direction`. Outward streaks start uniformly in distance; inward ones
    /// start at `sqrt(rand) · max`, which favors the rim.
    pub fn new(
        direction: Direction,
        opts: &HyperspeedOpts,
        viewport: Viewport,
        mut rng: Rng64,
    ) -> Self {
        let max_distance = viewport.diagonal() * opts.max_distance_factor;
        let n = opts.count;
        let mut s = Self {
            direction,
            viewport,
            opts: opts.clone(),
            max_distance,
            angles: Vec::with_capacity(n),
            distances: Vec::with_capacity(n),
            speeds: Vec::with_capacity(n),
            sizes: Vec::with_capacity(n),
            alphas: Vec::with_capacity(n),
            trails: Vec::with_capacity(n),
            rng: Rng64::new(0),
        };
        for _ in 0..n {
            s.angles.push(rng.next_f64() * TAU);
            let d = match direction {
                Direction::In => rng.next_f64() * max_distance,
                Direction::Out => rng.next_f64().sqrt() * max_distance,
            };
            s.distances.push(d);
            s.speeds.push(rng.range(opts.speed.0, opts.speed.1));
            s.sizes.push(rng.range(opts.size.0, opts.size.1));
            s.alphas.push(rng.range(opts.alpha.0, opts.alpha.1));
            s.trails.push(rng.range(opts.trail.0, opts.trail.1));
        }
        s.rng = rng;
        s
    }

    /// Direction of travel.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Distance at which streaks recycle.
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Number of streaks.
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// `true` when there are no streaks.
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Distance of streak `i` from the center.
    pub fn distance(&self, i: usize) -> f64 {
        self.distances[i]
    }

    fn recycle(&mut self, i: usize) {
        self.distances[i] = match self.direction {
            Direction::In => 0.0,
            Direction::Out => self.max_distance,
        };
        self.angles[i] = self.rng.next_f64() * TAU;
        self.speeds[i] = self.rng.range(self.opts.speed.0, self.opts.speed.1);
    }

    /// Head and tail of streak `i` in surface pixels.
    pub fn segment(&self, i: usize) -> (Point, Point) {
        let dir = Vec2::from_angle(self.angles[i]);
        let d = self.distances[i];
        let tail = match self.direction {
            Direction::In => d - self.trails[i],
            Direction::Out => d + self.trails[i],
        };
        let c = self.viewport.center();
        (c + dir * d, c + dir * tail)
    }

    /// `true` when the head of streak `i` is inside the viewport grown by the cull margin.
    pub fn is_visible(&self, i: usize) -> bool {
        let (head, _) = self.segment(i);
        self.viewport
            .contains_with_margin(head, self.opts.cull_margin)
    }
}

impl TransitionEffect for HyperspeedScene {
    /// One fixed step per tick; `dt_ms` is not used.
    fn update(&mut self, _dt_ms: f64) {
        for i in 0..self.distances.len() {
            match self.direction {
                Direction::In => {
                    self.distances[i] += self.speeds[i];
                    if self.distances[i] > self.max_distance {
                        self.recycle(i);
                    }
                }
                Direction::Out => {
                    self.distances[i] -= self.speeds[i];
                    if self.distances[i] < 0.0 {
                        self.recycle(i);
                    }
                }
            }
        }
    }

    fn draw(&self, painter: &mut Painter, alpha: f64) {
        for i in 0..self.distances.len() {
            if !self.is_visible(i) {
                continue;
            }
            let a = self.alphas[i] * alpha;
            if a <= 0.01 {
                continue;
            }
            let (head, tail) = self.segment(i);
            painter.line(
                tail,
                head,
                self.sizes[i],
                Rgba8::WHITE.with_alpha(0.0),
                Rgba8::WHITE.with_alpha(a),
            );
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.max_distance = viewport.diagonal() * self.opts.max_distance_factor;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/hyperspeed.rs"]
mod tests;
