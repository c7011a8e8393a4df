use crate::foundation::color::Rgba8;
use crate::foundation::core::Point;
use crate::foundation::error::{OrreryError, OrreryResult};
use crate::foundation::rng::Rng64;
use crate::render::draw::Painter;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::sync::Arc;

/// Generation and motion parameters for one particle layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Number of particles.
    pub count: usize,
    /// Radians of arm twist at the outer edge, divided by `2π`.
    pub arm_tightness: f64,
    /// Maximum angular distance of a particle from its arm centerline.
    pub arm_spread: f64,
    /// Smallest particle radius.
    pub min_size: f64,
    /// Largest particle radius.
    pub max_size: f64,
    /// Smallest particle alpha.
    pub min_alpha: f64,
    /// Largest particle alpha.
    pub max_alpha: f64,
    /// Radians added to the layer rotation every tick.
    pub rotation_speed: f64,
    /// Fill color shared by every particle in the layer.
    pub color: Rgba8,
}

impl LayerConfig {
    /// The four galaxy layers, back to front.
    pub fn galaxy_defaults() -> Vec<Self> {
        let violet = crate::foundation::color::hsla_to_rgba(260.0, 0.9, 0.8, 1.0);
        vec![
            Self {
                count: 800,
                arm_tightness: 1.2,
                arm_spread: 1.6,
                min_size: 0.4,
                max_size: 0.8,
                min_alpha: 0.1,
                max_alpha: 0.3,
                rotation_speed: 0.0001,
                color: crate::foundation::color::hsla_to_rgba(240.0, 0.8, 0.7, 1.0),
            },
            Self {
                count: 1000,
                arm_tightness: 0.1,
                arm_spread: 3.0,
                min_size: 0.5,
                max_size: 1.2,
                min_alpha: 0.4,
                max_alpha: 0.8,
                rotation_speed: 0.00095,
                color: violet,
            },
            Self {
                count: 600,
                arm_tightness: 0.6,
                arm_spread: 1.8,
                min_size: 0.5,
                max_size: 0.8,
                min_alpha: 0.6,
                max_alpha: 0.9,
                rotation_speed: 0.0006,
                color: violet,
            },
            Self {
                count: 800,
                arm_tightness: 0.2,
                arm_spread: 0.3,
                min_size: 0.8,
                max_size: 1.8,
                min_alpha: 0.7,
                max_alpha: 1.0,
                rotation_speed: 0.0004,
                color: Rgba8::WHITE,
            },
        ]
    }

    fn validate(&self) -> OrreryResult<()> {
        let finite = [
            self.arm_tightness,
            self.arm_spread,
            self.min_size,
            self.max_size,
            self.min_alpha,
            self.max_alpha,
            self.rotation_speed,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(OrreryError::validation("layer config values must be finite"));
        }
        if self.min_size > self.max_size || self.min_alpha > self.max_alpha {
            return Err(OrreryError::validation(
                "layer config min values must not exceed max values",
            ));
        }
        Ok(())
    }
}

/// A rotating, radially distributed batch of decorative points.
///
/// Positions, sizes and alphas are fixed after generation and shared by reference with
/// renderers; only `rotation` changes per tick.
#[derive(Clone, Debug)]
pub struct ParticleLayer {
    positions: Arc<[f32]>,
    sizes: Arc<[f32]>,
    alphas: Arc<[f32]>,
    /// Accumulated rotation in radians.
    pub rotation: f64,
    config: LayerConfig,
}

impl ParticleLayer {
    /// Generate a spiral-arm layer around the origin.
    ///
    /// Distance is `rand² · max_dist`, so density is biased toward the center. The arm offset is
    /// `±rand³ · spread`, which keeps most particles close to the arm centerline.
    pub fn generate(
        config: LayerConfig,
        num_arms: u32,
        max_dist: f64,
        rng: &mut Rng64,
    ) -> OrreryResult<Self> {
        config.validate()?;
        if num_arms == 0 {
            return Err(OrreryError::validation("galaxy needs at least one arm"));
        }
        if !max_dist.is_finite() || max_dist <= 0.0 {
            return Err(OrreryError::validation("max_dist must be finite and > 0"));
        }

        let n = config.count;
        let mut positions = Vec::with_capacity(n * 2);
        let mut sizes = Vec::with_capacity(n);
        let mut alphas = Vec::with_capacity(n);

        for _ in 0..n {
            let dist = rng.next_f64().powi(2) * max_dist;
            let mut angle = (dist / max_dist) * TAU * config.arm_tightness;
            let mut arm_offset = rng.next_f64().powi(3) * config.arm_spread;
            if rng.coin() {
                arm_offset = -arm_offset;
            }
            angle += arm_offset;
            let arm = rng.index(num_arms as usize) as f64;
            angle += (arm / f64::from(num_arms)) * TAU;

            positions.push((angle.cos() * dist) as f32);
            positions.push((angle.sin() * dist) as f32);
            sizes.push(rng.range(config.min_size, config.max_size) as f32);
            alphas.push(rng.range(config.min_alpha, config.max_alpha) as f32);
        }

        Ok(Self {
            positions: positions.into(),
            sizes: sizes.into(),
            alphas: alphas.into(),
            rotation: 0.0,
            config,
        })
    }

    /// Advance rotation by one tick.
    pub fn advance(&mut self) {
        self.rotation += self.config.rotation_speed;
    }

    /// Flat `(x, y)` pairs relative to the galaxy center.
    pub fn positions(&self) -> &Arc<[f32]> {
        &self.positions
    }

    /// Per-particle radius.
    pub fn sizes(&self) -> &Arc<[f32]> {
        &self.sizes
    }

    /// Per-particle alpha.
    pub fn alphas(&self) -> &Arc<[f32]> {
        &self.alphas
    }

    /// Generation parameters.
    pub fn config(&self) -> &LayerConfig {
        &self.config
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// `true` when the layer is empty.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Unrotated position of particle `i`.
    pub fn position(&self, i: usize) -> Point {
        Point::new(
            f64::from(self.positions[i * 2]),
            f64::from(self.positions[i * 2 + 1]),
        )
    }
}

/// Draw `layer` around `center` with the painter's immediate-mode ops.
///
/// Particles whose effective alpha is at most 0.05 are skipped.
pub fn draw_layer(painter: &mut Painter, layer: &ParticleLayer, center: Point, alpha: f64) {
    painter.save();
    painter.translate(center.to_vec2());
    painter.rotate(layer.rotation);
    let color = layer.config.color;
    for i in 0..layer.len() {
        let a = f64::from(layer.alphas[i]) * alpha;
        if a <= 0.05 {
            continue;
        }
        painter.fill_circle(
            layer.position(i),
            f64::from(layer.sizes[i]),
            color.with_alpha_mul(a),
        );
    }
    painter.restore();
}

#[cfg(test)]
#[path = "../../tests/unit/particles/layer.rs"]
mod tests;
