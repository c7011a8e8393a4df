//! Tunables for a presentation, loadable from JSON with every field defaulted.

use crate::foundation::color::Rgba8;
use crate::foundation::core::Viewport;
use crate::foundation::error::OrreryResult;
use crate::particles::layer::LayerConfig;
use crate::particles::renderer::ParticleBackend;
use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tick counts of each transition phase. Progress advances by one per tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseDurations {
    /// Galaxy fade-out before opening a project.
    pub fade_out_to_project: u32,
    /// Galaxy fade-out before opening the about page.
    pub fade_out_to_about: u32,
    /// Project/about fade-out before returning to the galaxy.
    pub fade_out_to_galaxy: u32,
    /// Hyperspeed streaks, both directions.
    pub hyperspeed: u32,
    /// Empty frames between hyperspeed and fade-in.
    pub pause: u32,
    /// Fade-in of the new scene.
    pub fade_in: u32,
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            fade_out_to_project: 20,
            fade_out_to_about: 30,
            fade_out_to_galaxy: 30,
            hyperspeed: 60,
            pause: 15,
            fade_in: 30,
        }
    }
}

/// Circular back affordance in the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ButtonOpts {
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    /// Radius.
    pub radius: f64,
}

impl Default for ButtonOpts {
    fn default() -> Self {
        Self {
            x: 40.0,
            y: 40.0,
            radius: 20.0,
        }
    }
}

/// Galaxy scene parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyOpts {
    /// Particle layers, back to front. The last one is the foreground layer.
    pub layers: Vec<LayerConfig>,
    /// Number of spiral arms.
    pub num_arms: u32,
    /// Drifting background stars.
    pub background_stars: usize,
    /// Minimum scene time between hover recomputations.
    pub hover_throttle_ms: f64,
    /// Minimum pointer travel, in pixels, before hover is recomputed.
    pub hover_move_threshold: f64,
    /// Radius of the info button.
    pub info_button_radius: f64,
    /// Distance of the info button from the top-right corner.
    pub info_button_pad: f64,
    /// Star system base/hover radii.
    pub system_radius: (f64, f64),
    /// Galaxy center base/hover radii.
    pub center_radius: (f64, f64),
    /// Amplitude of the galaxy center pulse.
    pub center_pulse: f64,
    /// Renderer used for the foreground layer.
    pub particle_backend: ParticleBackend,
}

impl Default for GalaxyOpts {
    fn default() -> Self {
        Self {
            layers: LayerConfig::galaxy_defaults(),
            num_arms: 6,
            background_stars: 300,
            hover_throttle_ms: 50.0,
            hover_move_threshold: 5.0,
            info_button_radius: 22.0,
            info_button_pad: 24.0,
            system_radius: (8.0, 12.0),
            center_radius: (15.0, 20.0),
            center_pulse: 2.0,
            particle_backend: ParticleBackend::Cpu,
        }
    }
}

/// Solar system scene parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolarOpts {
    /// Drawn sun radius.
    pub sun_radius: f64,
    /// Clickable sun radius.
    pub sun_click_radius: f64,
    /// Added to the planet size for its click radius.
    pub planet_click_margin: f64,
    /// Upper bound of the delta fed to orbit integration.
    pub max_orbit_dt_ms: f64,
    /// Back affordance.
    pub back_button: ButtonOpts,
    /// Typing speed of the title.
    pub title_ms_per_char: f64,
    /// Typing speed of the "Discovered" line.
    pub date_ms_per_char: f64,
    /// Drifting background stars.
    pub background_stars: usize,
    /// Sun color when the record has none.
    pub default_sun_color: String,
}

impl Default for SolarOpts {
    fn default() -> Self {
        Self {
            sun_radius: 50.0,
            sun_click_radius: 55.0,
            planet_click_margin: 5.0,
            max_orbit_dt_ms: 100.0,
            back_button: ButtonOpts::default(),
            title_ms_per_char: 150.0,
            date_ms_per_char: 80.0,
            background_stars: 200,
            default_sun_color: "hsl(60, 100%, 100%)".to_owned(),
        }
    }
}

/// About scene parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutOpts {
    /// Black hole radius, also its click radius.
    pub radius: f64,
    /// Pulse amplitude.
    pub pulse: f64,
    /// Background stars.
    pub background_stars: usize,
    /// Back affordance.
    pub back_button: ButtonOpts,
}

impl Default for AboutOpts {
    fn default() -> Self {
        Self {
            radius: 100.0,
            pulse: 5.0,
            background_stars: 400,
            back_button: ButtonOpts::default(),
        }
    }
}

/// Hyperspeed streak parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HyperspeedOpts {
    /// Number of streaks.
    pub count: usize,
    /// Max distance as a fraction of the viewport diagonal.
    pub max_distance_factor: f64,
    /// Radial speed range per tick.
    pub speed: (f64, f64),
    /// Line width range.
    pub size: (f64, f64),
    /// Alpha range.
    pub alpha: (f64, f64),
    /// Trail length range.
    pub trail: (f64, f64),
    /// Streaks whose head leaves the viewport grown by this margin are not drawn.
    pub cull_margin: f64,
}

impl Default for HyperspeedOpts {
    fn default() -> Self {
        Self {
            count: 1000,
            max_distance_factor: 0.6,
            speed: (1.5, 4.5),
            size: (0.5, 2.5),
            alpha: (0.2, 1.0),
            trail: (4.0, 12.0),
            cull_margin: 200.0,
        }
    }
}

/// Every tunable of a presentation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationOpts {
    /// Surface size.
    pub viewport: Viewport,
    /// Clear color.
    pub background: Rgba8,
    /// Frame callbacks closer together than this are skipped (60 fps cap).
    pub frame_interval_ms: f64,
    /// Tick delta clamp.
    pub max_dt_ms: f64,
    /// Pointer-move rate limit.
    pub pointer_throttle_ms: f64,
    /// Resize quiet period.
    pub resize_debounce_ms: f64,
    /// Hover radius easing factor.
    pub hover_easing: f64,
    /// Transition phase lengths.
    pub durations: PhaseDurations,
    /// Galaxy scene.
    pub galaxy: GalaxyOpts,
    /// Solar system scene.
    pub solar: SolarOpts,
    /// About scene.
    pub about: AboutOpts,
    /// Hyperspeed effect.
    pub hyperspeed: HyperspeedOpts,
    /// Seed for every random draw; the system clock is used when absent.
    pub seed: Option<u64>,
}

impl Default for PresentationOpts {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            background: Rgba8::rgb(0x00, 0x00, 0x1a),
            frame_interval_ms: 1000.0 / 60.0,
            max_dt_ms: 40.0,
            pointer_throttle_ms: 33.0,
            resize_debounce_ms: 250.0,
            hover_easing: 0.1,
            durations: PhaseDurations::default(),
            galaxy: GalaxyOpts::default(),
            solar: SolarOpts::default(),
            about: AboutOpts::default(),
            hyperspeed: HyperspeedOpts::default(),
            seed: None,
        }
    }
}

impl PresentationOpts {
    /// Parse options from a JSON document.
    pub fn from_json_str(s: &str) -> OrreryResult<Self> {
        let opts: Self = serde_json::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Read options from a JSON file.
    pub fn from_path(path: &Path) -> OrreryResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> OrreryResult<()> {
        use crate::foundation::error::OrreryError;

        Viewport::new(self.viewport.width, self.viewport.height)?;
        if self.galaxy.layers.is_empty() {
            return Err(OrreryError::validation("galaxy needs at least one layer"));
        }
        if self.galaxy.num_arms == 0 {
            return Err(OrreryError::validation("galaxy needs at least one arm"));
        }
        let d = &self.durations;
        let all = [
            d.fade_out_to_project,
            d.fade_out_to_about,
            d.fade_out_to_galaxy,
            d.hyperspeed,
            d.pause,
            d.fade_in,
        ];
        if all.contains(&0) {
            return Err(OrreryError::validation("phase durations must be > 0"));
        }
        if !(self.hover_easing > 0.0 && self.hover_easing <= 1.0) {
            return Err(OrreryError::validation("hover_easing must be in (0, 1]"));
        }
        if !(self.max_dt_ms.is_finite() && self.max_dt_ms > 0.0) {
            return Err(OrreryError::validation("max_dt_ms must be finite and > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
