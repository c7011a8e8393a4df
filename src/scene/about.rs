use crate::config::{AboutOpts, PresentationOpts};
use crate::data::model::AboutRecord;
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Point, Viewport};
use crate::foundation::error::OrreryResult;
use crate::foundation::math::within_radius;
use crate::foundation::rng::Rng64;
use crate::render::draw::Painter;
use crate::scene::starfield::{Starfield, StarfieldStyle};
use crate::scene::ui::{InfoPanel, PanelContent, button_hit, draw_back_button};
use crate::scene::{Scene, SceneCommand, SceneKind};

/// Pulsing black hole that opens the about text when clicked.
#[derive(Debug)]
pub struct AboutScene {
    about: AboutRecord,
    viewport: Viewport,
    opts: AboutOpts,
    stars: Starfield,
    panel: InfoPanel,
    time_ms: f64,
    pulse: f64,
}

impl AboutScene {
    /// Scene for `about`.
    pub fn new(
        about: AboutRecord,
        opts: &PresentationOpts,
        viewport: Viewport,
        rng: &mut Rng64,
    ) -> Self {
        let a = opts.about.clone();
        let stars = Starfield::new(
            a.background_stars,
            StarfieldStyle::STATIC,
            viewport,
            rng.fork(),
        );
        Self {
            about,
            viewport,
            opts: a,
            stars,
            panel: InfoPanel::new(),
            time_ms: 0.0,
            pulse: 0.0,
        }
    }

    /// Current pulse offset added to the radius.
    pub fn pulse(&self) -> f64 {
        self.pulse
    }

    /// About panel.
    pub fn panel(&self) -> &InfoPanel {
        &self.panel
    }
}

impl Scene for AboutScene {
    fn kind(&self) -> SceneKind {
        SceneKind::About
    }

    fn update(&mut self, _mouse: Point, dt_ms: f64) -> OrreryResult<()> {
        self.time_ms += dt_ms.max(0.0);
        self.pulse = (self.time_ms * 0.001).sin() * self.opts.pulse;
        Ok(())
    }

    fn draw(&mut self, painter: &mut Painter, alpha: f64) -> OrreryResult<()> {
        self.stars.draw(painter, alpha);

        let center = self.viewport.center();
        let r = (self.opts.radius + self.pulse).max(0.0);
        painter.radial_glow(
            center,
            r * 1.5,
            &[
                (0.0, Rgba8::rgb(10, 5, 20).with_alpha(alpha)),
                (0.8, Rgba8::rgb(50, 30, 80).with_alpha(alpha * 0.5)),
                (1.0, Rgba8::rgba(100, 80, 150, 0)),
            ],
        );
        painter.fill_circle(center, r, Rgba8::BLACK.with_alpha(alpha));

        draw_back_button(painter, &self.opts.back_button, alpha);
        self.panel.draw(painter, alpha);
        Ok(())
    }

    fn handle_click(&mut self, pos: Point) -> SceneCommand {
        if self.panel.swallow_click() {
            return SceneCommand::None;
        }
        if button_hit(&self.opts.back_button, pos) {
            return SceneCommand::BackToGalaxy;
        }
        if within_radius(pos, self.viewport.center(), self.opts.radius) {
            self.panel.show(PanelContent::new(
                self.about.title.clone(),
                self.about.info.clone(),
            ));
        }
        SceneCommand::None
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.stars.resize(viewport);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/about.rs"]
mod tests;
