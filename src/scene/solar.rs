use crate::config::{PresentationOpts, SolarOpts};
use crate::data::model::{PlanetRecord, ProjectRecord, SunRecord};
use crate::entity::planet::{Planet, order_speeds_by_radius};
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Point, Viewport};
use crate::foundation::error::OrreryResult;
use crate::foundation::math::within_radius;
use crate::foundation::rng::Rng64;
use crate::render::draw::{Painter, TextAlign, TextBaseline};
use crate::scene::starfield::{Starfield, StarfieldStyle};
use crate::scene::typing::TypingHeader;
use crate::scene::ui::{InfoPanel, PanelContent, button_hit, draw_back_button};
use crate::scene::{Scene, SceneCommand, SceneKind};

/// One project's sun and orbiting planets.
#[derive(Debug)]
pub struct SolarSystemScene {
    project: ProjectRecord,
    viewport: Viewport,
    opts: SolarOpts,
    sun_color: Rgba8,
    planets: Vec<Planet>,
    stars: Starfield,
    header: TypingHeader,
    panel: InfoPanel,
}

impl SolarSystemScene {
    /// Build the scene for `project`; planets get random start angles from `rng`.
    pub fn new(
        project: ProjectRecord,
        opts: &PresentationOpts,
        viewport: Viewport,
        rng: &mut Rng64,
    ) -> Self {
        let s = opts.solar.clone();
        let mut planets: Vec<Planet> = project
            .planets
            .iter()
            .map(|p| Planet::new(p.clone(), s.planet_click_margin, rng))
            .collect();
        order_speeds_by_radius(&mut planets);
        let sun_color = Rgba8::parse_or_white(
            project
                .sun
                .color
                .as_deref()
                .unwrap_or(&s.default_sun_color),
        );
        let stars = Starfield::new(
            s.background_stars,
            StarfieldStyle::SOLAR,
            viewport,
            rng.fork(),
        );
        let header = TypingHeader::new(
            project.name.clone(),
            project.discovered_label(),
            s.title_ms_per_char,
            s.date_ms_per_char,
        );
        tracing::debug!(project = %project.id, planets = project.planets.len(), "solar scene created");
        Self {
            project,
            viewport,
            opts: s,
            sun_color,
            planets,
            stars,
            header,
            panel: InfoPanel::new(),
        }
    }

    /// Project shown.
    pub fn project(&self) -> &ProjectRecord {
        &self.project
    }

    /// Planets in record order.
    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    /// Typing header.
    pub fn header(&self) -> &TypingHeader {
        &self.header
    }

    /// Inspector panel.
    pub fn panel(&self) -> &InfoPanel {
        &self.panel
    }

    fn draw_sun(&self, painter: &mut Painter, alpha: f64) {
        let c = self.sun_color.with_alpha_mul(alpha);
        let r = self.opts.sun_radius;
        painter.radial_glow(
            Point::ORIGIN,
            r * 2.0,
            &[
                (0.0, c),
                (0.5, c.with_alpha_mul(0.6)),
                (1.0, c.with_alpha(0.0)),
            ],
        );
        painter.fill_circle(Point::ORIGIN, r, c);
    }

    fn draw_header(&self, painter: &mut Painter, alpha: f64) {
        let b = &self.opts.back_button;
        let left = b.x + b.radius + 18.0;
        let top = 18.0;
        painter.text(
            self.header.visible_title(),
            Point::new(left, top),
            28.0,
            Rgba8::WHITE.with_alpha(alpha),
            TextAlign::Left,
            TextBaseline::Top,
        );
        painter.text(
            self.header.visible_subtitle(),
            Point::new(left, top + 34.0),
            16.0,
            Rgba8::rgb(200, 200, 255).with_alpha(alpha),
            TextAlign::Left,
            TextBaseline::Top,
        );
    }
}

fn sun_panel(project: &ProjectRecord, sun: &SunRecord) -> PanelContent {
    PanelContent {
        title: sun
            .title
            .clone()
            .or_else(|| sun.name.clone())
            .unwrap_or_else(|| project.name.clone()),
        subtext: sun.subtext.clone(),
        body: sun.body.clone().or_else(|| sun.info.clone()).unwrap_or_default(),
    }
}

fn planet_panel(planet: &PlanetRecord) -> PanelContent {
    PanelContent {
        title: planet.title.clone().unwrap_or_else(|| planet.name.clone()),
        subtext: planet.subtext.clone(),
        body: planet
            .body
            .clone()
            .or_else(|| planet.info.clone())
            .unwrap_or_default(),
    }
}

impl Scene for SolarSystemScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Solar
    }

    fn update(&mut self, _mouse: Point, dt_ms: f64) -> OrreryResult<()> {
        for planet in &mut self.planets {
            planet.update(dt_ms, self.opts.max_orbit_dt_ms);
        }
        self.stars.update();
        self.header.advance(dt_ms);
        Ok(())
    }

    fn draw(&mut self, painter: &mut Painter, alpha: f64) -> OrreryResult<()> {
        self.stars.draw(painter, alpha);

        painter.save();
        painter.translate(self.viewport.center().to_vec2());
        let ring = Rgba8::WHITE.with_alpha(0.2 * alpha);
        for planet in &self.planets {
            painter.stroke_circle(Point::ORIGIN, planet.orbit_radius(), 1.0, ring);
        }
        self.draw_sun(painter, alpha);
        for planet in &self.planets {
            planet.draw(painter, alpha);
        }
        painter.restore();

        draw_back_button(painter, &self.opts.back_button, alpha);
        self.draw_header(painter, alpha);
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

        let rel = pos - self.viewport.center().to_vec2();
        if within_radius(rel, Point::ORIGIN, self.opts.sun_click_radius) {
            self.panel.show(sun_panel(&self.project, &self.project.sun));
            return SceneCommand::None;
        }
        for planet in &self.planets {
            match planet.hit_test(rel) {
                Ok(true) => {
                    self.panel.show(planet_panel(planet.record()));
                    return SceneCommand::None;
                }
                Ok(false) => {}
                Err(e) => tracing::warn!(error = %e, "skipping planet in click test"),
            }
        }
        SceneCommand::None
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.stars.resize(viewport);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/solar.rs"]
mod tests;
