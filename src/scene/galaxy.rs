use crate::config::{GalaxyOpts, PresentationOpts};
use crate::data::model::{HelpRecord, ProjectCatalog};
use crate::entity::galaxy_center::GalaxyCenter;
use crate::entity::hover::HoverRadius;
use crate::entity::star_system::StarSystem;
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Point, Rect, Viewport};
use crate::foundation::error::{OrreryError, OrreryResult};
use crate::foundation::math::{rotate_vec, unrotate_about, within_radius};
use crate::foundation::rng::Rng64;
use crate::particles::layer::{ParticleLayer, draw_layer};
use crate::particles::renderer::{ParticleRenderer, create_particle_renderer};
use crate::render::draw::{Painter, TextAlign, TextBaseline, monospace_width};
use crate::scene::starfield::{Starfield, StarfieldStyle};
use crate::scene::ui::{InfoPanel, PanelContent};
use crate::scene::{Scene, SceneCommand, SceneKind};

const TOOLTIP_PADDING: f64 = 8.0;
const TOOLTIP_LINE_HEIGHT: f64 = 20.0;

/// Rotating spiral galaxy with one star system per project.
///
/// Star systems and the center live in the frame of the foreground (last) layer. Pointer
/// positions are mapped into that frame by [`GalaxyScene::to_logical`] before hit-testing.
pub struct GalaxyScene {
    viewport: Viewport,
    opts: GalaxyOpts,
    layers: Vec<ParticleLayer>,
    systems: Vec<StarSystem>,
    center: GalaxyCenter,
    stars: Starfield,
    renderer: Box<dyn ParticleRenderer>,
    help: Option<HelpRecord>,
    panel: InfoPanel,
    hovered: Option<usize>,
    last_mouse: Point,
    last_hover_ms: f64,
    time_ms: f64,
}

impl std::fmt::Debug for GalaxyScene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalaxyScene")
            .field("viewport", &self.viewport)
            .field("layers", &self.layers.len())
            .field("systems", &self.systems.len())
            .field("renderer", &self.renderer.name())
            .field("hovered", &self.hovered)
            .finish_non_exhaustive()
    }
}

impl GalaxyScene {
    /// Generate layers and place one star system per catalog entry.
    pub fn new(
        catalog: &ProjectCatalog,
        help: Option<HelpRecord>,
        opts: &PresentationOpts,
        viewport: Viewport,
        rng: &mut Rng64,
    ) -> OrreryResult<Self> {
        let g = opts.galaxy.clone();
        if g.layers.is_empty() {
            return Err(OrreryError::validation("galaxy needs at least one layer"));
        }
        let max_dist = viewport.half_max();
        let layers = g
            .layers
            .iter()
            .map(|cfg| ParticleLayer::generate(cfg.clone(), g.num_arms, max_dist, rng))
            .collect::<OrreryResult<Vec<_>>>()?;

        let systems = catalog
            .iter()
            .map(|p| {
                let r = HoverRadius::new(g.system_radius.0, g.system_radius.1, opts.hover_easing);
                StarSystem::new(p.clone(), viewport, r)
            })
            .collect();
        let center = GalaxyCenter::new(
            HoverRadius::new(g.center_radius.0, g.center_radius.1, opts.hover_easing),
            g.center_pulse,
        );
        let stars = Starfield::new(
            g.background_stars,
            StarfieldStyle::GALAXY,
            viewport,
            rng.fork(),
        );

        let mut renderer = create_particle_renderer(g.particle_backend, viewport);
        renderer.set_center(viewport.center());
        if let Some(fg) = layers.last() {
            renderer.sync(fg);
        }
        tracing::debug!(
            systems = catalog.len(),
            renderer = renderer.name(),
            "galaxy scene created"
        );

        Ok(Self {
            viewport,
            opts: g,
            layers,
            systems,
            center,
            stars,
            renderer,
            help,
            panel: InfoPanel::new(),
            hovered: None,
            last_mouse: Point::ZERO,
            last_hover_ms: f64::NEG_INFINITY,
            time_ms: 0.0,
        })
    }

    /// Rotation of the foreground layer, the frame interactive entities live in.
    pub fn foreground_rotation(&self) -> f64 {
        self.layers.last().map(|l| l.rotation).unwrap_or(0.0)
    }

    /// Map a surface point into the unrotated foreground frame.
    pub fn to_logical(&self, p: Point) -> Point {
        unrotate_about(p, self.viewport.center(), self.foreground_rotation())
    }

    /// Map a logical point back to the surface.
    pub fn to_screen(&self, p: Point) -> Point {
        self.viewport.center() + rotate_vec(p.to_vec2(), self.foreground_rotation())
    }

    /// Particle layers, background first.
    pub fn layers(&self) -> &[ParticleLayer] {
        &self.layers
    }

    /// Star systems in catalog order.
    pub fn systems(&self) -> &[StarSystem] {
        &self.systems
    }

    /// The galaxy center.
    pub fn center(&self) -> &GalaxyCenter {
        &self.center
    }

    /// Currently hovered system.
    pub fn hovered(&self) -> Option<&StarSystem> {
        self.hovered.and_then(|i| self.systems.get(i))
    }

    /// Help/info panel.
    pub fn panel(&self) -> &InfoPanel {
        &self.panel
    }

    /// Name of the foreground particle renderer.
    pub fn renderer_name(&self) -> &'static str {
        self.renderer.name()
    }

    /// Center of the info button.
    pub fn info_button_center(&self) -> Point {
        let r = self.opts.info_button_radius;
        let pad = self.opts.info_button_pad;
        Point::new(self.viewport.width - pad - r, pad + r)
    }

    /// Recompute hover flags for a surface point. First matching system wins.
    pub fn update_hover(&mut self, mouse: Point) {
        let p = self.to_logical(mouse);
        let mut hovered = None;
        for (i, system) in self.systems.iter_mut().enumerate() {
            let hit = if hovered.is_some() {
                false
            } else {
                match system.hit_test(p) {
                    Ok(hit) => hit,
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping star system in hover test");
                        false
                    }
                }
            };
            if hit {
                hovered = Some(i);
            }
            system.radius.set_hover(hit);
        }
        self.hovered = hovered;

        let over_center = self.center.hit_test(p).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "skipping galaxy center in hover test");
            false
        });
        self.center.radius.set_hover(hovered.is_none() && over_center);
    }

    fn toggle_help(&mut self) {
        if self.panel.swallow_click() {
            return;
        }
        if let Some(help) = &self.help {
            self.panel
                .show(PanelContent::new(help.title.clone(), help.body.clone()));
        }
    }

    fn draw_tooltip(&self, painter: &mut Painter, system: &StarSystem, alpha: f64) {
        let screen = self.to_screen(system.position());
        let name = system.project().name.clone();
        let date = system.project().discovered_label();
        let width = monospace_width(&name, 14.0).max(monospace_width(&date, 12.0));
        let height = if date.is_empty() {
            TOOLTIP_LINE_HEIGHT + TOOLTIP_PADDING
        } else {
            TOOLTIP_LINE_HEIGHT + 16.0 + TOOLTIP_PADDING
        };
        let x = screen.x + 15.0;
        let y = screen.y - 35.0;
        painter.fill_rect(
            Rect::new(x, y, x + width + TOOLTIP_PADDING * 2.0, y + height),
            Rgba8::BLACK.with_alpha(0.75 * alpha),
        );
        let text_x = x + TOOLTIP_PADDING;
        let text_y = y + TOOLTIP_PADDING / 2.0 + 2.0;
        painter.text(
            name,
            Point::new(text_x, text_y),
            14.0,
            Rgba8::WHITE.with_alpha(alpha),
            TextAlign::Left,
            TextBaseline::Top,
        );
        if !date.is_empty() {
            painter.text(
                date,
                Point::new(text_x, text_y + TOOLTIP_LINE_HEIGHT),
                12.0,
                Rgba8::rgb(200, 200, 255).with_alpha(alpha),
                TextAlign::Left,
                TextBaseline::Top,
            );
        }
    }

    fn draw_info_button(&self, painter: &mut Painter, alpha: f64) {
        let c = self.info_button_center();
        painter.stroke_circle(
            c,
            self.opts.info_button_radius,
            2.0,
            Rgba8::WHITE.with_alpha(alpha),
        );
        painter.text(
            "i",
            Point::new(c.x, c.y + 1.0),
            22.0,
            Rgba8::rgb(200, 200, 255).with_alpha(alpha),
            TextAlign::Center,
            TextBaseline::Middle,
        );
    }
}

impl Scene for GalaxyScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Galaxy
    }

    fn update(&mut self, mouse: Point, dt_ms: f64) -> OrreryResult<()> {
        self.time_ms += dt_ms.max(0.0);
        for layer in &mut self.layers {
            layer.advance();
        }

        let moved = (mouse - self.last_mouse).hypot();
        if moved > self.opts.hover_move_threshold
            && self.time_ms - self.last_hover_ms > self.opts.hover_throttle_ms
        {
            if mouse.is_finite() {
                self.update_hover(mouse);
            }
            self.last_mouse = mouse;
            self.last_hover_ms = self.time_ms;
        }

        for system in &mut self.systems {
            system.update();
        }
        self.center.update(self.time_ms);
        self.stars.update();

        if let Some(fg) = self.layers.last() {
            self.renderer.set_center(self.viewport.center());
            self.renderer.sync(fg);
        }
        Ok(())
    }

    fn draw(&mut self, painter: &mut Painter, alpha: f64) -> OrreryResult<()> {
        self.stars.draw(painter, alpha);

        let center = self.viewport.center();
        let fg = self.layers.len().saturating_sub(1);
        for layer in &self.layers[..fg] {
            draw_layer(painter, layer, center, alpha);
        }
        if let Err(e) = self.renderer.draw(painter, alpha) {
            tracing::warn!(error = %e, renderer = self.renderer.name(), "foreground layer fell back to painter");
            if let Some(layer) = self.layers.last() {
                draw_layer(painter, layer, center, alpha);
            }
        }

        painter.save();
        painter.translate(center.to_vec2());
        painter.rotate(self.foreground_rotation());
        for system in &self.systems {
            system.draw(painter, alpha);
        }
        self.center.draw(painter, alpha);
        painter.restore();

        if let Some(system) = self.hovered() {
            self.draw_tooltip(painter, system, alpha);
        }
        self.draw_info_button(painter, alpha);
        self.panel.draw(painter, alpha);
        Ok(())
    }

    fn handle_click(&mut self, pos: Point) -> SceneCommand {
        if within_radius(pos, self.info_button_center(), self.opts.info_button_radius) {
            self.toggle_help();
            return SceneCommand::None;
        }
        if self.panel.swallow_click() {
            return SceneCommand::None;
        }

        let p = self.to_logical(pos);
        match self.center.hit_test(p) {
            Ok(true) => return SceneCommand::OpenAbout,
            Ok(false) => {}
            Err(e) => tracing::warn!(error = %e, "skipping galaxy center in click test"),
        }
        for system in &self.systems {
            match system.hit_test(p) {
                Ok(true) => {
                    return SceneCommand::OpenProject(Box::new(system.project().clone()));
                }
                Ok(false) => {}
                Err(e) => tracing::warn!(error = %e, "skipping star system in click test"),
            }
        }
        SceneCommand::None
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        for system in &mut self.systems {
            system.layout(viewport);
        }
        self.stars.resize(viewport);
        self.renderer.resize(viewport);
        self.renderer.set_center(viewport.center());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/galaxy.rs"]
mod tests;
