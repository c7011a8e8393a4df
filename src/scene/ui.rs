use crate::config::ButtonOpts;
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Point, Rect, Viewport};
use crate::foundation::math::within_radius;
use crate::render::draw::{Painter, TextAlign, TextBaseline, monospace_width};

const PANEL_PADDING: f64 = 15.0;
const PANEL_LINE_HEIGHT: f64 = 20.0;
const PANEL_TITLE_SIZE: f64 = 16.0;
const PANEL_BODY_SIZE: f64 = 14.0;

/// What an [`InfoPanel`] shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PanelContent {
    /// Bold first line.
    pub title: String,
    /// Optional line between title and body.
    pub subtext: Option<String>,
    /// Body text; `\n` starts a new line.
    pub body: String,
}

impl PanelContent {
    /// Title and body without subtext.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtext: None,
            body: body.into(),
        }
    }

    fn lines(&self) -> Vec<&str> {
        let mut lines: Vec<&str> = Vec::new();
        if let Some(s) = self.subtext.as_deref().filter(|s| !s.is_empty()) {
            lines.push(s);
        }
        lines.extend(self.body.split('\n'));
        lines
    }
}

/// Inspector overlay centered on the surface.
///
/// While open it swallows the next click, which closes it.
#[derive(Clone, Debug, Default)]
pub struct InfoPanel {
    content: Option<PanelContent>,
}

impl InfoPanel {
    /// Closed panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open with `content`, replacing anything shown.
    pub fn show(&mut self, content: PanelContent) {
        tracing::debug!(title = %content.title, "info panel opened");
        self.content = Some(content);
    }

    /// Close.
    pub fn hide(&mut self) {
        self.content = None;
    }

    /// `true` while shown.
    pub fn is_open(&self) -> bool {
        self.content.is_some()
    }

    /// Shown content, if open.
    pub fn content(&self) -> Option<&PanelContent> {
        self.content.as_ref()
    }

    /// Close the panel if open. Returns `true` when the click was consumed.
    pub fn swallow_click(&mut self) -> bool {
        self.content.take().is_some()
    }

    /// Box for `content`, centered in `viewport`.
    pub fn frame_for(content: &PanelContent, viewport: Viewport) -> Rect {
        let lines = content.lines();
        let widest = lines
            .iter()
            .map(|l| monospace_width(l, PANEL_BODY_SIZE))
            .fold(monospace_width(&content.title, PANEL_BODY_SIZE), f64::max);
        let w = widest + PANEL_PADDING * 2.0;
        let h = (lines.len() as f64 + 1.0) * PANEL_LINE_HEIGHT + PANEL_PADDING * 2.0;
        let x = (viewport.width - w) / 2.0;
        let y = (viewport.height - h) / 2.0;
        Rect::new(x, y, x + w, y + h)
    }

    /// Draw when open.
    pub fn draw(&self, painter: &mut Painter, alpha: f64) {
        let Some(content) = &self.content else {
            return;
        };
        let frame = Self::frame_for(content, painter.viewport());
        painter.fill_rect(frame, Rgba8::BLACK.with_alpha(0.8 * alpha));
        painter.stroke_rect(frame, 1.0, Rgba8::WHITE.with_alpha(alpha));

        let left = frame.x0 + PANEL_PADDING;
        let top = frame.y0 + PANEL_PADDING;
        let white = Rgba8::WHITE.with_alpha(alpha);
        painter.text(
            content.title.clone(),
            Point::new(left, top),
            PANEL_TITLE_SIZE,
            white,
            TextAlign::Left,
            TextBaseline::Top,
        );
        for (i, line) in content.lines().into_iter().enumerate() {
            painter.text(
                line,
                Point::new(left, top + PANEL_LINE_HEIGHT * (i as f64 + 1.2)),
                PANEL_BODY_SIZE,
                white,
                TextAlign::Left,
                TextBaseline::Top,
            );
        }
    }
}

/// `true` when `p` is strictly inside the button circle.
pub fn button_hit(button: &ButtonOpts, p: Point) -> bool {
    within_radius(p, Point::new(button.x, button.y), button.radius)
}

/// Outlined circle with a `<` glyph.
pub fn draw_back_button(painter: &mut Painter, button: &ButtonOpts, alpha: f64) {
    let c = Point::new(button.x, button.y);
    let white = Rgba8::WHITE.with_alpha(alpha);
    painter.stroke_circle(c, button.radius, 2.0, white);
    painter.text("<", c, 20.0, white, TextAlign::Center, TextBaseline::Middle);
}

#[cfg(test)]
#[path = "../../tests/unit/scene/ui.rs"]
mod tests;
