//! Steady scenes (galaxy, solar system, about) and the hyperspeed transition effect.

use crate::data::model::ProjectRecord;
use crate::foundation::core::{Point, Viewport};
use crate::foundation::error::OrreryResult;
use crate::render::draw::Painter;

/// About view.
pub mod about;
/// Galaxy view.
pub mod galaxy;
/// Hyperspeed streaks.
pub mod hyperspeed;
/// Solar system view.
pub mod solar;
/// Drifting background stars.
pub mod starfield;
/// Typewriter text.
pub mod typing;
/// Panels and buttons drawn on the canvas.
pub mod ui;

/// Which steady scene is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneKind {
    /// Galaxy of star systems.
    Galaxy,
    /// One project's solar system.
    Solar,
    /// About page.
    About,
}

/// Navigation a scene asks for in response to a click.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneCommand {
    /// Nothing to do; the click may still have changed scene-local state.
    None,
    /// Fly to a project's solar system.
    OpenProject(Box<ProjectRecord>),
    /// Fly to the about page.
    OpenAbout,
    /// Return to the galaxy.
    BackToGalaxy,
}

/// A steady scene driven by the view state machine.
///
/// Positions are surface pixels. Errors from `update` and `draw` are logged by the caller and
/// never stop the frame loop.
pub trait Scene {
    /// Scene kind.
    fn kind(&self) -> SceneKind;
    /// Advance one tick. `dt_ms` is already clamped.
    fn update(&mut self, mouse: Point, dt_ms: f64) -> OrreryResult<()>;
    /// Record the scene at `alpha`.
    fn draw(&mut self, painter: &mut Painter, alpha: f64) -> OrreryResult<()>;
    /// Resolve a click at `pos`.
    fn handle_click(&mut self, pos: Point) -> SceneCommand;
    /// React to a new surface size.
    fn resize(&mut self, viewport: Viewport);
}

/// A decorative bridge between two scenes. It takes no input.
pub trait TransitionEffect {
    /// Advance one tick.
    fn update(&mut self, dt_ms: f64);
    /// Record the effect at `alpha`.
    fn draw(&self, painter: &mut Painter, alpha: f64);
    /// React to a new surface size.
    fn resize(&mut self, viewport: Viewport);
}
