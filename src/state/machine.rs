use crate::config::PresentationOpts;
use crate::data::model::{AboutRecord, ProjectCatalog, ProjectRecord};
use crate::foundation::core::{Point, Viewport};
use crate::foundation::error::{OrreryError, OrreryResult};
use crate::foundation::rng::Rng64;
use crate::render::draw::Painter;
use crate::scene::about::AboutScene;
use crate::scene::galaxy::GalaxyScene;
use crate::scene::hyperspeed::{Direction, HyperspeedScene};
use crate::scene::solar::SolarSystemScene;
use crate::scene::{Scene, SceneCommand, SceneKind, TransitionEffect};
use crate::state::route::Route;
use std::f64::consts::PI;

/// Top-level view state. Exactly one is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppState {
    /// Nothing shown yet.
    Loading,
    /// Galaxy, interactive.
    Galaxy,
    /// Solar system, interactive.
    SolarSystem,
    /// About page, interactive.
    AboutView,
    /// Galaxy fading before a flight out.
    FadingOutGalaxy,
    /// Solar system or about fading before the flight home.
    FadingOutView,
    /// Outward streaks.
    HyperspeedIn,
    /// Inward streaks.
    HyperspeedOut,
    /// Empty frames before a project or about page.
    PauseBeforeNewView,
    /// Empty frames before the galaxy.
    PauseBeforeGalaxy,
    /// Solar system fading in.
    FadingInSolar,
    /// Galaxy fading in.
    FadingInGalaxy,
    /// About page fading in.
    FadingInAbout,
}

impl AppState {
    /// `true` for the interactive states.
    pub fn is_steady(self) -> bool {
        matches!(self, Self::Galaxy | Self::SolarSystem | Self::AboutView)
    }

    /// `true` for any timed transition phase.
    pub fn is_transitioning(self) -> bool {
        !self.is_steady() && self != Self::Loading
    }
}

/// Where a running transition ends up.
#[derive(Clone, Debug, PartialEq)]
pub enum TransitionTarget {
    /// A project's solar system.
    Project(Box<ProjectRecord>),
    /// The about page.
    About,
    /// Back to the galaxy.
    Galaxy,
}

impl TransitionTarget {
    /// Route that shows the target.
    pub fn route(&self) -> Route {
        match self {
            Self::Project(p) => Route::Project(p.id.clone()),
            Self::About => Route::About,
            Self::Galaxy => Route::Galaxy,
        }
    }
}

/// Progress through the current phase.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionState {
    /// Ticks spent in the phase; resets to 0 at every phase change.
    pub progress: u32,
    /// Ticks the phase lasts.
    pub duration: u32,
    /// Payload carried across the transition.
    pub target: Option<TransitionTarget>,
}

impl TransitionState {
    /// `progress / duration` in `0..=1`.
    pub fn fraction(&self) -> f64 {
        if self.duration == 0 {
            return 1.0;
        }
        (f64::from(self.progress) / f64::from(self.duration)).min(1.0)
    }
}

/// Single authority over which scene is shown and how transitions between scenes progress.
///
/// Progress is counted in ticks, one per [`ViewStateMachine::tick`], while scenes receive the
/// clamped wall-clock delta.
pub struct ViewStateMachine {
    state: AppState,
    transition: TransitionState,
    scene: Option<Box<dyn Scene>>,
    effect: Option<HyperspeedScene>,
    catalog: ProjectCatalog,
    about: AboutRecord,
    opts: PresentationOpts,
    viewport: Viewport,
    rng: Rng64,
    mouse: Point,
    last_tick: Option<f64>,
}

impl std::fmt::Debug for ViewStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewStateMachine")
            .field("state", &self.state)
            .field("transition", &self.transition)
            .field("scene", &self.scene.as_ref().map(|s| s.kind()))
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl ViewStateMachine {
    /// Machine in [`AppState::Loading`]; call [`ViewStateMachine::show_route`] to show a scene.
    pub fn new(catalog: ProjectCatalog, about: AboutRecord, opts: PresentationOpts) -> Self {
        let rng = Rng64::from_seed_or_time(opts.seed);
        let viewport = opts.viewport;
        Self {
            state: AppState::Loading,
            transition: TransitionState::default(),
            scene: None,
            effect: None,
            catalog,
            about,
            opts,
            viewport,
            rng,
            mouse: Point::ZERO,
            last_tick: None,
        }
    }

    /// Active state.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Current phase progress.
    pub fn transition(&self) -> &TransitionState {
        &self.transition
    }

    /// Kind of the live scene, if any.
    pub fn scene_kind(&self) -> Option<SceneKind> {
        self.scene.as_ref().map(|s| s.kind())
    }

    /// `true` while a hyperspeed effect is live.
    pub fn has_effect(&self) -> bool {
        self.effect.is_some()
    }

    /// Surface size.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Loaded projects.
    pub fn catalog(&self) -> &ProjectCatalog {
        &self.catalog
    }

    /// Options in use.
    pub fn opts(&self) -> &PresentationOpts {
        &self.opts
    }

    /// Set the pointer position handed to scene updates.
    pub fn set_mouse(&mut self, p: Point) {
        self.mouse = p;
    }

    /// Pointer position handed to scene updates.
    pub fn mouse(&self) -> Point {
        self.mouse
    }

    /// Forget the last tick time so the next tick uses a zero delta.
    pub fn reset_clock(&mut self) {
        self.last_tick = None;
    }

    /// Show `route` immediately, without a transition.
    ///
    /// Returns the route actually shown: unknown project ids resolve to the galaxy.
    pub fn show_route(&mut self, route: &Route) -> Route {
        self.effect = None;
        self.transition = TransitionState::default();
        let shown = match route {
            Route::Project(id) => match self.catalog.get(id).cloned() {
                Some(project) => {
                    self.scene = Some(self.make_solar(project));
                    self.state = AppState::SolarSystem;
                    route.clone()
                }
                None => {
                    tracing::warn!(id = %id, "unknown project, showing the galaxy");
                    self.scene = self.make_galaxy();
                    self.state = AppState::Galaxy;
                    Route::Galaxy
                }
            },
            Route::About => {
                self.scene = Some(self.make_about());
                self.state = AppState::AboutView;
                Route::About
            }
            Route::Galaxy => {
                self.scene = self.make_galaxy();
                self.state = AppState::Galaxy;
                Route::Galaxy
            }
        };
        tracing::debug!(route = %shown, state = ?self.state, "route shown");
        shown
    }

    /// Start an animated transition toward `target`. Only valid from a steady state.
    pub fn request_scene_transition(&mut self, target: TransitionTarget) -> OrreryResult<()> {
        let d = &self.opts.durations;
        let (next, duration) = match (self.state, &target) {
            (AppState::Galaxy, TransitionTarget::Project(_)) => {
                (AppState::FadingOutGalaxy, d.fade_out_to_project)
            }
            (AppState::Galaxy, TransitionTarget::About) => {
                (AppState::FadingOutGalaxy, d.fade_out_to_about)
            }
            (AppState::SolarSystem | AppState::AboutView, TransitionTarget::Galaxy) => {
                (AppState::FadingOutView, d.fade_out_to_galaxy)
            }
            (state, target) => {
                return Err(OrreryError::validation(format!(
                    "cannot transition to {} from {state:?}",
                    target.route()
                )));
            }
        };
        tracing::debug!(from = ?self.state, to = ?next, route = %target.route(), "transition requested");
        self.state = next;
        self.transition = TransitionState {
            progress: 0,
            duration,
            target: Some(target),
        };
        Ok(())
    }

    /// Advance one tick at wall-clock time `now_ms`.
    pub fn tick(&mut self, now_ms: f64) {
        let dt = match self.last_tick {
            Some(last) => (now_ms - last).clamp(0.0, self.opts.max_dt_ms),
            None => 0.0,
        };
        self.last_tick = Some(now_ms);
        self.step(dt);
    }

    /// Advance one tick with an explicit delta (clamped to the configured maximum).
    pub fn step(&mut self, dt_ms: f64) {
        let dt = dt_ms.clamp(0.0, self.opts.max_dt_ms);
        match self.state {
            AppState::Loading => {}
            AppState::Galaxy | AppState::SolarSystem | AppState::AboutView => {
                self.update_scene(dt);
            }
            AppState::FadingOutGalaxy | AppState::FadingOutView => {
                self.advance_progress();
            }
            AppState::HyperspeedIn | AppState::HyperspeedOut => {
                if let Some(effect) = &mut self.effect {
                    effect.update(dt);
                }
                self.advance_progress();
            }
            AppState::PauseBeforeNewView | AppState::PauseBeforeGalaxy => {
                self.advance_progress();
            }
            AppState::FadingInSolar | AppState::FadingInGalaxy | AppState::FadingInAbout => {
                self.transition.progress += 1;
                self.update_scene(dt);
                if self.transition.progress >= self.transition.duration {
                    self.finish_phase();
                }
            }
        }
    }

    fn advance_progress(&mut self) {
        self.transition.progress += 1;
        if self.transition.progress >= self.transition.duration {
            self.finish_phase();
        }
    }

    fn update_scene(&mut self, dt: f64) {
        let mouse = self.mouse;
        if let Some(scene) = &mut self.scene
            && let Err(e) = scene.update(mouse, dt)
        {
            tracing::warn!(scene = ?scene.kind(), error = %e, "scene update failed");
        }
    }

    fn enter(&mut self, state: AppState, duration: u32) {
        tracing::debug!(from = ?self.state, to = ?state, duration, "phase change");
        self.state = state;
        self.transition.progress = 0;
        self.transition.duration = duration;
    }

    fn finish_phase(&mut self) {
        let d = self.opts.durations.clone();
        match self.state {
            AppState::FadingOutGalaxy => {
                self.scene = None;
                self.effect = Some(self.make_hyperspeed(Direction::In));
                self.enter(AppState::HyperspeedIn, d.hyperspeed);
            }
            AppState::FadingOutView => {
                self.scene = None;
                self.effect = Some(self.make_hyperspeed(Direction::Out));
                self.enter(AppState::HyperspeedOut, d.hyperspeed);
            }
            AppState::HyperspeedIn => {
                self.effect = None;
                self.enter(AppState::PauseBeforeNewView, d.pause);
            }
            AppState::HyperspeedOut => {
                self.effect = None;
                self.enter(AppState::PauseBeforeGalaxy, d.pause);
            }
            AppState::PauseBeforeNewView => match self.transition.target.clone() {
                Some(TransitionTarget::Project(project)) => {
                    self.scene = Some(self.make_solar(*project));
                    self.enter(AppState::FadingInSolar, d.fade_in);
                }
                Some(TransitionTarget::About) => {
                    self.scene = Some(self.make_about());
                    self.enter(AppState::FadingInAbout, d.fade_in);
                }
                other => {
                    tracing::warn!(pending = ?other, "no view to fly to, returning to the galaxy");
                    self.scene = self.make_galaxy();
                    self.enter(AppState::FadingInGalaxy, d.fade_in);
                }
            },
            AppState::PauseBeforeGalaxy => {
                self.scene = self.make_galaxy();
                self.enter(AppState::FadingInGalaxy, d.fade_in);
            }
            AppState::FadingInSolar => self.settle(AppState::SolarSystem),
            AppState::FadingInAbout => self.settle(AppState::AboutView),
            AppState::FadingInGalaxy => self.settle(AppState::Galaxy),
            AppState::Loading
            | AppState::Galaxy
            | AppState::SolarSystem
            | AppState::AboutView => {}
        }
    }

    fn settle(&mut self, state: AppState) {
        self.enter(state, 0);
        self.transition.target = None;
    }

    /// Draw alpha for the current phase; `None` when nothing is drawn.
    pub fn alpha(&self) -> Option<f64> {
        let t = self.transition.fraction();
        match self.state {
            AppState::Loading | AppState::PauseBeforeNewView | AppState::PauseBeforeGalaxy => None,
            AppState::Galaxy | AppState::SolarSystem | AppState::AboutView => Some(1.0),
            AppState::FadingOutGalaxy | AppState::FadingOutView => Some(1.0 - t),
            AppState::HyperspeedIn | AppState::HyperspeedOut => Some((PI * t).sin().max(0.0)),
            AppState::FadingInSolar | AppState::FadingInGalaxy | AppState::FadingInAbout => {
                Some(t)
            }
        }
    }

    /// Record the current frame into `painter`.
    pub fn draw(&mut self, painter: &mut Painter) {
        let Some(alpha) = self.alpha() else {
            return;
        };
        if let Some(effect) = &self.effect {
            effect.draw(painter, alpha);
        }
        if let Some(scene) = &mut self.scene
            && let Err(e) = scene.draw(painter, alpha)
        {
            tracing::warn!(scene = ?scene.kind(), error = %e, "scene draw failed");
        }
    }

    /// Deliver a click. Returns the route to push when the click starts a transition.
    pub fn click(&mut self, pos: Point) -> Option<Route> {
        if !self.state.is_steady() {
            return None;
        }
        let command = self.scene.as_mut()?.handle_click(pos);
        let target = match command {
            SceneCommand::None => return None,
            SceneCommand::OpenProject(project) => TransitionTarget::Project(project),
            SceneCommand::OpenAbout => TransitionTarget::About,
            SceneCommand::BackToGalaxy => TransitionTarget::Galaxy,
        };
        let route = target.route();
        match self.request_scene_transition(target) {
            Ok(()) => Some(route),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring click");
                None
            }
        }
    }

    /// Propagate a new surface size to the live scene and effect.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if let Some(scene) = &mut self.scene {
            scene.resize(viewport);
        }
        if let Some(effect) = &mut self.effect {
            effect.resize(viewport);
        }
    }

    fn make_galaxy(&mut self) -> Option<Box<dyn Scene>> {
        let help = self.about.help.clone();
        match GalaxyScene::new(&self.catalog, help, &self.opts, self.viewport, &mut self.rng) {
            Ok(scene) => Some(Box::new(scene)),
            Err(e) => {
                tracing::warn!(error = %e, "galaxy scene could not be built");
                None
            }
        }
    }

    fn make_solar(&mut self, project: ProjectRecord) -> Box<dyn Scene> {
        Box::new(SolarSystemScene::new(
            project,
            &self.opts,
            self.viewport,
            &mut self.rng,
        ))
    }

    fn make_about(&mut self) -> Box<dyn Scene> {
        Box::new(AboutScene::new(
            self.about.clone(),
            &self.opts,
            self.viewport,
            &mut self.rng,
        ))
    }

    fn make_hyperspeed(&mut self, direction: Direction) -> HyperspeedScene {
        HyperspeedScene::new(
            direction,
            &self.opts.hyperspeed,
            self.viewport,
            self.rng.fork(),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/machine.rs"]
mod tests;
