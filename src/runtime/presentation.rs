use std::path::Path;

use crate::config::PresentationOpts;
use crate::data::load::{load_about, load_catalog};
use crate::data::model::{AboutRecord, ProjectCatalog};
use crate::foundation::core::{Point, Viewport};
use crate::foundation::error::OrreryResult;
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::draw::Painter;
use crate::runtime::clock::{Debounce, FrameClock, Throttle};
use crate::state::machine::ViewStateMachine;
use crate::state::route::{History, Route};

/// Host-facing driver: owns the state machine, the route history and the input gates.
///
/// Every entry point takes the host timestamp in milliseconds so playback is reproducible.
#[derive(Debug)]
pub struct Presentation {
    machine: ViewStateMachine,
    history: History,
    clock: FrameClock,
    pointer: Throttle,
    resize: Debounce<Viewport>,
    destroyed: bool,
}

impl Presentation {
    /// Presentation over already loaded data.
    pub fn new(catalog: ProjectCatalog, about: AboutRecord, opts: PresentationOpts) -> Self {
        let clock = FrameClock::new(opts.frame_interval_ms);
        let pointer = Throttle::new(opts.pointer_throttle_ms);
        let resize = Debounce::new(opts.resize_debounce_ms);
        Self {
            machine: ViewStateMachine::new(catalog, about, opts),
            history: History::new(Route::Galaxy),
            clock,
            pointer,
            resize,
            destroyed: false,
        }
    }

    /// Load both data files, falling back to empty/default content on any failure.
    pub fn from_paths(projects: &Path, about: &Path, opts: PresentationOpts) -> Self {
        Self::new(load_catalog(projects), load_about(about), opts)
    }

    /// The underlying state machine.
    pub fn machine(&self) -> &ViewStateMachine {
        &self.machine
    }

    /// Route history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Whether display callbacks currently run frames.
    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Show `route` and start the frame loop. Returns the route actually shown.
    #[tracing::instrument(skip_all, fields(route = %route))]
    pub fn start(&mut self, route: &Route) -> Route {
        let shown = self.machine.show_route(route);
        self.history = History::new(shown.clone());
        self.destroyed = false;
        self.clock.start();
        shown
    }

    /// Display callback. Returns `true` when a tick ran.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if self.destroyed {
            return false;
        }
        if let Some(viewport) = self.resize.poll(now_ms) {
            tracing::debug!(width = viewport.width, height = viewport.height, "resize applied");
            self.machine.resize(viewport);
        }
        if !self.clock.accept(now_ms) {
            return false;
        }
        self.machine.tick(now_ms);
        true
    }

    /// Pointer moved to `pos`. Rate limited.
    pub fn pointer_move(&mut self, pos: Point, now_ms: f64) {
        if !self.destroyed && self.pointer.ready(now_ms) {
            self.machine.set_mouse(pos);
        }
    }

    /// Click at `pos`, handled immediately. A click that starts a transition pushes its route.
    pub fn click(&mut self, pos: Point) -> Option<Route> {
        if self.destroyed {
            return None;
        }
        let route = self.machine.click(pos)?;
        self.history.push(route.clone());
        Some(route)
    }

    /// Surface resized. Applied once resizing has been quiet for the debounce period.
    pub fn resize(&mut self, viewport: Viewport, now_ms: f64) {
        if self.destroyed {
            return;
        }
        self.resize.push(viewport, now_ms);
    }

    /// Apply a size immediately, bypassing the debounce. Meant for initial sizing.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.machine.resize(viewport);
    }

    /// Visibility change: hidden pauses the loop, visible resumes it without a time jump.
    pub fn set_visible(&mut self, visible: bool, now_ms: f64) {
        if self.destroyed {
            return;
        }
        if visible {
            if !self.clock.is_running() {
                self.clock.resume(now_ms);
                self.machine.reset_clock();
                tracing::debug!("resumed");
            }
        } else {
            self.clock.pause();
            tracing::debug!("paused");
        }
    }

    /// History back. Shows the previous route without animation.
    pub fn back(&mut self) -> Option<Route> {
        if self.destroyed {
            return None;
        }
        let route = self.history.back()?.clone();
        Some(self.show_current(route))
    }

    /// History forward. Shows the next route without animation.
    pub fn forward(&mut self) -> Option<Route> {
        if self.destroyed {
            return None;
        }
        let route = self.history.forward()?.clone();
        Some(self.show_current(route))
    }

    /// Push `route` and show it without animation. Once destroyed, returns the current route
    /// unchanged.
    pub fn navigate(&mut self, route: &Route) -> Route {
        if self.destroyed {
            return self.history.current().clone();
        }
        let shown = self.machine.show_route(route);
        self.history.push(shown.clone());
        shown
    }

    fn show_current(&mut self, route: Route) -> Route {
        let shown = self.machine.show_route(&route);
        if shown != route {
            self.history.replace(shown.clone());
        }
        shown
    }

    /// Record and rasterize the current frame.
    pub fn render(&mut self, backend: &mut dyn RenderBackend) -> OrreryResult<FrameRGBA> {
        let mut painter = Painter::new(self.machine.viewport(), self.machine.opts().background);
        self.machine.draw(&mut painter);
        backend.render(&painter.finish())
    }

    /// Stop the loop for good. Input is ignored until the next [`Presentation::start`].
    pub fn destroy(&mut self) {
        self.clock.pause();
        self.destroyed = true;
        tracing::debug!("destroyed");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/presentation.rs"]
mod tests;
