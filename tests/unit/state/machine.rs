use super::*;
use crate::data::model::{GalaxyPosition, SunRecord};
use std::cell::RefCell;
use std::rc::Rc;

fn project(id: &str) -> ProjectRecord {
    ProjectRecord {
        id: id.to_owned(),
        name: id.to_uppercase(),
        color: "gold".to_owned(),
        // 800x600 viewport: logical (100, 0).
        galaxy_position: GalaxyPosition {
            x: 0.5 + 100.0 / 450.0,
            y: 0.5,
        },
        planets: Vec::new(),
        sun: SunRecord::default(),
        date: None,
        image: None,
    }
}

fn opts() -> PresentationOpts {
    let mut o = PresentationOpts::default();
    o.viewport = Viewport::new(800.0, 600.0).unwrap();
    o.seed = Some(7);
    for layer in &mut o.galaxy.layers {
        layer.count = 20;
    }
    o.galaxy.background_stars = 5;
    o.solar.background_stars = 5;
    o.about.background_stars = 5;
    o.hyperspeed.count = 10;
    o
}

fn machine() -> ViewStateMachine {
    let catalog = ProjectCatalog::from_records([project("vega")]);
    ViewStateMachine::new(catalog, AboutRecord::default(), opts())
}

#[derive(Default)]
struct Probe {
    dts: Vec<f64>,
    viewports: Vec<Viewport>,
    draws: Vec<f64>,
}

struct FakeScene {
    probe: Rc<RefCell<Probe>>,
    fail: bool,
}

impl Scene for FakeScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Galaxy
    }

    fn update(&mut self, _mouse: Point, dt_ms: f64) -> OrreryResult<()> {
        self.probe.borrow_mut().dts.push(dt_ms);
        if self.fail {
            return Err(OrreryError::data("boom"));
        }
        Ok(())
    }

    fn draw(&mut self, _painter: &mut Painter, alpha: f64) -> OrreryResult<()> {
        self.probe.borrow_mut().draws.push(alpha);
        if self.fail {
            return Err(OrreryError::render("boom"));
        }
        Ok(())
    }

    fn handle_click(&mut self, _pos: Point) -> SceneCommand {
        SceneCommand::OpenAbout
    }

    fn resize(&mut self, viewport: Viewport) {
        self.probe.borrow_mut().viewports.push(viewport);
    }
}

fn with_fake(m: &mut ViewStateMachine, fail: bool) -> Rc<RefCell<Probe>> {
    let probe = Rc::new(RefCell::new(Probe::default()));
    m.scene = Some(Box::new(FakeScene {
        probe: probe.clone(),
        fail,
    }));
    probe
}

#[test]
fn starts_loading_and_draws_nothing() {
    let mut m = machine();
    assert_eq!(m.state(), AppState::Loading);
    assert_eq!(m.alpha(), None);
    m.tick(0.0);
    m.tick(16.0);
    assert_eq!(m.state(), AppState::Loading);
    assert_eq!(m.transition().progress, 0);
}

#[test]
fn show_route_selects_scene_without_transition() {
    let mut m = machine();
    assert_eq!(m.show_route(&Route::About), Route::About);
    assert_eq!(m.state(), AppState::AboutView);
    assert_eq!(m.scene_kind(), Some(SceneKind::About));

    let r = Route::Project("vega".to_owned());
    assert_eq!(m.show_route(&r), r);
    assert_eq!(m.state(), AppState::SolarSystem);

    assert_eq!(m.show_route(&Route::Galaxy), Route::Galaxy);
    assert_eq!(m.scene_kind(), Some(SceneKind::Galaxy));
}

#[test]
fn unknown_project_route_falls_back_to_galaxy() {
    let mut m = machine();
    let shown = m.show_route(&Route::Project("nope".to_owned()));
    assert_eq!(shown, Route::Galaxy);
    assert_eq!(m.state(), AppState::Galaxy);
}

#[test]
fn star_click_flies_to_the_solar_system() {
    let mut m = machine();
    m.show_route(&Route::Galaxy);
    let route = m.click(Point::new(500.0, 300.0));
    assert_eq!(route, Some(Route::Project("vega".to_owned())));
    assert_eq!(m.state(), AppState::FadingOutGalaxy);
    assert_eq!(m.transition().duration, 20);

    let phases = [
        (AppState::FadingOutGalaxy, 20, AppState::HyperspeedIn),
        (AppState::HyperspeedIn, 60, AppState::PauseBeforeNewView),
        (AppState::PauseBeforeNewView, 15, AppState::FadingInSolar),
        (AppState::FadingInSolar, 30, AppState::SolarSystem),
    ];
    for (from, ticks, to) in phases {
        assert_eq!(m.state(), from);
        for i in 0..ticks - 1 {
            m.step(16.0);
            assert_eq!(m.state(), from);
            assert_eq!(m.transition().progress, i + 1);
        }
        m.step(16.0);
        assert_eq!(m.state(), to);
        assert_eq!(m.transition().progress, 0);
        if to == AppState::FadingInSolar {
            let Some(TransitionTarget::Project(p)) = &m.transition().target else {
                panic!("missing target project");
            };
            assert_eq!(p.id, "vega");
        }
    }
    assert_eq!(m.scene_kind(), Some(SceneKind::Solar));
    assert!(m.transition().target.is_none());
}

#[test]
fn back_click_flies_home() {
    let mut m = machine();
    m.show_route(&Route::About);
    assert_eq!(m.click(Point::new(40.0, 40.0)), Some(Route::Galaxy));
    assert_eq!(m.state(), AppState::FadingOutView);
    for _ in 0..30 {
        m.step(16.0);
    }
    assert_eq!(m.state(), AppState::HyperspeedOut);
    assert!(m.has_effect());
    assert!(m.scene_kind().is_none());
    for _ in 0..60 {
        m.step(16.0);
    }
    assert_eq!(m.state(), AppState::PauseBeforeGalaxy);
    assert!(!m.has_effect());
    for _ in 0..15 {
        m.step(16.0);
    }
    assert_eq!(m.state(), AppState::FadingInGalaxy);
    assert_eq!(m.scene_kind(), Some(SceneKind::Galaxy));
    for _ in 0..30 {
        m.step(16.0);
    }
    assert_eq!(m.state(), AppState::Galaxy);
}

#[test]
fn center_click_uses_about_fade_duration() {
    let mut m = machine();
    m.show_route(&Route::Galaxy);
    assert_eq!(m.click(Point::new(400.0, 300.0)), Some(Route::About));
    assert_eq!(m.transition().duration, 30);
    assert_eq!(m.transition().target, Some(TransitionTarget::About));
}

#[test]
fn alpha_curves_per_phase() {
    let mut m = machine();
    m.show_route(&Route::Galaxy);
    assert_eq!(m.alpha(), Some(1.0));

    m.state = AppState::FadingOutGalaxy;
    m.transition.duration = 20;
    m.transition.progress = 0;
    assert_eq!(m.alpha(), Some(1.0));
    m.transition.progress = 20;
    assert_eq!(m.alpha(), Some(0.0));

    m.state = AppState::HyperspeedIn;
    m.transition.duration = 60;
    m.transition.progress = 0;
    assert_eq!(m.alpha(), Some(0.0));
    m.transition.progress = 30;
    assert!((m.alpha().unwrap() - 1.0).abs() < 1e-12);
    m.transition.progress = 60;
    assert!(m.alpha().unwrap().abs() < 1e-12);

    m.state = AppState::PauseBeforeGalaxy;
    assert_eq!(m.alpha(), None);

    m.state = AppState::FadingInAbout;
    m.transition.duration = 30;
    m.transition.progress = 0;
    assert_eq!(m.alpha(), Some(0.0));
    m.transition.progress = 30;
    assert_eq!(m.alpha(), Some(1.0));
}

#[test]
fn transitions_only_start_from_steady_states() {
    let mut m = machine();
    assert!(m.request_scene_transition(TransitionTarget::About).is_err());
    m.show_route(&Route::Galaxy);
    assert!(m.request_scene_transition(TransitionTarget::Galaxy).is_err());
    assert!(m.request_scene_transition(TransitionTarget::About).is_ok());
    assert!(m.request_scene_transition(TransitionTarget::About).is_err());
}

#[test]
fn clicks_are_ignored_mid_transition() {
    let mut m = machine();
    m.show_route(&Route::Galaxy);
    m.click(Point::new(400.0, 300.0));
    assert_eq!(m.click(Point::new(500.0, 300.0)), None);
    assert_eq!(m.state(), AppState::FadingOutGalaxy);
}

#[test]
fn tick_delta_is_clamped() {
    let mut m = machine();
    m.show_route(&Route::Galaxy);
    let probe = with_fake(&mut m, false);
    m.tick(1_000.0);
    m.tick(1_016.0);
    m.tick(9_000.0);
    m.tick(8_000.0);
    assert_eq!(probe.borrow().dts, vec![0.0, 16.0, 40.0, 0.0]);
}

#[test]
fn reset_clock_resumes_with_zero_delta() {
    let mut m = machine();
    m.show_route(&Route::Galaxy);
    let probe = with_fake(&mut m, false);
    m.tick(0.0);
    m.reset_clock();
    m.tick(60_000.0);
    assert_eq!(probe.borrow().dts, vec![0.0, 0.0]);
}

#[test]
fn failing_scene_does_not_stop_the_loop() {
    let mut m = machine();
    m.show_route(&Route::Galaxy);
    let probe = with_fake(&mut m, true);
    let vp = m.viewport();
    for i in 0..3 {
        m.step(16.0);
        let mut p = Painter::new(vp, crate::foundation::color::Rgba8::BLACK);
        m.draw(&mut p);
        assert_eq!(probe.borrow().dts.len(), i + 1);
    }
    assert_eq!(probe.borrow().draws, vec![1.0, 1.0, 1.0]);
    assert_eq!(m.state(), AppState::Galaxy);
}

#[test]
fn scene_is_frozen_during_fade_out_and_live_during_fade_in() {
    let mut m = machine();
    m.show_route(&Route::Galaxy);
    let probe = with_fake(&mut m, false);
    m.request_scene_transition(TransitionTarget::About).unwrap();
    for _ in 0..5 {
        m.step(16.0);
    }
    assert!(probe.borrow().dts.is_empty());

    m.state = AppState::FadingInGalaxy;
    m.transition.progress = 0;
    m.transition.duration = 30;
    m.step(16.0);
    assert_eq!(probe.borrow().dts, vec![16.0]);
}

#[test]
fn resize_reaches_the_live_scene() {
    let mut m = machine();
    m.show_route(&Route::Galaxy);
    let probe = with_fake(&mut m, false);
    let vp = Viewport::new(1024.0, 768.0).unwrap();
    m.resize(vp);
    assert_eq!(m.viewport(), vp);
    assert_eq!(probe.borrow().viewports, vec![vp]);
}
