use super::*;

fn scene() -> AboutScene {
    let about = AboutRecord {
        title: "Me".to_owned(),
        info: "line one\nline two".to_owned(),
        image: None,
        help: None,
    };
    let vp = Viewport::new(640.0, 480.0).unwrap();
    AboutScene::new(about, &PresentationOpts::default(), vp, &mut Rng64::new(1))
}

#[test]
fn pulse_follows_scene_time() {
    let mut s = scene();
    s.update(Point::ZERO, 500.0).unwrap();
    assert!((s.pulse() - 0.5f64.sin() * 5.0).abs() < 1e-12);
}

#[test]
fn clicking_the_black_hole_opens_about_text() {
    let mut s = scene();
    assert_eq!(s.handle_click(Point::new(320.0, 240.0)), SceneCommand::None);
    let c = s.panel().content().unwrap();
    assert_eq!(c.title, "Me");
    assert_eq!(c.body, "line one\nline two");
}

#[test]
fn click_outside_radius_does_nothing() {
    let mut s = scene();
    s.handle_click(Point::new(320.0 + 100.0, 240.0));
    assert!(!s.panel().is_open());
}

#[test]
fn back_is_swallowed_while_panel_is_open() {
    let mut s = scene();
    s.handle_click(Point::new(320.0, 240.0));
    assert_eq!(s.handle_click(Point::new(40.0, 40.0)), SceneCommand::None);
    assert_eq!(s.handle_click(Point::new(40.0, 40.0)), SceneCommand::BackToGalaxy);
}

#[test]
fn resize_moves_the_click_target() {
    let mut s = scene();
    s.resize(Viewport::new(1000.0, 1000.0).unwrap());
    s.handle_click(Point::new(320.0, 240.0));
    assert!(!s.panel().is_open());
    s.handle_click(Point::new(500.0, 500.0));
    assert!(s.panel().is_open());
}
