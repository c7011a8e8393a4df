use super::*;
use crate::data::model::{GalaxyPosition, SunRecord};

fn project(x: f64, y: f64) -> ProjectRecord {
    ProjectRecord {
        id: "p".to_owned(),
        name: "P".to_owned(),
        color: "#ffcc00".to_owned(),
        galaxy_position: GalaxyPosition { x, y },
        planets: Vec::new(),
        sun: SunRecord::default(),
        date: None,
        image: None,
    }
}

fn system_at(p: Point) -> StarSystem {
    let vp = Viewport::new(800.0, 600.0).unwrap();
    StarSystem::new(project(0.5, 0.5), vp, HoverRadius::new(8.0, 12.0, 0.1)).with_position(p)
}

#[test]
fn hit_test_uses_hover_radius() {
    let s = system_at(Point::new(100.0, 0.0));
    assert!(s.hit_test(Point::new(105.0, 0.0)).unwrap());
    assert!(!s.hit_test(Point::new(130.0, 0.0)).unwrap());
}

#[test]
fn layout_scales_by_half_min_dimension() {
    let vp = Viewport::new(800.0, 600.0).unwrap();
    let s = StarSystem::new(project(1.0, 0.0), vp, HoverRadius::new(8.0, 12.0, 0.1));
    // (1.0 - 0.5) * 300 * 1.5 = 225
    assert!((s.position().x - 225.0).abs() < 1e-9);
    assert!((s.position().y + 225.0).abs() < 1e-9);
}

#[test]
fn non_finite_geometry_is_an_error() {
    let s = system_at(Point::new(f64::INFINITY, 0.0));
    assert!(s.hit_test(Point::ZERO).is_err());
}

#[test]
fn bad_color_falls_back_to_white() {
    let mut rec = project(0.5, 0.5);
    rec.color = "not a color".to_owned();
    let vp = Viewport::new(100.0, 100.0).unwrap();
    let s = StarSystem::new(rec, vp, HoverRadius::new(8.0, 12.0, 0.1));
    let mut p = Painter::new(vp, Rgba8::BLACK);
    s.draw(&mut p, 1.0);
    let last = p.finish().ops.pop().unwrap();
    assert!(matches!(
        last,
        crate::render::draw::DrawOp::FillCircle { color, .. } if color == Rgba8::WHITE
    ));
}
