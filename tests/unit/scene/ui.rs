use super::*;
use crate::render::draw::DrawOp;

#[test]
fn panel_swallows_exactly_one_click() {
    let mut panel = InfoPanel::new();
    assert!(!panel.swallow_click());
    panel.show(PanelContent::new("Sun", "hot"));
    assert!(panel.is_open());
    assert!(panel.swallow_click());
    assert!(!panel.is_open());
    assert!(!panel.swallow_click());
}

#[test]
fn frame_is_centered_and_sized_by_lines() {
    let vp = Viewport::new(400.0, 300.0).unwrap();
    let content = PanelContent {
        title: "T".to_string(),
        subtext: Some("sub".to_string()),
        body: "0123456789\nx".to_string(),
    };
    let r = InfoPanel::frame_for(&content, vp);
    let expected_w = monospace_width("0123456789", 14.0) + 30.0;
    let expected_h = 4.0 * 20.0 + 30.0;
    assert!((r.width() - expected_w).abs() < 1e-9);
    assert!((r.height() - expected_h).abs() < 1e-9);
    assert!((r.center().x - 200.0).abs() < 1e-9);
    assert!((r.center().y - 150.0).abs() < 1e-9);
}

#[test]
fn closed_panel_draws_nothing() {
    let vp = Viewport::new(100.0, 100.0).unwrap();
    let mut p = Painter::new(vp, Rgba8::BLACK);
    InfoPanel::new().draw(&mut p, 1.0);
    assert!(p.ops().is_empty());
}

#[test]
fn open_panel_draws_box_then_text() {
    let vp = Viewport::new(300.0, 300.0).unwrap();
    let mut p = Painter::new(vp, Rgba8::BLACK);
    let mut panel = InfoPanel::new();
    panel.show(PanelContent::new("Title", "a\nb"));
    panel.draw(&mut p, 1.0);
    let ops = p.ops();
    assert!(matches!(ops[0], DrawOp::FillRect { .. }));
    assert!(matches!(ops[1], DrawOp::StrokeRect { .. }));
    let texts = ops
        .iter()
        .filter(|op| matches!(op, DrawOp::Text { .. }))
        .count();
    assert_eq!(texts, 3);
}

#[test]
fn back_button_hit_is_strict() {
    let b = ButtonOpts::default();
    assert!(button_hit(&b, Point::new(40.0, 40.0)));
    assert!(button_hit(&b, Point::new(59.0, 40.0)));
    assert!(!button_hit(&b, Point::new(60.0, 40.0)));
}
