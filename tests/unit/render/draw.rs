use super::*;

fn painter() -> Painter {
    Painter::new(Viewport::new(200.0, 100.0).unwrap(), Rgba8::BLACK)
}

#[test]
fn translate_and_rotate_map_to_screen() {
    let mut p = painter();
    p.save();
    p.translate(Vec2::new(100.0, 50.0));
    p.rotate(std::f64::consts::FRAC_PI_2);
    p.fill_circle(Point::new(10.0, 0.0), 2.0, Rgba8::WHITE);
    p.restore();
    p.fill_circle(Point::new(10.0, 0.0), 2.0, Rgba8::WHITE);

    let ops = p.finish().ops;
    let DrawOp::FillCircle { center, .. } = &ops[0] else {
        panic!("expected a circle");
    };
    assert!((center.x - 100.0).abs() < 1e-9);
    assert!((center.y - 60.0).abs() < 1e-9);
    let DrawOp::FillCircle { center, .. } = &ops[1] else {
        panic!("expected a circle");
    };
    assert_eq!(*center, Point::new(10.0, 0.0));
}

#[test]
fn global_alpha_tints_and_culls() {
    let mut p = painter();
    p.set_alpha(0.5);
    p.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Rgba8::rgba(255, 0, 0, 200));
    p.set_alpha(0.0);
    p.fill_circle(Point::ZERO, 5.0, Rgba8::WHITE);
    p.text("hidden", Point::ZERO, 12.0, Rgba8::WHITE, TextAlign::Left, TextBaseline::Top);

    let ops = p.finish().ops;
    assert_eq!(ops.len(), 1);
    assert_eq!(
        ops[0],
        DrawOp::FillRect {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            color: Rgba8::rgba(255, 0, 0, 100),
        }
    );
}

#[test]
fn unbalanced_restore_resets_state() {
    let mut p = painter();
    p.translate(Vec2::new(5.0, 5.0));
    p.set_alpha(0.2);
    p.restore();
    assert_eq!(p.alpha(), 1.0);
    assert_eq!(p.to_screen(Point::ZERO), Point::ZERO);
}

#[test]
fn monospace_width_scales_with_chars() {
    assert!((monospace_width("abcd", 10.0) - 24.0).abs() < 1e-9);
    assert_eq!(monospace_width("", 14.0), 0.0);
}
