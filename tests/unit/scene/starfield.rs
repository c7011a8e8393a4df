use super::*;

fn vp() -> Viewport {
    Viewport::new(200.0, 100.0).unwrap()
}

#[test]
fn stars_start_inside_the_viewport() {
    let f = Starfield::new(150, StarfieldStyle::GALAXY, vp(), Rng64::new(1));
    assert_eq!(f.stars().len(), 150);
    for s in f.stars() {
        assert!((0.0..200.0).contains(&s.pos.x));
        assert!((0.0..100.0).contains(&s.pos.y));
        assert!((0.3..2.1).contains(&s.size));
    }
}

#[test]
fn stars_wrap_to_the_top_after_leaving_the_bottom() {
    let mut f = Starfield::new(1, StarfieldStyle::SOLAR, vp(), Rng64::new(2));
    f.stars[0].pos = Point::new(10.0, 99.99);
    f.stars[0].speed = 0.1;
    f.update();
    let s = f.stars()[0];
    assert_eq!(s.pos.y, -s.size);
    assert!((0.0..200.0).contains(&s.pos.x));
}

#[test]
fn static_field_does_not_move() {
    let mut f = Starfield::new(20, StarfieldStyle::STATIC, vp(), Rng64::new(3));
    let before: Vec<Point> = f.stars().iter().map(|s| s.pos).collect();
    f.update();
    let after: Vec<Point> = f.stars().iter().map(|s| s.pos).collect();
    assert_eq!(before, after);
}

#[test]
fn shrinking_rescatters_out_of_bounds_stars() {
    let mut f = Starfield::new(100, StarfieldStyle::GALAXY, vp(), Rng64::new(4));
    let small = Viewport::new(50.0, 40.0).unwrap();
    f.resize(small);
    for s in f.stars() {
        assert!(s.pos.x <= 50.0 && s.pos.y <= 40.0);
    }
}

#[test]
fn faint_stars_are_not_drawn() {
    let mut f = Starfield::new(2, StarfieldStyle::SOLAR, vp(), Rng64::new(5));
    f.stars[0].alpha = 0.04;
    f.stars[1].alpha = 0.5;
    let mut p = Painter::new(vp(), Rgba8::BLACK);
    f.draw(&mut p, 1.0);
    assert_eq!(p.ops().len(), 1);
}
