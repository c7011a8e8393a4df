use super::*;

#[test]
fn ease_toward_takes_a_fraction_of_the_gap() {
    assert!((ease_toward(15.0, 20.0, 0.1) - 15.5).abs() < 1e-12);
    assert_eq!(ease_toward(20.0, 20.0, 0.1), 20.0);
}

#[test]
fn squared_distance_and_radius_checks() {
    let a = Point::new(100.0, 0.0);
    assert_eq!(dist_sq(a, Point::new(105.0, 0.0)), 25.0);
    assert!(within_radius(Point::new(105.0, 0.0), a, 12.0));
    assert!(!within_radius(Point::new(112.0, 0.0), a, 12.0));
    assert!(!within_radius(Point::new(130.0, 0.0), a, 12.0));
}

#[test]
fn unrotate_inverts_rotate() {
    let center = Point::new(400.0, 300.0);
    let logical = Vec2::new(100.0, 0.0);
    let rotation = 0.75;
    let screen = center + rotate_vec(logical, rotation);
    let back = unrotate_about(screen, center, rotation);
    assert!((back.x - 100.0).abs() < 1e-9);
    assert!(back.y.abs() < 1e-9);
}

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255(255, 255), 255);
    assert_eq!(mul_div255(128, 255), 128);
    assert_eq!(mul_div255(0, 200), 0);
}
