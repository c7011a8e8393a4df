use super::*;

fn record(orbit_radius: f64, size: f64) -> PlanetRecord {
    PlanetRecord {
        name: "p".to_owned(),
        color: "hsl(30, 80%, 60%)".to_owned(),
        orbit_radius,
        size,
        title: None,
        subtext: None,
        info: None,
        body: None,
        image: None,
    }
}

#[test]
fn close_orbits_stay_ordered_after_redistribution() {
    for seed in 0..200 {
        let mut rng = Rng64::new(seed);
        let mut planets = vec![
            Planet::new(record(180.0, 5.0), 5.0, &mut rng),
            Planet::new(record(120.0, 5.0), 5.0, &mut rng),
            Planet::new(record(125.0, 5.0), 5.0, &mut rng),
        ];
        let mut before: Vec<f64> = planets.iter().map(|p| p.angular_speed()).collect();
        order_speeds_by_radius(&mut planets);
        assert!(planets[1].angular_speed() > planets[2].angular_speed(), "seed {seed}");
        assert!(planets[2].angular_speed() > planets[0].angular_speed(), "seed {seed}");

        let mut after: Vec<f64> = planets.iter().map(|p| p.angular_speed()).collect();
        before.sort_by(f64::total_cmp);
        after.sort_by(f64::total_cmp);
        assert_eq!(before, after);
    }
}

#[test]
fn innermost_orbit_takes_the_fastest_speed() {
    let mut planets = vec![
        Planet::with_motion(record(100.0, 5.0), 5.0, 0.0, 0.3),
        Planet::with_motion(record(100.0, 5.0), 5.0, 0.0, 0.7),
        Planet::with_motion(record(40.0, 5.0), 5.0, 0.0, 0.1),
    ];
    order_speeds_by_radius(&mut planets);
    assert_eq!(planets[2].angular_speed(), 0.7);
    assert!(planets[0].angular_speed() < 0.7 && planets[1].angular_speed() < 0.7);
}

#[test]
fn update_clamps_delta() {
    let mut p = Planet::with_motion(record(100.0, 5.0), 5.0, 0.0, 1.0);
    p.update(1_000.0, 100.0);
    assert!((p.angle() - 0.1).abs() < 1e-12);
    p.update(-50.0, 100.0);
    assert!((p.angle() - 0.1).abs() < 1e-12);
    let pos = p.position();
    assert!((pos.x - 100.0 * 0.1f64.cos()).abs() < 1e-9);
    assert!((pos.y - 100.0 * 0.1f64.sin()).abs() < 1e-9);
}

#[test]
fn click_radius_is_size_plus_margin() {
    let p = Planet::with_motion(record(100.0, 6.0), 5.0, 0.0, 0.0);
    assert!(p.hit_test(Point::new(110.5, 0.0)).unwrap());
    assert!(!p.hit_test(Point::new(111.0, 0.0)).unwrap());
}

#[test]
fn tiny_orbits_do_not_divide_by_zero() {
    assert!(angular_speed_for(0.0, 0.5).is_finite());
    assert_eq!(angular_speed_for(0.0, 0.0), angular_speed_for(1.0, 0.0));
}
