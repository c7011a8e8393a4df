use super::*;
use crate::foundation::core::Viewport;

fn front_layer() -> LayerConfig {
    LayerConfig::galaxy_defaults().pop().unwrap()
}

#[test]
fn generation_is_deterministic_for_a_seed() {
    let a = ParticleLayer::generate(front_layer(), 6, 400.0, &mut Rng64::new(42)).unwrap();
    let b = ParticleLayer::generate(front_layer(), 6, 400.0, &mut Rng64::new(42)).unwrap();
    assert_eq!(a.positions(), b.positions());
    assert_eq!(a.sizes(), b.sizes());
    assert_eq!(a.alphas(), b.alphas());
}

#[test]
fn buffers_have_parallel_lengths_and_ranges() {
    let cfg = front_layer();
    let layer = ParticleLayer::generate(cfg.clone(), 6, 400.0, &mut Rng64::new(1)).unwrap();
    assert_eq!(layer.len(), cfg.count);
    assert_eq!(layer.positions().len(), cfg.count * 2);
    for &s in layer.sizes().iter() {
        assert!(f64::from(s) >= cfg.min_size - 1e-6 && f64::from(s) <= cfg.max_size + 1e-6);
    }
    for &a in layer.alphas().iter() {
        assert!(f64::from(a) >= cfg.min_alpha - 1e-6 && f64::from(a) <= cfg.max_alpha + 1e-6);
    }
    for i in 0..layer.len() {
        assert!(layer.position(i).to_vec2().hypot() <= 400.0 + 1e-3);
    }
}

#[test]
fn density_is_biased_toward_center() {
    let layer = ParticleLayer::generate(front_layer(), 6, 400.0, &mut Rng64::new(9)).unwrap();
    let inner = (0..layer.len())
        .filter(|&i| layer.position(i).to_vec2().hypot() < 200.0)
        .count();
    // P(rand² < 0.5) ≈ 0.707
    let frac = inner as f64 / layer.len() as f64;
    assert!(frac > 0.62 && frac < 0.8, "inner fraction {frac}");
}

#[test]
fn particles_snap_to_arms() {
    let cfg = front_layer();
    let (tightness, spread) = (cfg.arm_tightness, cfg.arm_spread);
    let arms = 6u32;
    let max_dist = 400.0;
    let layer = ParticleLayer::generate(cfg, arms, max_dist, &mut Rng64::new(3)).unwrap();
    let sector = TAU / f64::from(arms);
    for i in 0..layer.len() {
        let p = layer.position(i).to_vec2();
        let dist = p.hypot();
        if dist < 5.0 {
            continue;
        }
        let spiral = (dist / max_dist) * TAU * tightness;
        let residual = (p.y.atan2(p.x) - spiral).rem_euclid(sector);
        let off_arm = residual.min(sector - residual);
        assert!(off_arm <= spread + 1e-3, "particle {i} is {off_arm} rad off its arm");
    }
}

#[test]
fn rejects_bad_parameters() {
    let mut rng = Rng64::new(0);
    assert!(ParticleLayer::generate(front_layer(), 0, 100.0, &mut rng).is_err());
    assert!(ParticleLayer::generate(front_layer(), 6, 0.0, &mut rng).is_err());
    let mut cfg = front_layer();
    cfg.min_size = 5.0;
    assert!(ParticleLayer::generate(cfg, 6, 100.0, &mut rng).is_err());
}

#[test]
fn advance_accumulates_rotation_speed() {
    let cfg = front_layer();
    let speed = cfg.rotation_speed;
    let mut layer = ParticleLayer::generate(cfg, 6, 100.0, &mut Rng64::new(5)).unwrap();
    for _ in 0..10 {
        layer.advance();
    }
    assert!((layer.rotation - speed * 10.0).abs() < 1e-12);
}

#[test]
fn draw_layer_skips_faint_particles() {
    let mut cfg = front_layer();
    cfg.count = 50;
    let layer = ParticleLayer::generate(cfg, 6, 100.0, &mut Rng64::new(5)).unwrap();
    let vp = Viewport::new(200.0, 200.0).unwrap();

    let mut p = Painter::new(vp, Rgba8::BLACK);
    draw_layer(&mut p, &layer, vp.center(), 1.0);
    assert_eq!(p.ops().len(), 50);

    let mut p = Painter::new(vp, Rgba8::BLACK);
    draw_layer(&mut p, &layer, vp.center(), 0.05);
    assert!(p.ops().is_empty());
}
