use super::*;

#[test]
fn stopped_clock_accepts_nothing() {
    let mut c = FrameClock::new(16.0);
    assert!(!c.accept(0.0));
    c.start();
    assert!(c.accept(0.0));
}

#[test]
fn frames_closer_than_the_interval_are_skipped() {
    let mut c = FrameClock::new(1000.0 / 60.0);
    c.start();
    assert!(c.accept(100.0));
    assert!(!c.accept(110.0));
    assert!(c.accept(117.0));
    assert!(!c.accept(120.0));
}

#[test]
fn pause_and_resume_use_a_fresh_timestamp() {
    let mut c = FrameClock::new(16.0);
    c.start();
    assert!(c.accept(0.0));
    c.pause();
    assert!(!c.is_running());
    assert!(!c.accept(5000.0));

    c.resume(10_000.0);
    assert!(c.is_running());
    assert!(!c.accept(10_005.0));
    assert!(c.accept(10_016.0));
}

#[test]
fn resume_while_running_keeps_the_cadence() {
    let mut c = FrameClock::new(16.0);
    c.start();
    assert!(c.accept(0.0));
    c.resume(15.0);
    assert!(c.accept(16.0));
}

#[test]
fn throttle_lets_one_event_per_interval() {
    let mut t = Throttle::new(33.0);
    assert!(t.ready(0.0));
    assert!(!t.ready(10.0));
    assert!(!t.ready(33.0));
    assert!(t.ready(34.0));
}

#[test]
fn debounce_delivers_only_the_last_value_after_quiet() {
    let mut d = Debounce::new(250.0);
    d.push(1, 0.0);
    d.push(2, 100.0);
    assert_eq!(d.poll(300.0), None);
    assert!(d.is_pending());
    assert_eq!(d.poll(350.0), Some(2));
    assert!(!d.is_pending());
    assert_eq!(d.poll(1000.0), None);
}

#[test]
fn evenly_spaced_callbacks_are_never_dropped() {
    let interval = 1000.0 / 60.0;
    let mut c = FrameClock::new(interval);
    c.start();
    for i in 0..600u32 {
        assert!(c.accept(f64::from(i) * interval), "frame {i} dropped");
    }
}
