use orbyte::math::constants::TRAIL_CAPACITY;
use orbyte::{BodySpec, CentralBody, GravityMode, Simulation, Vector3};

#[test]
fn trail_keeps_the_most_recent_points() {
    let sun = CentralBody::new("Sun", 1.989e30, 6.957e8).unwrap();
    let mut sim = Simulation::new(sun, GravityMode::Central);
    let r = 1.496e11;
    let earth = sim
        .add_body(BodySpec::new(
            "Earth",
            Vector3::new(r, 0.0, 0.0),
            Vector3::new(0.0, (sim.central().mu() / r).sqrt(), 0.0),
            5.972e24,
            6.371e6,
        ))
        .unwrap();
    sim.clock_mut().set_time_scale(6.0 * 3_600.0).unwrap();

    let mut appended: Vec<Vector3> = Vec::new();
    for _ in 0..1_500 {
        let before = sim.body(earth).unwrap().trail().last_point();
        sim.tick(1_000.0);
        let trail = sim.body(earth).unwrap().trail();
        assert!(trail.len() <= TRAIL_CAPACITY);
        if trail.last_point() != before {
            appended.push(trail.last_point());
        }
    }

    assert!(appended.len() > TRAIL_CAPACITY);
    let trail = sim.trail_points(earth).unwrap();
    assert_eq!(trail.len(), TRAIL_CAPACITY);
    assert_eq!(trail, appended[appended.len() - TRAIL_CAPACITY..]);

    let threshold = 0.5 * r / TRAIL_CAPACITY as f64;
    for pair in trail.windows(2) {
        assert!(pair[0].distance(pair[1]) > threshold * 0.99);
    }
}

#[test]
fn reset_clears_the_trail() {
    let sun = CentralBody::new("Sun", 1.989e30, 6.957e8).unwrap();
    let mut sim = Simulation::new(sun, GravityMode::Central);
    let probe = sim
        .add_body(BodySpec::new(
            "Probe",
            Vector3::new(1.0e11, 0.0, 0.0),
            Vector3::new(0.0, 36_000.0, 0.0),
            100.0,
            1.0,
        ))
        .unwrap();
    sim.update(1_000.0, 86_400.0);
    sim.update(1_000.0, 86_400.0);
    assert!(!sim.trail_points(probe).unwrap().is_empty());

    sim.reset();
    let body = sim.body(probe).unwrap();
    assert!(body.trail().is_empty());
    assert_eq!(body.trail().last_point(), body.start_position());
}
