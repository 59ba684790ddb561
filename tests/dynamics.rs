use orbyte::math::constants::G;
use orbyte::{BodySpec, CentralBody, GravityMode, Simulation, Vector3};

const SUN_MASS: f64 = 1.989e30;
const AU: f64 = 1.496e11;

fn sun_system(mode: GravityMode) -> Simulation {
    let sun = CentralBody::new("Sun", SUN_MASS, 6.957e8).expect("valid central body");
    Simulation::new(sun, mode)
}

#[test]
fn zero_mu_moves_in_a_straight_line() {
    let mut sim = sun_system(GravityMode::Central);
    let start = Vector3::new(AU, -2.0e9, 5.0e8);
    let velocity = Vector3::new(-1_200.0, 30_000.0, 15.0);
    let probe = sim
        .add_body(BodySpec::new("Probe", start, velocity, 1_000.0, 10.0))
        .unwrap();
    sim.set_mu(probe, 0.0).unwrap();

    let mut elapsed = 0.0;
    for _ in 0..500 {
        sim.update(16.0, 3_600.0);
        elapsed += 0.016 * 3_600.0;
    }

    let body = sim.body(probe).unwrap();
    let expected = start + velocity * elapsed;
    assert!(body.position().distance(expected) < 1e-9 * expected.magnitude());
    assert_eq!(body.velocity(), velocity);
    assert_eq!(body.acceleration(), Vector3::ZERO);
}

#[test]
fn circular_orbit_holds_radius_over_one_period() {
    let mut sim = sun_system(GravityMode::Central);
    let mu = sim.central().mu();
    assert!((mu - G * SUN_MASS).abs() < 1.0);

    let speed = (mu / AU).sqrt();
    let earth = sim
        .add_body(BodySpec::new(
            "Earth",
            Vector3::new(AU, 0.0, 0.0),
            Vector3::new(0.0, speed, 0.0),
            5.972e24,
            6.371e6,
        ))
        .unwrap();

    let period = sim.calculate_period(earth).unwrap();
    assert!((period / 86_400.0 - 365.2).abs() < 1.0);

    // One simulated hour per update.
    let steps = (period / 3_600.0).round() as usize;
    for _ in 0..steps {
        sim.update(1_000.0, 3_600.0);
        let radius = sim.body(earth).unwrap().position().magnitude();
        assert!((radius - AU).abs() / AU < 0.01, "radius drifted to {radius}");
    }

    let end = sim.absolute_position(earth).unwrap();
    assert!(end.distance(Vector3::new(AU, 0.0, 0.0)) / AU < 0.01);
}

#[test]
fn legacy_circularization_is_circular_on_an_axis() {
    let mut sim = sun_system(GravityMode::Central);
    let mars = sim
        .add_body(
            BodySpec::new(
                "Mars",
                Vector3::new(0.0, -2.279e11, 0.0),
                Vector3::ZERO,
                6.417e23,
                3.39e6,
            )
            .circularized(),
        )
        .unwrap();

    let v = sim.body(mars).unwrap().velocity();
    assert_eq!(v.x, 0.0);
    assert_eq!(v.y, 0.0);
    assert!((v.z + (sim.central().mu() / 2.279e11).sqrt()).abs() < 1e-6);

    for _ in 0..2_000 {
        sim.update(1_000.0, 3_600.0);
    }
    let radius = sim.body(mars).unwrap().position().magnitude();
    assert!((radius - 2.279e11).abs() / 2.279e11 < 0.01);
}

#[test]
fn body_at_the_origin_stays_finite() {
    let mut sim = sun_system(GravityMode::Central);
    let stuck = sim
        .add_body(BodySpec::new("Stuck", Vector3::ZERO, Vector3::ZERO, 1.0, 1.0))
        .unwrap();
    for _ in 0..10 {
        sim.update(16.0, 1.0);
    }
    let body = sim.body(stuck).unwrap();
    assert!(body.position().is_finite());
    assert!(body.velocity().is_finite());
}

fn pair(mode: GravityMode) -> (Simulation, orbyte::BodyId, orbyte::BodyId) {
    let star = CentralBody::new("Dust", 1.0, 1.0).unwrap();
    let mut sim = Simulation::new(star, mode);
    let light = sim
        .add_body(BodySpec::new("Light", Vector3::new(1.0e7, 0.0, 0.0), Vector3::ZERO, 1.0, 1.0))
        .unwrap();
    let heavy = sim
        .add_body(BodySpec::new(
            "Heavy",
            Vector3::new(-1.0e7, 0.0, 0.0),
            Vector3::ZERO,
            1.0e24,
            6.0e6,
        ))
        .unwrap();
    (sim, light, heavy)
}

#[test]
fn mutual_mode_adds_root_attractors() {
    let (mut central, light, _) = pair(GravityMode::Central);
    central.update(1_000.0, 1.0);
    assert!(central.body(light).unwrap().acceleration().x.abs() < 1e-20);

    let (mut mutual, light, _) = pair(GravityMode::Mutual);
    mutual.update(1_000.0, 1.0);
    let a = mutual.body(light).unwrap().acceleration();
    let expected = G * 1.0e24 / (2.0e7 * 2.0e7);
    assert!((a.x + expected).abs() / expected < 1e-9);
}

#[test]
fn marked_bodies_stop_attracting() {
    let (mut sim, light, heavy) = pair(GravityMode::Mutual);
    sim.delete(heavy).unwrap();
    sim.update(1_000.0, 1.0);
    assert!(sim.body(light).unwrap().acceleration().x.abs() < 1e-20);
    // The marked body itself is frozen until the sweep.
    assert_eq!(
        sim.body(heavy).unwrap().position(),
        Vector3::new(-1.0e7, 0.0, 0.0)
    );
}
