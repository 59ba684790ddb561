//! Point-mass gravitational acceleration with a per-axis singularity guard.

use orbyte_core::Vector3;

use crate::integrator::StateDerivative;

/// A point mass pulling on the integrated body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attractor {
    pub position: Vector3,
    /// Standard gravitational parameter (m³/s²).
    pub mu: f64,
}

impl Attractor {
    pub fn new(position: Vector3, mu: f64) -> Self {
        Attractor { position, mu }
    }

    /// Static attractor at the frame origin.
    pub fn at_origin(mu: f64) -> Self {
        Attractor::new(Vector3::ZERO, mu)
    }
}

/// Displacement from an attractor after applying the per-axis guard.
///
/// For each axis whose normalized component is exactly zero, the raw component is
/// pinned to zero and the normalized component is replaced with one. A body lying
/// exactly on an axis plane is unaffected; a component that underflows relative to
/// the full distance is dropped, which is the small directional bias this trades for
/// never dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuardedDisplacement {
    pub displacement: Vector3,
    pub unit: Vector3,
}

impl GuardedDisplacement {
    pub fn new(displacement: Vector3) -> Self {
        let mut displacement = displacement;
        let mut unit = displacement.normalize();
        for axis in 0..3 {
            if unit[axis] == 0.0 {
                displacement[axis] = 0.0;
                unit[axis] = 1.0;
            }
        }
        GuardedDisplacement { displacement, unit }
    }

    /// `|r|³`, falling back to the guarded unit vector when the displacement vanished.
    pub fn radius_cubed(&self) -> f64 {
        let radius = self.displacement.magnitude();
        if radius > 0.0 {
            radius.powi(3)
        } else {
            self.unit.magnitude().powi(3)
        }
    }
}

/// Sum of `-μ r / |r|³` over every attractor.
///
/// Pass a single attractor for two-body motion, or every other body for the
/// mutual-gravity mode. The caller is responsible for excluding the body itself.
pub fn acceleration(position: Vector3, attractors: &[Attractor]) -> Vector3 {
    attractors
        .iter()
        .fold(Vector3::ZERO, |total, attractor| {
            let guarded = GuardedDisplacement::new(position - attractor.position);
            total + guarded.displacement * (-attractor.mu / guarded.radius_cubed())
        })
}

/// ODE right-hand side: `d/dt [position, velocity] = [velocity, acceleration]`.
pub fn two_body_ode(
    _t: f64,
    position: Vector3,
    velocity: Vector3,
    attractors: &[Attractor],
) -> StateDerivative {
    StateDerivative {
        velocity,
        acceleration: acceleration(position, attractors),
    }
}
