//! Classic four-stage Runge-Kutta on the coupled (position, velocity) state.
//!
//! Step size is fixed by the caller. There is no error control, so accuracy degrades
//! silently as `dt` grows; the simulation targets visual plausibility at frame rates.

use orbyte_core::Vector3;

/// Time derivative of the (position, velocity) state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateDerivative {
    pub velocity: Vector3,
    pub acceleration: Vector3,
}

/// Result of a single RK4 step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rk4Step {
    pub position: Vector3,
    pub velocity: Vector3,
    /// Acceleration sampled at the start of the step (k1); for display only.
    pub acceleration: Vector3,
}

/// Advance `(position, velocity)` by `dt` using four derivative evaluations.
pub fn rk4_step<F>(
    t: f64,
    position: Vector3,
    velocity: Vector3,
    dt: f64,
    mut derivative: F,
) -> Rk4Step
where
    F: FnMut(f64, Vector3, Vector3) -> StateDerivative,
{
    let half_dt = 0.5 * dt;

    let k1 = derivative(t, position, velocity);
    let k2 = derivative(
        t + half_dt,
        position + k1.velocity * half_dt,
        velocity + k1.acceleration * half_dt,
    );
    let k3 = derivative(
        t + half_dt,
        position + k2.velocity * half_dt,
        velocity + k2.acceleration * half_dt,
    );
    let k4 = derivative(
        t + dt,
        position + k3.velocity * dt,
        velocity + k3.acceleration * dt,
    );

    let sixth = dt / 6.0;
    Rk4Step {
        position: position
            + (k1.velocity + k2.velocity * 2.0 + k3.velocity * 2.0 + k4.velocity) * sixth,
        velocity: velocity
            + (k1.acceleration + k2.acceleration * 2.0 + k3.acceleration * 2.0 + k4.acceleration)
                * sixth,
        acceleration: k1.acceleration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_acceleration_is_exact() {
        // RK4 integrates polynomials up to degree four exactly.
        let g = Vector3::new(0.0, -9.81, 0.0);
        let step = rk4_step(0.0, Vector3::ZERO, Vector3::new(3.0, 4.0, 0.0), 2.0, |_, _, v| {
            StateDerivative {
                velocity: v,
                acceleration: g,
            }
        });
        assert!((step.position.x - 6.0).abs() < 1e-12);
        assert!((step.position.y - (8.0 - 0.5 * 9.81 * 4.0)).abs() < 1e-12);
        assert!((step.velocity.y - (4.0 - 9.81 * 2.0)).abs() < 1e-12);
        assert_eq!(step.acceleration, g);
    }

    #[test]
    fn derivative_sees_stage_times() {
        let mut times = Vec::new();
        rk4_step(10.0, Vector3::ZERO, Vector3::ZERO, 4.0, |t, _, v| {
            times.push(t);
            StateDerivative {
                velocity: v,
                acceleration: Vector3::ZERO,
            }
        });
        assert_eq!(times, vec![10.0, 12.0, 12.0, 14.0]);
    }

    #[test]
    fn harmonic_oscillator_tracks_cosine() {
        // x'' = -x, x(0) = 1 -> x(t) = cos t
        let mut position = Vector3::X;
        let mut velocity = Vector3::ZERO;
        let dt = 0.01;
        let mut t = 0.0;
        for _ in 0..628 {
            let step = rk4_step(t, position, velocity, dt, |_, p, v| StateDerivative {
                velocity: v,
                acceleration: -p,
            });
            position = step.position;
            velocity = step.velocity;
            t += dt;
        }
        assert!((position.x - t.cos()).abs() < 1e-9);
        assert!((velocity.x + t.sin()).abs() < 1e-9);
    }
}
