//! Gravitational acceleration model and fixed-step RK4 integration.
//!
//! Both halves are free of simulation state: the integrator accepts any derivative
//! function, and the gravity model only needs positions and standard gravitational
//! parameters. `orbyte_system` glues them together per body and per frame.

pub mod gravity;
pub mod integrator;

pub use gravity::{Attractor, GuardedDisplacement, acceleration, two_body_ode};
pub use integrator::{Rk4Step, StateDerivative, rk4_step};
