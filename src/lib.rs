//! Orbyte: a frame-driven orbital dynamics engine.
//!
//! The workspace crates are re-exported here so front-ends (the CLI, a renderer, tests)
//! depend on a single library.

pub use orbyte_config as config;
pub use orbyte_core as math;
pub use orbyte_dynamics as dynamics;
pub use orbyte_export as export;
pub use orbyte_system as system;

pub use orbyte_core::Vector3;
pub use orbyte_system::{
    Body, BodyId, BodyKind, BodyRecord, BodySpec, CentralBody, FrameReport, GravityMode,
    Simulation, SimulationClock, SimulationError,
};

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
