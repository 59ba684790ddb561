//! Body hierarchy, trail buffers, and the frame-driven simulation driver.
//!
//! The [`Simulation`] owns every body in an arena. Satellites refer to their parent by
//! [`BodyId`], deletion is mark-then-sweep, and each frame updates satellites before
//! their parent.

pub mod body;
pub mod central;
pub mod clock;
pub mod error;
pub mod record;
pub mod simulation;
pub mod trail;
pub mod view;

pub use body::{Body, BodyId, BodyKind, BodySpec, VelocityMode, legacy_circular_velocity};
pub use central::CentralBody;
pub use clock::SimulationClock;
pub use error::SimulationError;
pub use record::{BodyRecord, CentralRecord};
pub use simulation::{FrameReport, GravityMode, Simulation};
pub use trail::Trail;
pub use view::{WorldToScreen, depth_sorted, project_trail};
