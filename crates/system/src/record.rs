//! Plain data records exchanged with persistence layers.
//!
//! Records carry only what is needed to rebuild the physical state: no trail, no
//! orientation, no presentation fields. Byte layout belongs to whoever serializes them.

use orbyte_core::Vector3;
use serde::{Deserialize, Serialize};

/// Per-body record. `position` and `velocity` are in the body's own frame
/// (parent-relative for satellites).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyRecord {
    pub name: String,
    pub position: Vector3,
    pub mass: f64,
    pub scale: f64,
    pub velocity: Vector3,
}

/// Record for the static central attractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralRecord {
    pub name: String,
    pub mass: f64,
    pub scale: f64,
}
