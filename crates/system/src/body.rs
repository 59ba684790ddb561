//! Orbiting bodies: state, start snapshot, trail, and the per-body integration step.

use std::f64::consts::{PI, TAU};
use std::fmt;

use orbyte_core::Vector3;
use orbyte_dynamics::{Attractor, rk4_step, two_body_ode};
use serde::{Deserialize, Serialize};

use crate::error::{SimulationError, ensure_name, ensure_positive};
use crate::record::BodyRecord;
use crate::trail::{Trail, sampling_threshold};

/// Cosmetic spin applied to a body's geometry every update (radians per axis).
pub const ROTATION_STEP: Vector3 = Vector3::new(0.001, 0.002, 0.003);

/// Stable handle into a [`Simulation`](crate::Simulation). Never reused.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which reference frame a body's stored state lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Root body; state is in the world frame.
    Planet,
    /// State is relative to `parent`.
    Satellite { parent: BodyId },
}

/// How the initial velocity of a new body is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VelocityMode {
    /// Use the velocity supplied in the [`BodySpec`].
    #[default]
    Explicit,
    /// Legacy circular-orbit projection, see [`legacy_circular_velocity`].
    LegacyCircular,
}

/// Construction parameters for a body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec {
    pub name: String,
    /// Frame-local position (m).
    pub position: Vector3,
    /// Frame-local velocity (m/s). Ignored for [`VelocityMode::LegacyCircular`].
    pub velocity: Vector3,
    pub mass: f64,
    pub scale: f64,
    pub velocity_mode: VelocityMode,
}

impl BodySpec {
    pub fn new(
        name: impl Into<String>,
        position: Vector3,
        velocity: Vector3,
        mass: f64,
        scale: f64,
    ) -> Self {
        BodySpec {
            name: name.into(),
            position,
            velocity,
            mass,
            scale,
            velocity_mode: VelocityMode::Explicit,
        }
    }

    /// Request the legacy circular velocity projection instead of `velocity`.
    pub fn circularized(mut self) -> Self {
        self.velocity_mode = VelocityMode::LegacyCircular;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), SimulationError> {
        ensure_name(&self.name)?;
        ensure_positive("mass", self.mass)?;
        ensure_positive("scale", self.scale)?;
        ensure_finite("position", self.position)?;
        ensure_finite("velocity", self.velocity)?;
        Ok(())
    }
}

impl From<BodyRecord> for BodySpec {
    fn from(record: BodyRecord) -> Self {
        BodySpec::new(
            record.name,
            record.position,
            record.velocity,
            record.mass,
            record.scale,
        )
    }
}

fn ensure_finite(field: &'static str, v: Vector3) -> Result<(), SimulationError> {
    for axis in 0..3 {
        if !v[axis].is_finite() {
            return Err(SimulationError::InvalidParameter {
                field,
                value: v[axis],
            });
        }
    }
    Ok(())
}

/// Legacy circularization heuristic kept for compatibility with older scenes.
///
/// For every axis with a nonzero position component `r[i]`, the next axis (x→y, y→z,
/// z→x) receives `sign(r[i]) * sqrt(mu / |r[i]|)`. This is exact for a body placed on
/// a single axis and only approximate otherwise; the result depends on axis order.
pub fn legacy_circular_velocity(position: Vector3, mu: f64) -> Vector3 {
    let mut velocity = Vector3::ZERO;
    for axis in 0..3 {
        let r = position[axis];
        if r != 0.0 {
            velocity[(axis + 1) % 3] = r.signum() * (mu / r.abs()).sqrt();
        }
    }
    velocity
}

/// A body in the simulation arena.
#[derive(Debug, Clone)]
pub struct Body {
    id: BodyId,
    name: String,
    kind: BodyKind,
    position: Vector3,
    velocity: Vector3,
    acceleration: Vector3,
    mass: f64,
    scale: f64,
    mu: f64,
    start_position: Vector3,
    start_velocity: Vector3,
    time_since_start: f64,
    orientation: Vector3,
    trail: Trail,
    to_delete: bool,
    pub(crate) satellites: Vec<BodyId>,
}

impl Body {
    /// `velocity` is the already-resolved initial velocity; `frame_origin` is the
    /// world position of the body's frame, used to seed the trail gate.
    pub(crate) fn new(
        id: BodyId,
        kind: BodyKind,
        spec: BodySpec,
        velocity: Vector3,
        mu: f64,
        frame_origin: Vector3,
    ) -> Self {
        Body {
            id,
            name: spec.name,
            kind,
            position: spec.position,
            velocity,
            acceleration: Vector3::ZERO,
            mass: spec.mass,
            scale: spec.scale,
            mu,
            start_position: spec.position,
            start_velocity: velocity,
            time_since_start: 0.0,
            orientation: Vector3::ZERO,
            trail: Trail::new(spec.position + frame_origin),
            to_delete: false,
            satellites: Vec::new(),
        }
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn parent(&self) -> Option<BodyId> {
        match self.kind {
            BodyKind::Planet => None,
            BodyKind::Satellite { parent } => Some(parent),
        }
    }

    pub fn is_satellite(&self) -> bool {
        matches!(self.kind, BodyKind::Satellite { .. })
    }

    /// Position in the body's own frame. Use
    /// [`Simulation::absolute_position`](crate::Simulation::absolute_position) for world space.
    pub fn position(&self) -> Vector3 {
        self.position
    }

    pub fn velocity(&self) -> Vector3 {
        self.velocity
    }

    /// Acceleration sampled at the start of the last step.
    pub fn acceleration(&self) -> Vector3 {
        self.acceleration
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn start_position(&self) -> Vector3 {
        self.start_position
    }

    pub fn start_velocity(&self) -> Vector3 {
        self.start_velocity
    }

    pub fn time_since_start(&self) -> f64 {
        self.time_since_start
    }

    pub fn orientation(&self) -> Vector3 {
        self.orientation
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn satellites(&self) -> &[BodyId] {
        &self.satellites
    }

    pub fn is_marked_for_deletion(&self) -> bool {
        self.to_delete
    }

    /// Idealized two-body period `2π sqrt(r³ / μ)` from the current frame-local radius.
    ///
    /// Not exact in mutual-gravity mode. `None` when μ is not positive.
    pub fn calculate_period(&self) -> Option<f64> {
        if self.mu <= 0.0 {
            return None;
        }
        let r = self.position.magnitude();
        let period = 2.0 * PI * (r.powi(3) / self.mu).sqrt();
        period.is_finite().then_some(period)
    }

    pub fn record(&self) -> BodyRecord {
        BodyRecord {
            name: self.name.clone(),
            position: self.position,
            mass: self.mass,
            scale: self.scale,
            velocity: self.velocity,
        }
    }

    /// One integration step of `dt` simulated seconds.
    pub(crate) fn advance(&mut self, dt: f64, attractors: &[Attractor], frame_origin: Vector3) {
        self.rotate(ROTATION_STEP);

        let step = rk4_step(
            self.time_since_start,
            self.position,
            self.velocity,
            dt,
            |t, p, v| two_body_ode(t, p, v, attractors),
        );
        self.position = step.position;
        self.velocity = step.velocity;
        self.acceleration = step.acceleration;

        let threshold = sampling_threshold(self.position.magnitude());
        self.trail.try_append(self.position + frame_origin, threshold);

        self.time_since_start += dt;
    }

    fn rotate(&mut self, step: Vector3) {
        let next = self.orientation + step;
        self.orientation = Vector3::new(
            next.x.rem_euclid(TAU),
            next.y.rem_euclid(TAU),
            next.z.rem_euclid(TAU),
        );
    }

    /// Restore the start snapshot. The trail is cleared as well.
    pub(crate) fn reset(&mut self, frame_origin: Vector3) {
        self.position = self.start_position;
        self.velocity = self.start_velocity;
        self.acceleration = Vector3::ZERO;
        self.time_since_start = 0.0;
        self.trail.clear(self.position + frame_origin);
    }

    /// Make the current state the new start snapshot.
    pub(crate) fn recenter(&mut self) {
        self.start_position = self.position;
        self.start_velocity = self.velocity;
        self.time_since_start = 0.0;
    }

    pub(crate) fn mark_for_deletion(&mut self) {
        self.to_delete = true;
    }

    pub(crate) fn set_mu(&mut self, mu: f64) {
        self.mu = mu;
    }

    pub(crate) fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
    }

    pub(crate) fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }
}
