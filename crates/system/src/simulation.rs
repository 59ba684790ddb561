//! Arena of bodies plus the per-frame update driver.

use std::collections::{HashMap, HashSet};

use orbyte_config::{GravityModeConfig, ScenarioConfig};
use orbyte_core::Vector3;
use orbyte_core::units::{ms_to_seconds, mu_from_mass};
use orbyte_dynamics::Attractor;

use crate::body::{Body, BodyId, BodyKind, BodySpec, VelocityMode, legacy_circular_velocity};
use crate::central::CentralBody;
use crate::clock::SimulationClock;
use crate::error::{SimulationError, ensure_name, ensure_non_negative, ensure_positive};

/// How root bodies are attracted. Satellites always orbit their parent alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GravityMode {
    /// Each root body feels only the central body.
    #[default]
    Central,
    /// Root bodies also attract each other (`μ = G·mass` per pair).
    Mutual,
}

impl From<GravityModeConfig> for GravityMode {
    fn from(value: GravityModeConfig) -> Self {
        match value {
            GravityModeConfig::Central => GravityMode::Central,
            GravityModeConfig::Mutual => GravityMode::Mutual,
        }
    }
}

impl From<GravityMode> for GravityModeConfig {
    fn from(value: GravityMode) -> Self {
        match value {
            GravityMode::Central => GravityModeConfig::Central,
            GravityMode::Mutual => GravityModeConfig::Mutual,
        }
    }
}

/// What happened during one [`Simulation::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Bodies physically removed by the sweep at the start of the frame.
    pub removed: usize,
    /// Bodies integrated this frame (zero while paused).
    pub updated: usize,
    /// Simulated seconds covered by the frame.
    pub dt_seconds: f64,
}

fn frame_is_live(delta_ms: f64, time_scale: f64) -> bool {
    delta_ms.is_finite() && delta_ms >= 0.0 && time_scale.is_finite() && time_scale > 0.0
}

/// Owns the central body, the clock, and every orbiting body.
///
/// Invariant: a parent always sits at a lower arena index than its satellites, so a
/// single forward pass visits parents first. Compaction preserves that order.
#[derive(Debug, Clone)]
pub struct Simulation {
    central: CentralBody,
    clock: SimulationClock,
    mode: GravityMode,
    bodies: Vec<Body>,
    index: HashMap<BodyId, usize>,
    next_id: u64,
}

impl Simulation {
    pub fn new(central: CentralBody, mode: GravityMode) -> Self {
        Simulation {
            central,
            clock: SimulationClock::default(),
            mode,
            bodies: Vec::new(),
            index: HashMap::new(),
            next_id: 0,
        }
    }

    /// Build a simulation from a validated scenario manifest.
    pub fn from_scenario(config: &ScenarioConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let central = CentralBody::new(
            config.central.name.clone(),
            config.central.mass_kg,
            config.central.scale_m,
        )?;
        let mut sim = Simulation::new(central, config.mode.into());
        sim.clock.set_time_scale(config.time_scale)?;

        let mut by_name: HashMap<&str, BodyId> = HashMap::new();
        for body in &config.bodies {
            let mut spec = BodySpec::new(
                body.name.clone(),
                Vector3::from_array(body.position_m),
                Vector3::from_array(body.velocity_m_s),
                body.mass_kg,
                body.scale_m,
            );
            if body.circularize {
                spec = spec.circularized();
            }

            let id = match body.parent.as_deref() {
                None => sim.add_body(spec)?,
                Some(parent) => {
                    let parent_id = *by_name
                        .get(parent)
                        .ok_or_else(|| SimulationError::UnknownParent(parent.to_string()))?;
                    sim.add_satellite(parent_id, spec)?
                }
            };
            by_name.insert(body.name.as_str(), id);
        }

        log::debug!(
            "built simulation with {} bodies around {}",
            sim.len(),
            sim.central.name()
        );
        Ok(sim)
    }

    pub fn central(&self) -> &CentralBody {
        &self.central
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut SimulationClock {
        &mut self.clock
    }

    pub fn mode(&self) -> GravityMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Every body in arena order, including ones marked for deletion.
    pub fn bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.iter()
    }

    /// Bodies a renderer should draw: those not marked for deletion.
    pub fn visible_bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.iter().filter(|b| !b.is_marked_for_deletion())
    }

    pub fn roots(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.iter().filter(|b| !b.is_satellite())
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.index.get(&id).map(|&idx| &self.bodies[idx])
    }

    /// Find a body by name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Body> {
        let upper = name.to_uppercase();
        self.bodies.iter().find(|b| b.name().to_uppercase() == upper)
    }

    fn index_of(&self, id: BodyId) -> Result<usize, SimulationError> {
        self.index
            .get(&id)
            .copied()
            .ok_or(SimulationError::UnknownBody(id))
    }

    fn allocate_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    fn push(&mut self, body: Body) -> BodyId {
        let id = body.id();
        self.index.insert(id, self.bodies.len());
        self.bodies.push(body);
        id
    }

    /// Add a root body orbiting the central body.
    pub fn add_body(&mut self, spec: BodySpec) -> Result<BodyId, SimulationError> {
        spec.validate()?;
        let mu = self.central.mu();
        let velocity = match spec.velocity_mode {
            VelocityMode::Explicit => spec.velocity,
            VelocityMode::LegacyCircular => legacy_circular_velocity(spec.position, mu),
        };

        let id = self.allocate_id();
        self.push(Body::new(id, BodyKind::Planet, spec, velocity, mu, Vector3::ZERO));
        Ok(id)
    }

    /// Add a satellite whose position and velocity are relative to `parent`.
    pub fn add_satellite(
        &mut self,
        parent: BodyId,
        spec: BodySpec,
    ) -> Result<BodyId, SimulationError> {
        spec.validate()?;
        let parent_idx = self.index_of(parent)?;
        let mu = mu_from_mass(self.bodies[parent_idx].mass());
        let velocity = match spec.velocity_mode {
            VelocityMode::Explicit => spec.velocity,
            // The legacy projection adds the parent's absolute velocity on top of the
            // relative circular speed, even though the stored frame is already relative.
            VelocityMode::LegacyCircular => {
                legacy_circular_velocity(spec.position, mu) + self.absolute_velocity_at(parent_idx)
            }
        };
        let origin = self.absolute_position_at(parent_idx);

        let id = self.allocate_id();
        self.push(Body::new(
            id,
            BodyKind::Satellite { parent },
            spec,
            velocity,
            mu,
            origin,
        ));
        self.bodies[parent_idx].satellites.push(id);
        Ok(id)
    }

    fn compose<F>(&self, idx: usize, field: F) -> Vector3
    where
        F: Fn(&Body) -> Vector3,
    {
        let mut body = &self.bodies[idx];
        let mut total = field(body);
        while let Some(parent) = body.parent() {
            body = &self.bodies[self.index[&parent]];
            total += field(body);
        }
        total
    }

    fn absolute_position_at(&self, idx: usize) -> Vector3 {
        self.compose(idx, Body::position)
    }

    fn absolute_velocity_at(&self, idx: usize) -> Vector3 {
        self.compose(idx, Body::velocity)
    }

    /// World position of the frame a body's state is stored in.
    fn frame_origin(&self, idx: usize) -> Vector3 {
        match self.bodies[idx].parent() {
            None => Vector3::ZERO,
            Some(parent) => self.absolute_position_at(self.index[&parent]),
        }
    }

    /// World-frame position: stored position plus every ancestor's stored position.
    pub fn absolute_position(&self, id: BodyId) -> Option<Vector3> {
        self.index.get(&id).map(|&idx| self.absolute_position_at(idx))
    }

    /// World-frame (tangential) velocity.
    pub fn absolute_velocity(&self, id: BodyId) -> Option<Vector3> {
        self.index.get(&id).map(|&idx| self.absolute_velocity_at(idx))
    }

    /// World-frame acceleration sample from the last step of the body and its ancestors.
    pub fn absolute_acceleration(&self, id: BodyId) -> Option<Vector3> {
        self.index
            .get(&id)
            .map(|&idx| self.compose(idx, Body::acceleration))
    }

    /// Trail points oldest to newest, in world space.
    pub fn trail_points(&self, id: BodyId) -> Option<Vec<Vector3>> {
        self.body(id).map(|b| b.trail().to_vec())
    }

    fn attractors_for(&self, idx: usize) -> Vec<Attractor> {
        let body = &self.bodies[idx];
        let own = Attractor::at_origin(body.mu());
        if body.is_satellite() || self.mode == GravityMode::Central {
            return vec![own];
        }

        let mut attractors = vec![own];
        attractors.extend(
            self.bodies
                .iter()
                .enumerate()
                .filter(|(other, b)| {
                    *other != idx && !b.is_satellite() && !b.is_marked_for_deletion()
                })
                .map(|(_, b)| Attractor::new(b.position(), mu_from_mass(b.mass()))),
        );
        attractors
    }

    /// Advance one body's subtree: satellites first, then the body itself.
    ///
    /// Satellites therefore compose against their parent's previous-frame state.
    /// Returns the number of bodies integrated.
    fn update_subtree(&mut self, idx: usize, delta_ms: f64, time_scale: f64) -> usize {
        if !frame_is_live(delta_ms, time_scale) || self.bodies[idx].is_marked_for_deletion() {
            return 0;
        }

        let mut updated = 0;
        for n in 0..self.bodies[idx].satellites.len() {
            let satellite = self.bodies[idx].satellites[n];
            if let Some(&child) = self.index.get(&satellite) {
                updated += self.update_subtree(child, delta_ms, time_scale);
            }
        }

        let dt = ms_to_seconds(delta_ms) * time_scale;
        let attractors = self.attractors_for(idx);
        let origin = self.frame_origin(idx);
        self.bodies[idx].advance(dt, &attractors, origin);
        updated + 1
    }

    /// Update a single body and its satellites.
    pub fn update_body(
        &mut self,
        id: BodyId,
        delta_ms: f64,
        time_scale: f64,
    ) -> Result<usize, SimulationError> {
        let idx = self.index_of(id)?;
        Ok(self.update_subtree(idx, delta_ms, time_scale))
    }

    /// Update every root (and through them every satellite) without sweeping.
    ///
    /// A zero, negative or non-finite time scale and a negative or non-finite delta
    /// are no-op frames.
    pub fn update(&mut self, delta_ms: f64, time_scale: f64) -> usize {
        if !frame_is_live(delta_ms, time_scale) {
            return 0;
        }
        let mut updated = 0;
        for idx in 0..self.bodies.len() {
            if !self.bodies[idx].is_satellite() {
                updated += self.update_subtree(idx, delta_ms, time_scale);
            }
        }
        updated
    }

    /// One frame: sweep bodies marked for deletion, then update at the clock's scale.
    pub fn tick(&mut self, delta_ms: f64) -> FrameReport {
        let removed = self.sweep();
        if !(delta_ms.is_finite() && delta_ms >= 0.0) {
            log::warn!("skipping frame with invalid delta of {delta_ms} ms");
            return FrameReport {
                removed,
                updated: 0,
                dt_seconds: 0.0,
            };
        }
        let time_scale = self.clock.time_scale();
        let dt_seconds = self.clock.advance(delta_ms);
        let updated = self.update(delta_ms, time_scale);
        log::trace!(
            "frame {}: dt={dt_seconds}s updated={updated} removed={removed}",
            self.clock.frames()
        );
        FrameReport {
            removed,
            updated,
            dt_seconds,
        }
    }

    /// Mark a body for deletion. It stays in the arena until the next [`sweep`](Self::sweep).
    pub fn delete(&mut self, id: BodyId) -> Result<(), SimulationError> {
        let idx = self.index_of(id)?;
        self.bodies[idx].mark_for_deletion();
        Ok(())
    }

    /// Remove marked bodies and, transitively, their satellites in one compacting pass.
    pub fn sweep(&mut self) -> usize {
        let mut removed: HashSet<BodyId> = HashSet::new();
        for body in &self.bodies {
            let orphaned = body.parent().is_some_and(|p| removed.contains(&p));
            if body.is_marked_for_deletion() || orphaned {
                removed.insert(body.id());
            }
        }
        if removed.is_empty() {
            return 0;
        }

        self.bodies.retain(|b| !removed.contains(&b.id()));
        for body in &mut self.bodies {
            body.satellites.retain(|s| !removed.contains(s));
        }
        self.index = self
            .bodies
            .iter()
            .enumerate()
            .map(|(idx, b)| (b.id(), idx))
            .collect();

        log::debug!("swept {} bodies, {} remain", removed.len(), self.bodies.len());
        removed.len()
    }

    /// Restore every body to its start snapshot and zero the clock counters.
    pub fn reset(&mut self) {
        for idx in 0..self.bodies.len() {
            let origin = self.frame_origin(idx);
            self.bodies[idx].reset(origin);
        }
        self.clock.reset_counters();
    }

    pub fn reset_body(&mut self, id: BodyId) -> Result<(), SimulationError> {
        let idx = self.index_of(id)?;
        let origin = self.frame_origin(idx);
        self.bodies[idx].reset(origin);
        Ok(())
    }

    /// Make the body's current state its new reset snapshot.
    pub fn recenter_body(&mut self, id: BodyId) -> Result<(), SimulationError> {
        let idx = self.index_of(id)?;
        self.bodies[idx].recenter();
        Ok(())
    }

    /// Set a body's μ, then re-derive every descendant satellite's μ from its parent's mass.
    pub fn set_mu(&mut self, id: BodyId, mu: f64) -> Result<(), SimulationError> {
        let idx = self.index_of(id)?;
        let mu = ensure_non_negative("mu", mu)?;
        self.bodies[idx].set_mu(mu);
        self.refresh_satellite_mu(idx);
        Ok(())
    }

    pub fn set_mass(&mut self, id: BodyId, mass: f64) -> Result<(), SimulationError> {
        let idx = self.index_of(id)?;
        let mass = ensure_positive("mass", mass)?;
        self.bodies[idx].set_mass(mass);
        self.refresh_satellite_mu(idx);
        Ok(())
    }

    pub fn set_scale(&mut self, id: BodyId, scale: f64) -> Result<(), SimulationError> {
        let idx = self.index_of(id)?;
        let scale = ensure_positive("scale", scale)?;
        self.bodies[idx].set_scale(scale);
        Ok(())
    }

    pub fn rename(&mut self, id: BodyId, name: impl Into<String>) -> Result<(), SimulationError> {
        let idx = self.index_of(id)?;
        let name = name.into();
        if let Err(err) = ensure_name(&name) {
            log::warn!("rejected empty name for body {id}");
            return Err(err);
        }
        self.bodies[idx].set_name(name);
        Ok(())
    }

    fn refresh_satellite_mu(&mut self, idx: usize) {
        let mu = mu_from_mass(self.bodies[idx].mass());
        for n in 0..self.bodies[idx].satellites.len() {
            let satellite = self.bodies[idx].satellites[n];
            if let Some(&child) = self.index.get(&satellite) {
                self.bodies[child].set_mu(mu);
                self.refresh_satellite_mu(child);
            }
        }
    }

    pub fn set_central_mass(&mut self, mass: f64) -> Result<(), SimulationError> {
        let mass = ensure_positive("central mass", mass)?;
        self.central.set_mass(mass);
        self.recalculate_mu();
        Ok(())
    }

    pub fn set_central_scale(&mut self, scale: f64) -> Result<(), SimulationError> {
        let scale = ensure_positive("central scale", scale)?;
        self.central.set_scale(scale);
        self.recalculate_mu();
        Ok(())
    }

    /// Re-derive μ everywhere: roots from the central body, satellites from their parent.
    pub fn recalculate_mu(&mut self) {
        let central_mu = self.central.recalculate_mu();
        for idx in 0..self.bodies.len() {
            let mu = match self.bodies[idx].parent() {
                None => central_mu,
                Some(parent) => mu_from_mass(self.bodies[self.index[&parent]].mass()),
            };
            self.bodies[idx].set_mu(mu);
        }
        log::debug!("recalculated mu for {} bodies (central mu = {central_mu:e})", self.len());
    }

    pub fn calculate_period(&self, id: BodyId) -> Option<f64> {
        self.body(id).and_then(Body::calculate_period)
    }
}
