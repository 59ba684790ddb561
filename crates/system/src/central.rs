//! The static attractor at the world origin.

use orbyte_core::units::mu_from_mass;

use crate::error::{SimulationError, ensure_name, ensure_positive};
use crate::record::CentralRecord;

/// Fixed at the origin and never integrated. Mass and scale are editable at runtime
/// through [`Simulation`](crate::Simulation), which re-propagates μ after every edit.
#[derive(Debug, Clone, PartialEq)]
pub struct CentralBody {
    name: String,
    mass: f64,
    scale: f64,
    mu: f64,
}

impl CentralBody {
    pub fn new(name: impl Into<String>, mass: f64, scale: f64) -> Result<Self, SimulationError> {
        let name = name.into();
        ensure_name(&name)?;
        let mass = ensure_positive("central mass", mass)?;
        let scale = ensure_positive("central scale", scale)?;
        Ok(CentralBody {
            name,
            mass,
            scale,
            mu: mu_from_mass(mass),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// `G × mass`, as of the last [`recalculate_mu`](Self::recalculate_mu).
    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn record(&self) -> CentralRecord {
        CentralRecord {
            name: self.name.clone(),
            mass: self.mass,
            scale: self.scale,
        }
    }

    pub(crate) fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
    }

    pub(crate) fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    pub(crate) fn recalculate_mu(&mut self) -> f64 {
        self.mu = mu_from_mass(self.mass);
        self.mu
    }
}

impl TryFrom<CentralRecord> for CentralBody {
    type Error = SimulationError;

    fn try_from(record: CentralRecord) -> Result<Self, Self::Error> {
        CentralBody::new(record.name, record.mass, record.scale)
    }
}
