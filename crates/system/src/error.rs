use orbyte_config::ConfigError;
use thiserror::Error;

use crate::body::BodyId;

/// Errors surfaced by construction and edit commands.
///
/// Frame updates never fail: singular geometry is absorbed by the gravity guard and a
/// zero time scale is a valid pause.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid {field}: {value}")]
    InvalidParameter { field: &'static str, value: f64 },
    #[error("body name must not be empty")]
    EmptyName,
    #[error("no body with id {0}")]
    UnknownBody(BodyId),
    #[error("parent body '{0}' not found")]
    UnknownParent(String),
    #[error("scenario rejected: {0}")]
    Config(#[from] ConfigError),
}

pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<f64, SimulationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimulationError::InvalidParameter { field, value })
    }
}

pub(crate) fn ensure_non_negative(
    field: &'static str,
    value: f64,
) -> Result<f64, SimulationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SimulationError::InvalidParameter { field, value })
    }
}

pub(crate) fn ensure_name(name: &str) -> Result<(), SimulationError> {
    if name.trim().is_empty() {
        Err(SimulationError::EmptyName)
    } else {
        Ok(())
    }
}
