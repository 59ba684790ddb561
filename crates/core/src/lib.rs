//! Core units, constants, and shared primitives for the Orbyte workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Newtonian gravitational constant (m³ kg⁻¹ s⁻²).
    pub const G: f64 = 6.6743e-11;
    /// Number of positions kept in a body's trail.
    pub const TRAIL_CAPACITY: usize = 24;
    /// Milliseconds per second.
    pub const MS_PER_SECOND: f64 = 1_000.0;
    /// Seconds per day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::MS_PER_SECOND;

    /// Convert milliseconds to seconds.
    #[inline]
    pub fn ms_to_seconds(v: f64) -> f64 {
        v / MS_PER_SECOND
    }

    /// Convert seconds to milliseconds.
    #[inline]
    pub fn seconds_to_ms(v: f64) -> f64 {
        v * MS_PER_SECOND
    }

    /// Standard gravitational parameter for a mass in kilograms.
    #[inline]
    pub fn mu_from_mass(mass_kg: f64) -> f64 {
        super::constants::G * mass_kg
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::SECONDS_PER_DAY;

    /// Convert days to seconds.
    #[inline]
    pub fn days_to_seconds(days: f64) -> f64 {
        days * SECONDS_PER_DAY
    }

    /// Convert seconds to days.
    #[inline]
    pub fn seconds_to_days(seconds: f64) -> f64 {
        seconds / SECONDS_PER_DAY
    }
}

pub mod vector;

pub use vector::Vector3;
