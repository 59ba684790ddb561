//! Time scale and frame bookkeeping for the update driver.

use orbyte_core::units::ms_to_seconds;

use crate::error::{SimulationError, ensure_non_negative};

/// Converts externally supplied wall-clock deltas into simulated seconds.
///
/// A time scale of zero means paused; one is real time.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    time_scale: f64,
    resume_scale: f64,
    frames: u64,
    wall_ms: f64,
    simulated_seconds: f64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        SimulationClock {
            time_scale: 1.0,
            resume_scale: 1.0,
            frames: 0,
            wall_ms: 0.0,
            simulated_seconds: 0.0,
        }
    }
}

impl SimulationClock {
    pub fn new(time_scale: f64) -> Result<Self, SimulationError> {
        let mut clock = SimulationClock::default();
        clock.set_time_scale(time_scale)?;
        Ok(clock)
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn is_paused(&self) -> bool {
        self.time_scale == 0.0
    }

    pub fn set_time_scale(&mut self, time_scale: f64) -> Result<(), SimulationError> {
        self.time_scale = ensure_non_negative("time scale", time_scale)?;
        if time_scale > 0.0 {
            self.resume_scale = time_scale;
        }
        Ok(())
    }

    /// Pause, remembering the current scale for [`resume`](Self::resume).
    pub fn pause(&mut self) {
        if !self.is_paused() {
            self.resume_scale = self.time_scale;
            self.time_scale = 0.0;
        }
    }

    pub fn resume(&mut self) {
        if self.is_paused() {
            self.time_scale = self.resume_scale;
        }
    }

    /// Simulated seconds a frame of `delta_ms` covers at the current scale.
    pub fn step_seconds(&self, delta_ms: f64) -> f64 {
        ms_to_seconds(delta_ms) * self.time_scale
    }

    /// Record one frame and return its simulated duration.
    pub(crate) fn advance(&mut self, delta_ms: f64) -> f64 {
        let dt = self.step_seconds(delta_ms);
        self.frames += 1;
        self.wall_ms += delta_ms;
        self.simulated_seconds += dt;
        dt
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn wall_ms(&self) -> f64 {
        self.wall_ms
    }

    pub fn simulated_seconds(&self) -> f64 {
        self.simulated_seconds
    }

    pub(crate) fn reset_counters(&mut self) {
        self.frames = 0;
        self.wall_ms = 0.0;
        self.simulated_seconds = 0.0;
    }
}
