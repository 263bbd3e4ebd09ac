//! Routing tunables.

use serde::{Deserialize, Serialize};

use super::BuildError;

/// Tunables used when building the route graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutingSettings {
    /// Time spent waiting for any bus at any stop (minutes).
    pub bus_wait_time: f64,

    /// Network-wide bus speed (km/h).
    pub bus_velocity: f64,
}

impl RoutingSettings {
    /// Create settings from a wait time in minutes and a speed in km/h.
    pub fn new(bus_wait_time: f64, bus_velocity: f64) -> Self {
        Self {
            bus_wait_time,
            bus_velocity,
        }
    }

    /// Bus speed in meters per minute.
    pub fn bus_speed_m_per_min(&self) -> f64 {
        self.bus_velocity * 1000.0 / 60.0
    }

    /// Check both tunables are positive and finite.
    pub fn validate(&self) -> Result<(), BuildError> {
        if !(self.bus_wait_time.is_finite() && self.bus_wait_time > 0.0) {
            return Err(BuildError::InvalidSettings(format!(
                "bus_wait_time must be positive, got {}",
                self.bus_wait_time
            )));
        }
        if !(self.bus_velocity.is_finite() && self.bus_velocity > 0.0) {
            return Err(BuildError::InvalidSettings(format!(
                "bus_velocity must be positive, got {}",
                self.bus_velocity
            )));
        }
        Ok(())
    }
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            bus_wait_time: 6.0,
            bus_velocity: 40.0,
        }
    }
}
