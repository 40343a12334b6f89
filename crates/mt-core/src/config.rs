//! Simulation configuration.
//!
//! Configuration is an explicit value passed at construction time; there is
//! no process-wide parameter store.  Anything that needs a knob takes a
//! `SimConfig` (or a field of one) through its constructor.

use crate::error::{CoreError, CoreResult};
use crate::idm::IdmParams;

/// Routing algorithm selector.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrategyKind {
    Dijkstra,
    AStar,
}

/// Top-level simulation configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Global time multiplier applied to every `update(dt)`.  May be 0 to
    /// freeze virtual time while the driver loop keeps running.
    pub simulation_speed: f64,

    /// IDM tuning used for cars spawned by the simulation.
    pub car: IdmParams,

    /// IDM tuning used for trucks spawned by the simulation.
    pub truck: IdmParams,

    /// Capacity substituted when a road reports no capacity of its own.
    pub default_capacity: u32,

    /// Minimum virtual seconds between applied re-routes per vehicle.
    pub reroute_cooldown_secs: f64,

    /// Routing strategy assigned to newly spawned vehicles.
    pub strategy: StrategyKind,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            simulation_speed: 1.0,
            car: IdmParams::car(),
            truck: IdmParams::truck(),
            default_capacity: 10,
            reroute_cooldown_secs: 3.0,
            strategy: StrategyKind::AStar,
        }
    }
}

impl SimConfig {
    /// Check the configuration for values the simulator cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.simulation_speed.is_finite() || self.simulation_speed < 0.0 {
            return Err(CoreError::Config(format!(
                "simulation_speed must be finite and >= 0, got {}",
                self.simulation_speed
            )));
        }
        if !self.reroute_cooldown_secs.is_finite() || self.reroute_cooldown_secs <= 0.0 {
            return Err(CoreError::Config(format!(
                "reroute_cooldown_secs must be finite and > 0, got {}",
                self.reroute_cooldown_secs
            )));
        }
        if self.default_capacity == 0 {
            return Err(CoreError::Config(
                "default_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
