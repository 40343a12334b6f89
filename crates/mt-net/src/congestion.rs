//! Tiered (halving) congestion model.
//!
//! # Rule (per directed edge)
//!
//! Let `x` be the road's capacity (vehicles that fit comfortably) and `N`
//! the live count:
//!
//! * `N <= x`        → `v_eff = v_free`
//! * `x < N <= 2x`   → `v_eff = v_free / 2`
//! * `2x < N <= 3x`  → `v_eff = v_free / 4`
//! * in general       `v_eff = v_free / 2^(ceil(N/x) - 1)`
//!
//! The curve is coarse on purpose: monotone in `N`, bounded below by a
//! positive epsilon, and yielding finite deterministic edge times, which is
//! all the routing strategies need from a cost field.
//!
//! All vehicles on an edge count equally; partial progress along the edge is
//! ignored.

use std::collections::HashMap;

use mt_core::NodeId;

use crate::graph::Road;

/// Floor applied to effective speed so edge times stay finite.
const MIN_EFFECTIVE_SPEED: f64 = 1e-6;

/// Floor applied to edge length in time computations.
const MIN_EDGE_LENGTH: f64 = 1e-9;

/// Speed cap used to mark an edge as blocked by an incident.
const BLOCKED_SPEED: f64 = 0.01;

// ── EdgeKey ───────────────────────────────────────────────────────────────────

/// Directed edge identifier for state keyed outside of the graph.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeKey {
    pub from: NodeId,
    pub to: NodeId,
}

impl EdgeKey {
    #[inline]
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }

    /// Key of the given road.
    #[inline]
    pub fn of(road: &Road) -> Self {
        Self::new(road.from(), road.to())
    }
}

impl std::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

// ── EdgeState ─────────────────────────────────────────────────────────────────

/// Live state of a single directed edge.  Created lazily on first enter;
/// reclaimed once the count returns to zero and no override remains.
#[derive(Clone, Debug, Default)]
struct EdgeState {
    vehicles: u32,
    /// Temporary cap applied to free-flow speed (incident, road works).
    speed_limit_override: Option<f64>,
}

impl EdgeState {
    fn reclaimable(&self) -> bool {
        self.vehicles == 0 && self.speed_limit_override.is_none()
    }
}

// ── CongestionModel ───────────────────────────────────────────────────────────

/// Per-edge live vehicle counts, speed overrides, and the halving rule.
///
/// The model is the only mutable state shared between vehicles: writers are
/// the edge enter/exit notifications and the override setters; readers are
/// [`effective_speed`](Self::effective_speed) and
/// [`edge_time`](Self::edge_time), both pure.
#[derive(Clone, Debug)]
pub struct CongestionModel {
    state: HashMap<EdgeKey, EdgeState>,
    default_capacity: u32,
}

impl Default for CongestionModel {
    fn default() -> Self {
        Self::new(10)
    }
}

impl CongestionModel {
    /// Create a model with the capacity substituted for roads that report
    /// none of their own.
    pub fn new(default_capacity: u32) -> Self {
        Self {
            state: HashMap::new(),
            default_capacity: default_capacity.max(1),
        }
    }

    // ── Count maintenance ─────────────────────────────────────────────────

    /// A vehicle entered the directed edge.
    pub fn on_enter_edge(&mut self, edge: EdgeKey) {
        self.state.entry(edge).or_default().vehicles += 1;
    }

    /// A vehicle left the directed edge.  Floors at zero; zeroed entries
    /// without overrides are reclaimed.
    pub fn on_exit_edge(&mut self, edge: EdgeKey) {
        if let Some(s) = self.state.get_mut(&edge) {
            s.vehicles = s.vehicles.saturating_sub(1);
            if s.reclaimable() {
                self.state.remove(&edge);
            }
        }
    }

    /// Live vehicle count on the directed edge.
    pub fn vehicles_on(&self, edge: EdgeKey) -> u32 {
        self.state.get(&edge).map_or(0, |s| s.vehicles)
    }

    /// Sum of live counts across all edges.
    pub fn total_vehicles(&self) -> u32 {
        self.state.values().map(|s| s.vehicles).sum()
    }

    // ── Overrides ─────────────────────────────────────────────────────────

    /// Cap the edge's free-flow speed.  `limit` must be positive and finite.
    pub fn set_edge_speed_limit(&mut self, edge: EdgeKey, limit: f64) {
        assert!(
            limit.is_finite() && limit > 0.0,
            "speed limit override must be positive and finite, got {limit}"
        );
        self.state.entry(edge).or_default().speed_limit_override = Some(limit);
    }

    /// Remove the edge's speed override, reclaiming the entry if idle.
    pub fn clear_edge_speed_limit(&mut self, edge: EdgeKey) {
        if let Some(s) = self.state.get_mut(&edge) {
            s.speed_limit_override = None;
            if s.reclaimable() {
                self.state.remove(&edge);
            }
        }
    }

    /// Mark an edge as blocked by an incident (near-zero speed cap).
    pub fn block_edge(&mut self, edge: EdgeKey) {
        self.set_edge_speed_limit(edge, BLOCKED_SPEED);
    }

    /// Clear an incident block.
    pub fn unblock_edge(&mut self, edge: EdgeKey) {
        self.clear_edge_speed_limit(edge);
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Effective speed on `road` under the halving rule.  Strictly positive.
    pub fn effective_speed(&self, road: &Road) -> f64 {
        let mut v_free = f64::from(road.max_speed().max(1));

        let key = EdgeKey::of(road);
        let n = match self.state.get(&key) {
            Some(s) => {
                if let Some(limit) = s.speed_limit_override {
                    v_free = v_free.min(limit);
                }
                s.vehicles
            }
            None => 0,
        };

        if n == 0 {
            return v_free;
        }

        let x = self.capacity_for(road);
        // Tier index m = ceil(N/x), m >= 1; divisor 2^(m-1).
        let m = n.div_ceil(x);
        let v_eff = v_free * (-f64::from(m - 1)).exp2();
        v_eff.max(MIN_EFFECTIVE_SPEED)
    }

    /// Travel time over `road` for a vehicle with its own speed cap:
    /// `length / min(vehicle_max_speed, effective_speed)`.
    pub fn edge_time(&self, road: &Road, vehicle_max_speed: f64) -> f64 {
        let len = road.length().max(MIN_EDGE_LENGTH);
        let v = vehicle_max_speed.max(1.0).min(self.effective_speed(road));
        len / v
    }

    /// Capacity `x` for a road, falling back to the default when the road
    /// reports none.
    fn capacity_for(&self, road: &Road) -> u32 {
        let cap = road.capacity();
        if cap == 0 {
            self.default_capacity
        } else {
            cap
        }
    }
}
