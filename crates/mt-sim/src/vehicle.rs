//! Path-following vehicle with IDM longitudinal dynamics.
//!
//! # Movement model
//!
//! Position is a scalar progress in `[0, length]` along the current edge.
//! Speed is integrated with IDM when a leader is present, or relaxed toward
//! the local desired speed otherwise.  The desired speed on an edge is
//! `min(v0, effective_speed)`, further capped by a kinematic lookahead bound
//! guaranteeing the vehicle can decelerate to the next edge's cap by edge
//! end.
//!
//! # Re-routing
//!
//! Entering an edge whose effective speed is below its free-flow limit arms
//! a pending re-route.  While armed, a re-route is attempted at every edge
//! transition and on every later tick, so a cooldown that elapses mid-edge
//! applies the new plan without waiting for the next transition: the tail
//! behind the current edge is spliced out for the new one.  Application is
//! unconditional; whether it actually saved time is recorded by the
//! simulation's telemetry from the returned [`RerouteApplied`] event.

use mt_core::{idm_accel, IdmParams, LeaderInfo, NodeId, StrategyKind, VehicleId};
use mt_net::{CongestionModel, EdgeKey, RoadGraph};
use mt_route::planner;

use crate::sim::SnapshotItem;

/// Edge-end detection slack.
const EDGE_END_EPS: f64 = 1e-9;

/// Additive slack on the lookahead cap so the cap itself never rounds the
/// next edge's limit away.
const LOOKAHEAD_EPS: f64 = 1e-6;

/// Vehicle population class.  Cars and trucks differ only in their IDM
/// parameters; the tag exists so fleet management can count them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleKind {
    Car,
    Truck,
}

/// Event returned from [`Vehicle::update`] when a re-route was applied.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RerouteApplied {
    pub vehicle: VehicleId,
    /// Estimated remaining travel time on the old route, seconds.
    pub old_eta: f64,
    /// Estimated remaining travel time on the new route, seconds.
    pub new_eta: f64,
}

// ── Vehicle ───────────────────────────────────────────────────────────────────

/// A single vehicle following a route of node ids edge by edge.
#[derive(Debug)]
pub struct Vehicle {
    id: VehicleId,
    kind: VehicleKind,
    idm: IdmParams,
    strategy: StrategyKind,

    route: Vec<NodeId>,
    /// Index of the current edge's from-node within `route`.
    route_index: usize,
    current_edge: Option<EdgeKey>,
    /// Scalar position along the current edge, in `[0, length]`.
    progress: f64,
    speed: f64,

    /// Virtual seconds since the last applied re-route.
    since_recompute: f64,
    recompute_cooldown: f64,
    pending_reroute: bool,

    leader: Option<LeaderInfo>,
}

impl Vehicle {
    pub fn new(
        id: VehicleId,
        kind: VehicleKind,
        idm: IdmParams,
        strategy: StrategyKind,
        recompute_cooldown: f64,
    ) -> Self {
        Self {
            id,
            kind,
            idm,
            strategy,
            route: Vec::new(),
            route_index: 0,
            current_edge: None,
            progress: 0.0,
            speed: 0.0,
            // Cooldown starts satisfied: a freshly spawned vehicle may react
            // to congestion on its very first edge.
            since_recompute: recompute_cooldown,
            recompute_cooldown,
            pending_reroute: false,
            leader: None,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> VehicleId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> VehicleKind {
        self.kind
    }

    #[inline]
    pub fn idm(&self) -> &IdmParams {
        &self.idm
    }

    #[inline]
    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    #[inline]
    pub fn route(&self) -> &[NodeId] {
        &self.route
    }

    #[inline]
    pub fn route_index(&self) -> usize {
        self.route_index
    }

    #[inline]
    pub fn current_edge(&self) -> Option<EdgeKey> {
        self.current_edge
    }

    #[inline]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Goal node id, if a route is set.
    pub fn goal_id(&self) -> Option<NodeId> {
        self.route.last().copied()
    }

    /// `true` once the final edge of the route has been traversed (or the
    /// route was trivially a single node).  Vehicles without a route are
    /// stationary, not arrived.
    pub fn has_arrived(&self) -> bool {
        !self.route.is_empty() && self.route_index + 1 >= self.route.len()
    }

    /// Lightweight per-vehicle record for presentation, present only while
    /// the vehicle has a drivable edge.
    pub fn render_state(&self) -> Option<SnapshotItem> {
        if self.route.len() < 2 || self.route_index + 1 >= self.route.len() {
            return None;
        }
        Some(SnapshotItem {
            id: self.id,
            from: self.route[self.route_index],
            to: self.route[self.route_index + 1],
            progress: self.progress,
            speed: self.speed,
        })
    }

    /// Node id the vehicle is exactly at, if any: the route start when no
    /// edge is active, or an endpoint of the current edge when progress sits
    /// on the boundary.
    pub fn current_node_id(&self, graph: &RoadGraph) -> Option<NodeId> {
        let Some(edge) = self.current_edge else {
            return self.route.first().copied();
        };
        let road = graph.find_edge(edge.from, edge.to)?;
        if self.progress <= 0.0 {
            Some(edge.from)
        } else if self.progress >= road.length() {
            Some(edge.to)
        } else {
            None
        }
    }

    // ── Inputs from the simulation ────────────────────────────────────────

    /// Provide the leader estimate for this tick.  Call before `update`.
    #[inline]
    pub fn set_leader_info(&mut self, info: LeaderInfo) {
        self.leader = Some(info);
    }

    /// Clear leader information (e.g. when switching edges).
    #[inline]
    pub fn clear_leader_info(&mut self) {
        self.leader = None;
    }

    /// Swap the routing strategy and arm an immediate re-route opportunity.
    pub fn set_strategy(&mut self, strategy: StrategyKind) {
        self.strategy = strategy;
        self.pending_reroute = true;
        self.since_recompute = self.recompute_cooldown;
    }

    // ── Route management ──────────────────────────────────────────────────

    /// Replace the route.  Resets index, progress, and speed; enters the
    /// first edge when the route has at least two nodes.  An active edge is
    /// exited first so congestion counts stay balanced.
    pub fn set_route(
        &mut self,
        ids: Vec<NodeId>,
        graph: &RoadGraph,
        congestion: &mut CongestionModel,
    ) {
        self.leave_edge(congestion);
        self.route = ids;
        self.route_index = 0;
        self.progress = 0.0;
        self.speed = 0.0;

        if self.route.len() >= 2 {
            let (from, to) = (self.route[0], self.route[1]);
            self.enter_edge(from, to, graph, congestion);
        }
    }

    fn enter_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        graph: &RoadGraph,
        congestion: &mut CongestionModel,
    ) {
        let key = EdgeKey::new(from, to);
        self.current_edge = Some(key);
        self.progress = 0.0;
        self.leader = None;
        congestion.on_enter_edge(key);

        // Entry cap: never carry more speed onto an edge than it allows.
        if let Some(road) = graph.find_edge(from, to) {
            let cap = self.idm.v0.min(congestion.effective_speed(road));
            if self.speed > cap {
                self.speed = cap;
            }
        }
    }

    fn leave_edge(&mut self, congestion: &mut CongestionModel) {
        if let Some(key) = self.current_edge.take() {
            congestion.on_exit_edge(key);
        }
        self.leader = None;
    }

    // ── Tick integration ──────────────────────────────────────────────────

    /// Advance the vehicle by `dt` seconds of virtual time.
    ///
    /// Returns a [`RerouteApplied`] event when a re-route was applied this
    /// tick, either at an edge transition or mid-edge while a pending
    /// re-route waits out its cooldown.  A missing road for the current
    /// `(from, to)` pair is transient: the vehicle skips the tick without
    /// changing state.
    pub fn update(
        &mut self,
        dt: f64,
        graph: &RoadGraph,
        congestion: &mut CongestionModel,
    ) -> Option<RerouteApplied> {
        self.since_recompute += dt;
        if dt <= 0.0 {
            return None;
        }
        if self.route.len() < 2 || self.route_index + 1 >= self.route.len() {
            return None;
        }
        let edge = self.current_edge?;
        let road = graph.find_edge(edge.from, edge.to)?;

        // Desired speed on the current edge, then the anticipatory cap for
        // the next edge: v <= sqrt(v0_next^2 + 2 b s_rem) guarantees the
        // vehicle can brake down to v0_next by edge end.
        let mut v0 = self.idm.v0.min(congestion.effective_speed(road));
        if self.route_index + 2 < self.route.len() {
            let next_from = self.route[self.route_index + 1];
            let next_to = self.route[self.route_index + 2];
            if let Some(next_road) = graph.find_edge(next_from, next_to) {
                let v0_next = self.idm.v0.min(congestion.effective_speed(next_road));
                let s_rem = (road.length() - self.progress).max(0.0);
                let b_plan = self.idm.b.max(0.1);
                let vcap = (v0_next * v0_next + 2.0 * b_plan * s_rem).max(0.0).sqrt()
                    + LOOKAHEAD_EPS;
                v0 = v0.min(vcap);
            }
        }

        let accel = match self.leader {
            Some(li) if li.present => {
                let gap = li.gap.max(0.0);
                let dv = (self.speed - li.leader_speed).max(0.0);
                let raw = idm_accel(self.speed, v0, gap, dv, &self.idm);
                raw.clamp(-self.idm.b.max(0.1), self.idm.a.max(0.1))
            }
            _ => {
                // Open road: relax toward v0 within this step.
                if self.speed < v0 {
                    self.idm.a.min((v0 - self.speed) / dt.max(1e-3))
                } else if self.speed > v0 {
                    -self.idm.b.min((self.speed - v0) / dt.max(1e-3))
                } else {
                    0.0
                }
            }
        };

        let v_next = self.speed + accel * dt;
        self.speed = if accel >= 0.0 {
            v_next.min(v0)
        } else {
            v_next.max(0.0)
        };
        self.progress += self.speed * dt;

        if self.progress + EDGE_END_EPS >= road.length() {
            return self.transition(graph, congestion);
        }
        // Still mid-edge: an armed re-route gets its chance every tick, not
        // only at transitions, so an elapsed cooldown is acted on promptly.
        if self.pending_reroute {
            return self.recompute_route_if_needed(graph, congestion);
        }
        None
    }

    /// Handle reaching the end of the current edge: advance the route,
    /// enter the next edge (or stop on arrival), observe congestion, and
    /// attempt a pending re-route.
    fn transition(
        &mut self,
        graph: &RoadGraph,
        congestion: &mut CongestionModel,
    ) -> Option<RerouteApplied> {
        self.leave_edge(congestion);
        self.route_index += 1;

        if self.route_index + 1 >= self.route.len() {
            // Arrived.
            self.speed = 0.0;
            return None;
        }

        let (from, to) = (self.route[self.route_index], self.route[self.route_index + 1]);
        self.enter_edge(from, to, graph, congestion);

        if let Some(new_road) = graph.find_edge(from, to) {
            if congestion.effective_speed(new_road) < f64::from(new_road.max_speed()) {
                self.pending_reroute = true;
            }
        }

        if self.pending_reroute {
            return self.recompute_route_if_needed(graph, congestion);
        }
        None
    }

    // ── Re-routing ────────────────────────────────────────────────────────

    /// Attempt to re-plan toward the goal if the cooldown has elapsed.
    ///
    /// The new route is applied unconditionally; the returned event carries
    /// both ETAs so the caller's telemetry can record the actual gain.
    pub fn recompute_route_if_needed(
        &mut self,
        graph: &RoadGraph,
        congestion: &mut CongestionModel,
    ) -> Option<RerouteApplied> {
        if self.since_recompute < self.recompute_cooldown {
            return None;
        }
        let goal = self.goal_id()?;
        let start = self
            .current_node_id(graph)
            .or(self.current_edge.map(|e| e.to))?;

        let v0 = self.idm.v0;
        let time_fn = |road: &mt_net::Road| congestion.edge_time(road, v0);
        let new_route = planner(self.strategy).compute_route(graph, start, goal, &time_fn);

        if new_route.len() < 2 {
            self.pending_reroute = false;
            return None;
        }

        let at_node = self.current_node_id(graph).is_some();
        let unchanged = if at_node {
            self.route[self.route_index..] == new_route[..]
        } else {
            self.route[self.route_index + 1..] == new_route[..]
        };
        if unchanged {
            self.pending_reroute = false;
            return None;
        }

        let old_eta = estimate_eta(graph, congestion, &self.route, self.route_index, self.progress);
        // The current edge's remainder lies ahead of the vehicle on either
        // route; include it on both sides so the comparison is like for like.
        let current_edge_remainder = if at_node {
            0.0
        } else {
            match self.current_edge.and_then(|e| graph.find_edge(e.from, e.to)) {
                Some(road) => {
                    (road.length() - self.progress).max(0.0) / congestion.effective_speed(road)
                }
                None => 0.0,
            }
        };
        let new_eta = current_edge_remainder + estimate_eta(graph, congestion, &new_route, 0, 0.0);

        if at_node {
            let keep = self.speed;
            self.set_route(new_route, graph, congestion);
            self.speed = keep;
        } else {
            // Keep traversing the current edge; splice the new tail behind
            // it so route[route_index] stays the current edge's from-node.
            let from = self.route[self.route_index];
            let mut route = Vec::with_capacity(new_route.len() + 1);
            route.push(from);
            route.extend(new_route);
            self.route = route;
            self.route_index = 0;
        }

        self.pending_reroute = false;
        self.since_recompute = 0.0;

        Some(RerouteApplied {
            vehicle: self.id,
            old_eta,
            new_eta,
        })
    }
}

/// Estimated travel time over the edges of `path[start_index..]` at current
/// effective speeds.  `s_on_first` is subtracted from the first edge's
/// length (progress already made on it); edges missing from the graph are
/// skipped.
fn estimate_eta(
    graph: &RoadGraph,
    congestion: &CongestionModel,
    path: &[NodeId],
    start_index: usize,
    s_on_first: f64,
) -> f64 {
    let mut eta = 0.0;
    for (i, pair) in path.windows(2).enumerate().skip(start_index) {
        let Some(road) = graph.find_edge(pair[0], pair[1]) else {
            continue;
        };
        let remaining = if i == start_index {
            (road.length() - s_on_first).max(0.0)
        } else {
            road.length()
        };
        eta += remaining / congestion.effective_speed(road);
    }
    eta
}
