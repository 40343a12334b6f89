//! The `Simulation` struct and its tick loop.

use std::collections::HashMap;

use mt_core::{LeaderInfo, NodeId, SimConfig, StrategyKind, VehicleId};
use mt_net::{CongestionModel, EdgeKey, RoadGraph};
use mt_route::planner;

use crate::error::SimResult;
use crate::vehicle::{Vehicle, VehicleKind};

// ── Presentation records ──────────────────────────────────────────────────────

/// Per-vehicle value record for rendering and telemetry.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapshotItem {
    pub id: VehicleId,
    /// Current edge: from intersection id.
    pub from: NodeId,
    /// Current edge: to intersection id.
    pub to: NodeId,
    /// Progress along the edge in `[0, length]`.
    pub progress: f64,
    /// Current speed in model units.
    pub speed: f64,
}

/// Aggregate counters exposed to UI panels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimStats {
    /// Number of vehicles currently tracked.
    pub vehicles: usize,
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// Owns the world (graph), the congestion model, and all vehicles, and
/// drives them through the tick loop described in the crate docs.
///
/// The simulation is single-threaded and cooperative: an external driver
/// calls [`update`](Self::update) repeatedly; `stop` and `pause` merely gate
/// whether a call advances anything.
pub struct Simulation {
    graph: RoadGraph,
    congestion: CongestionModel,
    vehicles: Vec<Vehicle>,
    config: SimConfig,

    running: bool,
    paused: bool,
    sim_time: f64,

    /// The most recent global strategy selection.
    strategy: StrategyKind,
    next_vehicle_id: u32,

    reroute_count: usize,
    reroute_saved_time: f64,

    on_post_update: Option<Box<dyn FnMut(f64)>>,
}

impl Simulation {
    /// Build a simulation around a prebuilt graph with default configuration.
    pub fn new(graph: RoadGraph) -> Self {
        Self::with_config(graph, SimConfig::default())
            .expect("default configuration always validates")
    }

    /// Build a simulation with explicit configuration.
    pub fn with_config(graph: RoadGraph, config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            graph,
            congestion: CongestionModel::new(config.default_capacity),
            vehicles: Vec::new(),
            strategy: config.strategy,
            config,
            running: false,
            paused: false,
            sim_time: 0.0,
            next_vehicle_id: 0,
            reroute_count: 0,
            reroute_saved_time: 0.0,
            on_post_update: None,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Start advancing virtual time in `update`.
    pub fn start(&mut self) {
        self.running = true;
        self.paused = false;
    }

    /// Pause advancing time; state is preserved.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Stop advancing time; state is preserved, `start` resumes.
    pub fn stop(&mut self) {
        self.running = false;
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the simulation by `dt` real seconds (scaled internally).
    pub fn update(&mut self, dt: f64) {
        if !self.running || self.paused {
            return;
        }

        let step = dt * self.config.simulation_speed;
        self.sim_time += step;

        self.assign_leaders();

        // Advance all vehicles in insertion order.  Leader info was taken
        // from the pre-step snapshot, so the order cannot affect results.
        let graph = &self.graph;
        let congestion = &mut self.congestion;
        let mut reroutes = Vec::new();
        for vehicle in &mut self.vehicles {
            if let Some(event) = vehicle.update(step, graph, congestion) {
                reroutes.push(event);
            }
        }
        for event in reroutes {
            self.reroute_count += 1;
            self.reroute_saved_time += (event.old_eta - event.new_eta).max(0.0);
        }

        self.vehicles.retain(|v| !v.has_arrived());

        if let Some(cb) = &mut self.on_post_update {
            cb(step);
        }
    }

    /// Build per-edge lanes sorted by ascending progress and feed every
    /// vehicle its leader (or open-road distance to the edge end).
    fn assign_leaders(&mut self) {
        let mut lanes: HashMap<EdgeKey, Vec<(f64, usize)>> = HashMap::new();
        for (i, vehicle) in self.vehicles.iter().enumerate() {
            if let Some(edge) = vehicle.current_edge() {
                lanes.entry(edge).or_default().push((vehicle.progress(), i));
            }
        }

        for (edge, mut lane) in lanes {
            let Some(road) = self.graph.find_edge(edge.from, edge.to) else {
                continue;
            };
            lane.sort_by(|a, b| a.0.total_cmp(&b.0));

            for i in 0..lane.len() {
                let (progress, idx) = lane[i];
                let info = if i + 1 < lane.len() {
                    let (leader_progress, leader_idx) = lane[i + 1];
                    LeaderInfo {
                        present: true,
                        gap: (leader_progress - progress).max(0.0),
                        leader_speed: self.vehicles[leader_idx].speed(),
                    }
                } else {
                    LeaderInfo {
                        present: false,
                        gap: (road.length() - progress).max(0.0),
                        leader_speed: 0.0,
                    }
                };
                self.vehicles[idx].clear_leader_info();
                self.vehicles[idx].set_leader_info(info);
            }
        }
    }

    // ── Spawning ──────────────────────────────────────────────────────────

    /// Create a car driving from `start` to `goal`; returns its id.
    ///
    /// A failed initial route (absent ids, unreachable goal) leaves the
    /// vehicle stationary without a route.
    pub fn spawn_car(&mut self, start: NodeId, goal: NodeId, strategy: StrategyKind) -> VehicleId {
        self.spawn(VehicleKind::Car, start, goal, strategy)
    }

    /// Create a truck driving from `start` to `goal`; returns its id.
    pub fn spawn_truck(&mut self, start: NodeId, goal: NodeId, strategy: StrategyKind) -> VehicleId {
        self.spawn(VehicleKind::Truck, start, goal, strategy)
    }

    fn spawn(
        &mut self,
        kind: VehicleKind,
        start: NodeId,
        goal: NodeId,
        strategy: StrategyKind,
    ) -> VehicleId {
        let id = VehicleId(self.next_vehicle_id);
        self.next_vehicle_id += 1;

        let idm = match kind {
            VehicleKind::Car => self.config.car,
            VehicleKind::Truck => self.config.truck,
        };
        let mut vehicle = Vehicle::new(id, kind, idm, strategy, self.config.reroute_cooldown_secs);
        vehicle.set_strategy(strategy);

        let congestion = &self.congestion;
        let time_fn = |road: &mt_net::Road| congestion.edge_time(road, idm.v0);
        let route = planner(strategy).compute_route(&self.graph, start, goal, &time_fn);
        vehicle.set_route(route, &self.graph, &mut self.congestion);

        self.vehicles.push(vehicle);
        id
    }

    /// Replace the routing strategy for all current vehicles and remember it
    /// for future spawns.
    pub fn set_strategy_for_all(&mut self, strategy: StrategyKind) {
        self.strategy = strategy;
        for vehicle in &mut self.vehicles {
            vehicle.set_strategy(strategy);
        }
    }

    /// Strategy applied by the most recent global selection.
    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// One record per vehicle that currently has a drivable edge.
    pub fn snapshot(&self) -> Vec<SnapshotItem> {
        self.vehicles.iter().filter_map(Vehicle::render_state).collect()
    }

    /// Virtual simulation time in seconds.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Mean speed over vehicles with a drivable edge; 0 when none.
    pub fn average_speed(&self) -> f64 {
        let mut sum = 0.0;
        let mut count = 0usize;
        for v in &self.vehicles {
            if v.render_state().is_some() {
                sum += v.speed();
                count += 1;
            }
        }
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }

    pub fn stats(&self) -> SimStats {
        SimStats {
            vehicles: self.vehicles.len(),
        }
    }

    /// Number of re-routes applied so far.
    pub fn reroute_count(&self) -> usize {
        self.reroute_count
    }

    /// Cumulative estimated seconds saved by re-routing.
    pub fn reroute_saved_time(&self) -> f64 {
        self.reroute_saved_time
    }

    /// Register a callback invoked after each advancing `update(dt)` with
    /// the scaled step.
    pub fn set_on_post_update(&mut self, cb: impl FnMut(f64) + 'static) {
        self.on_post_update = Some(Box::new(cb));
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    pub fn congestion(&self) -> &CongestionModel {
        &self.congestion
    }

    /// Mutable congestion access for incident injection
    /// (`block_edge` / `unblock_edge`, speed overrides).
    pub fn congestion_mut(&mut self) -> &mut CongestionModel {
        &mut self.congestion
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}
