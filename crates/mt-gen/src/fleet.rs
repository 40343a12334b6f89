//! Fleet population management: keep target car/truck counts on the road.

use mt_core::{NodeId, SimRng, StrategyKind};
use mt_sim::{Simulation, VehicleKind};

/// Retries for drawing a distinct origin/destination pair.
const PAIR_DRAW_RETRIES: u32 = 16;

/// Spawns vehicles at random distinct node pairs and tops the population
/// back up as vehicles arrive and get pruned.
///
/// The manager holds no reference to the simulation; every operation
/// borrows it for the duration of the call.
pub struct FleetManager {
    node_ids: Vec<NodeId>,
    target_cars: usize,
    target_trucks: usize,
    car_strategy: StrategyKind,
    truck_strategy: StrategyKind,
    rng: SimRng,
}

impl FleetManager {
    /// `rng` should be the run's `"fleet"` stream so origin/destination
    /// draws stay independent of network generation.
    ///
    /// # Panics
    ///
    /// Panics when fewer than two node ids are supplied; a fleet needs
    /// distinct origins and destinations.
    pub fn new(
        node_ids: Vec<NodeId>,
        target_cars: usize,
        target_trucks: usize,
        car_strategy: StrategyKind,
        truck_strategy: StrategyKind,
        rng: SimRng,
    ) -> Self {
        assert!(
            node_ids.len() >= 2,
            "fleet needs at least two intersections"
        );
        Self {
            node_ids,
            target_cars,
            target_trucks,
            car_strategy,
            truck_strategy,
            rng,
        }
    }

    fn random_node(&mut self) -> NodeId {
        let i = self.rng.gen_range(0..self.node_ids.len());
        self.node_ids[i]
    }

    fn random_distinct_pair(&mut self) -> Option<(NodeId, NodeId)> {
        let a = self.random_node();
        let mut b = self.random_node();
        let mut guard = 0;
        while b == a && guard < PAIR_DRAW_RETRIES {
            b = self.random_node();
            guard += 1;
        }
        (a != b).then_some((a, b))
    }

    pub fn spawn_one_car(&mut self, sim: &mut Simulation) {
        if let Some((start, goal)) = self.random_distinct_pair() {
            sim.spawn_car(start, goal, self.car_strategy);
        }
    }

    pub fn spawn_one_truck(&mut self, sim: &mut Simulation) {
        if let Some((start, goal)) = self.random_distinct_pair() {
            sim.spawn_truck(start, goal, self.truck_strategy);
        }
    }

    /// Spawn the full target population at once.
    pub fn seed_initial(&mut self, sim: &mut Simulation) {
        for _ in 0..self.target_cars {
            self.spawn_one_car(sim);
        }
        for _ in 0..self.target_trucks {
            self.spawn_one_truck(sim);
        }
    }

    /// Count driving vehicles by kind and spawn replacements up to the
    /// targets.  Stationary vehicles without a route do not count.
    pub fn top_up(&mut self, sim: &mut Simulation) {
        let mut cars = 0;
        let mut trucks = 0;
        for v in sim.vehicles() {
            if v.render_state().is_some() {
                match v.kind() {
                    VehicleKind::Car => cars += 1,
                    VehicleKind::Truck => trucks += 1,
                }
            }
        }
        while cars < self.target_cars {
            self.spawn_one_car(sim);
            cars += 1;
        }
        while trucks < self.target_trucks {
            self.spawn_one_truck(sim);
            trucks += 1;
        }
    }
}
