//! Network parameters, node scattering, and the composite generator.

use mt_core::{NodeId, SimRng};
use mt_net::RoadGraph;

use crate::{HighwayGenerator, MotorwayGenerator, RoadGenerator, StreetGenerator};

/// Bounded retries when rejection-sampling a node position.
const MAX_TRIES_PER_NODE: u32 = 2_000;

/// Knobs for [`make_random_network`].
#[derive(Clone, Debug)]
pub struct NetworkParams {
    /// World bounds for node placement (inclusive).
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,

    /// How many intersections to attempt to place.
    pub target_nodes: usize,
    /// Minimum pairwise distance between intersections.
    pub min_spacing: i32,

    /// Corridor band width as a fraction of the widest node span.
    pub motorway_threshold_ratio: f64,
    pub motorway_speed: u32,
    pub motorway_capacity: u32,

    pub highway_speed: u32,
    pub highway_capacity: u32,

    /// Neighbors per node for the local street pass.
    pub street_neighbors: usize,
    pub street_speed: u32,
    pub street_capacity: u32,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self {
            min_x: 50,
            max_x: 630,
            min_y: 50,
            max_y: 500,
            target_nodes: 30,
            min_spacing: 30,
            motorway_threshold_ratio: 0.07,
            motorway_speed: 39,
            motorway_capacity: 4,
            highway_speed: 25,
            highway_capacity: 2,
            street_neighbors: 3,
            street_speed: 14,
            street_capacity: 1,
        }
    }
}

/// Scatter up to `params.target_nodes` intersections into the bounds,
/// keeping every pair at least `min_spacing` apart.  Nodes whose position
/// cannot be found within the retry budget are silently dropped.
pub fn scatter_nodes(graph: &mut RoadGraph, params: &NetworkParams, rng: &mut SimRng) {
    let min_dist2 = i64::from(params.min_spacing) * i64::from(params.min_spacing);

    for _ in 0..params.target_nodes {
        for _ in 0..MAX_TRIES_PER_NODE {
            let x = rng.gen_range(params.min_x..=params.max_x);
            let y = rng.gen_range(params.min_y..=params.max_y);

            let clear = graph.nodes().iter().all(|n| {
                let dx = i64::from(x - n.x());
                let dy = i64::from(y - n.y());
                dx * dx + dy * dy >= min_dist2
            });
            if clear {
                graph.add_node(x, y);
                break;
            }
        }
    }
}

/// All node ids of a graph, in insertion order.
pub fn collect_node_ids(graph: &RoadGraph) -> Vec<NodeId> {
    graph.nodes().iter().map(|n| n.id()).collect()
}

/// Scatter nodes and run the three road passes: motorway corridor, MST
/// highway backbone, k-NN streets.
pub fn make_random_network(params: &NetworkParams, rng: &mut SimRng) -> RoadGraph {
    let mut graph = RoadGraph::new();
    scatter_nodes(&mut graph, params, rng);

    MotorwayGenerator::new(
        params.motorway_threshold_ratio,
        params.motorway_speed,
        params.motorway_capacity,
    )
    .generate(&mut graph);

    HighwayGenerator::new(params.highway_speed, params.highway_capacity).generate(&mut graph);

    StreetGenerator::new(
        params.street_neighbors,
        params.street_speed,
        params.street_capacity,
    )
    .generate(&mut graph);

    graph
}
