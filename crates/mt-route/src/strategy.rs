//! Routing strategy trait and selector mapping.

use mt_core::{NodeId, StrategyKind};
use mt_net::{Road, RoadGraph};

use crate::{AStar, Dijkstra};

/// A shortest-time planner over the road graph.
///
/// # Result semantics
///
/// * empty when `start` or `goal` is absent from the graph, or unreachable;
/// * `[start]` when `start == goal`;
/// * otherwise a sequence beginning with `start` and ending with `goal`
///   where every consecutive pair is an existing directed edge and the total
///   `time_fn` cost is minimal.
///
/// `time_fn` must be finite and non-negative for every edge; implementations
/// may assume it is deterministic across a single route computation.
pub trait RouteStrategy {
    fn compute_route(
        &self,
        graph: &RoadGraph,
        start: NodeId,
        goal: NodeId,
        time_fn: &dyn Fn(&Road) -> f64,
    ) -> Vec<NodeId>;
}

/// Map a [`StrategyKind`] selector to its planner.
pub fn planner(kind: StrategyKind) -> &'static dyn RouteStrategy {
    match kind {
        StrategyKind::Dijkstra => &Dijkstra,
        StrategyKind::AStar => &AStar,
    }
}
