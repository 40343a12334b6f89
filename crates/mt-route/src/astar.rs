//! A* with an admissible heuristic from a graph-wide optimistic speed bound.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use mt_core::NodeId;
use mt_net::{Road, RoadGraph};

use crate::common::{checked_time, rebuild_path, vmax_upper_bound, QueueEntry, NO_PARENT};
use crate::strategy::RouteStrategy;

/// A* keyed on `f = g + h` where `h(u) = euclid(u, goal) / vmax_upper_bound`.
///
/// The bound is an upper bound on any edge's effective speed under the
/// injected time function, so `h` never overestimates the remaining time and
/// A* settles nodes in the same cost order as Dijkstra.
pub struct AStar;

impl RouteStrategy for AStar {
    fn compute_route(
        &self,
        graph: &RoadGraph,
        start: NodeId,
        goal: NodeId,
        time_fn: &dyn Fn(&Road) -> f64,
    ) -> Vec<NodeId> {
        if graph.is_empty() {
            return Vec::new();
        }
        let (Some(start_idx), Some(goal_idx)) = (graph.index_of(start), graph.index_of(goal))
        else {
            return Vec::new();
        };
        // Trivial route short-circuits before the speed bound is computed,
        // which must see at least one positive-length edge.
        if start_idx == goal_idx {
            return vec![start];
        }

        let vmax = vmax_upper_bound(graph, time_fn);
        let goal_pos = graph.node(goal_idx).pos();
        let h = |u: usize| graph.node(u).pos().distance(goal_pos) / vmax;

        let n = graph.node_count();
        let mut g_score = vec![f64::INFINITY; n];
        let mut parent = vec![NO_PARENT; n];
        let mut closed = vec![false; n];

        let mut open: BinaryHeap<Reverse<QueueEntry>> = BinaryHeap::new();
        g_score[start_idx] = 0.0;
        open.push(Reverse(QueueEntry {
            cost: h(start_idx),
            node: start_idx,
        }));

        while let Some(Reverse(QueueEntry { node: u, .. })) = open.pop() {
            if closed[u] {
                continue;
            }
            closed[u] = true;
            if u == goal_idx {
                break;
            }

            for &(v, edge) in graph.outgoing(u) {
                let w = checked_time(time_fn(graph.edge(edge)));
                let tentative = g_score[u] + w;
                if tentative < g_score[v] {
                    g_score[v] = tentative;
                    parent[v] = u;
                    open.push(Reverse(QueueEntry {
                        cost: tentative + h(v),
                        node: v,
                    }));
                }
            }
        }

        rebuild_path(start_idx, goal_idx, &parent, graph)
    }
}
