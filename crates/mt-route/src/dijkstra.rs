//! Label-setting Dijkstra over the adjacency list.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use mt_core::NodeId;
use mt_net::{Road, RoadGraph};

use crate::common::{checked_time, rebuild_path, QueueEntry, NO_PARENT};
use crate::strategy::RouteStrategy;

/// Standard Dijkstra with a min-heap keyed by tentative distance, closed
/// flags to skip stale heap entries, and early exit on goal settlement.
pub struct Dijkstra;

impl RouteStrategy for Dijkstra {
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

        let n = graph.node_count();
        let mut dist = vec![f64::INFINITY; n];
        let mut parent = vec![NO_PARENT; n];
        let mut closed = vec![false; n];

        let mut heap: BinaryHeap<Reverse<QueueEntry>> = BinaryHeap::new();
        dist[start_idx] = 0.0;
        heap.push(Reverse(QueueEntry {
            cost: 0.0,
            node: start_idx,
        }));

        while let Some(Reverse(QueueEntry { node: u, .. })) = heap.pop() {
            if closed[u] {
                continue;
            }
            closed[u] = true;
            if u == goal_idx {
                break;
            }

            for &(v, edge) in graph.outgoing(u) {
                let w = checked_time(time_fn(graph.edge(edge)));
                let candidate = dist[u] + w;
                if candidate < dist[v] {
                    dist[v] = candidate;
                    parent[v] = u;
                    heap.push(Reverse(QueueEntry {
                        cost: candidate,
                        node: v,
                    }));
                }
            }
        }

        rebuild_path(start_idx, goal_idx, &parent, graph)
    }
}
