//! Unit tests for mt-route.
//!
//! All tests use hand-crafted networks with free-flow edge times
//! (`length / max_speed`) unless stated otherwise.

#[cfg(test)]
mod helpers {
    use mt_core::NodeId;
    use mt_net::{Road, RoadGraph};

    /// Free-flow time function.
    pub fn free_flow(road: &Road) -> f64 {
        road.length() / f64::from(road.max_speed().max(1))
    }

    /// Total cost of a node-id path under `time_fn`; panics on a broken link.
    pub fn path_cost(graph: &RoadGraph, path: &[NodeId], time_fn: impl Fn(&Road) -> f64) -> f64 {
        path.windows(2)
            .map(|w| time_fn(graph.find_edge(w[0], w[1]).expect("path uses a missing edge")))
            .sum()
    }

    /// A 10x10 square with bidirectional unit-time sides:
    /// A(0,0) B(10,0) C(10,10) D(0,10), maxSpeed 10 everywhere.
    pub fn square() -> (RoadGraph, [NodeId; 4]) {
        let mut g = RoadGraph::new();
        let a = g.add_node(0, 0);
        let b = g.add_node(10, 0);
        let c = g.add_node(10, 10);
        let d = g.add_node(0, 10);
        for (u, v) in [(a, b), (b, c), (c, d), (d, a)] {
            g.add_edge(u, v, 10, 10).unwrap();
            g.add_edge(v, u, 10, 10).unwrap();
        }
        (g, [a, b, c, d])
    }

    /// Two parallel routes of different cost:
    /// s→m1→t is fast (speed 20), s→m2→t is slow (speed 5).
    pub fn two_corridors() -> (RoadGraph, [NodeId; 4]) {
        let mut g = RoadGraph::new();
        let s = g.add_node(0, 0);
        let m1 = g.add_node(50, 40);
        let m2 = g.add_node(50, -40);
        let t = g.add_node(100, 0);
        for (u, v) in [(s, m1), (m1, t)] {
            g.add_edge(u, v, 20, 10).unwrap();
        }
        for (u, v) in [(s, m2), (m2, t)] {
            g.add_edge(u, v, 5, 10).unwrap();
        }
        (g, [s, m1, m2, t])
    }
}

// ── Shared contract ───────────────────────────────────────────────────────────

#[cfg(test)]
mod contract {
    use super::helpers::{free_flow, square};
    use crate::{AStar, Dijkstra, RouteStrategy};
    use mt_core::NodeId;
    use mt_net::RoadGraph;

    fn strategies() -> Vec<(&'static str, &'static dyn RouteStrategy)> {
        vec![("dijkstra", &Dijkstra), ("astar", &AStar)]
    }

    #[test]
    fn empty_graph_yields_empty_route() {
        let g = RoadGraph::new();
        for (name, s) in strategies() {
            assert!(
                s.compute_route(&g, NodeId(0), NodeId(1), &free_flow).is_empty(),
                "{name}"
            );
        }
    }

    #[test]
    fn absent_ids_yield_empty_route() {
        let (g, [a, ..]) = square();
        for (name, s) in strategies() {
            assert!(s.compute_route(&g, a, NodeId(999), &free_flow).is_empty(), "{name}");
            assert!(s.compute_route(&g, NodeId(999), a, &free_flow).is_empty(), "{name}");
        }
    }

    #[test]
    fn same_node_yields_singleton() {
        let (g, [a, ..]) = square();
        for (name, s) in strategies() {
            assert_eq!(s.compute_route(&g, a, a, &free_flow), vec![a], "{name}");
        }
    }

    #[test]
    fn unreachable_goal_yields_empty_route() {
        let mut g = RoadGraph::new();
        let a = g.add_node(0, 0);
        let b = g.add_node(10, 0);
        let island = g.add_node(50, 50);
        g.add_edge(a, b, 10, 0).unwrap();
        // island has no edges at all.
        for (name, s) in strategies() {
            assert!(s.compute_route(&g, a, island, &free_flow).is_empty(), "{name}");
        }
    }

    #[test]
    fn one_way_edge_blocks_return() {
        let mut g = RoadGraph::new();
        let a = g.add_node(0, 0);
        let b = g.add_node(10, 0);
        g.add_edge(a, b, 10, 0).unwrap();
        for (name, s) in strategies() {
            assert_eq!(s.compute_route(&g, a, b, &free_flow), vec![a, b], "{name}");
            assert!(s.compute_route(&g, b, a, &free_flow).is_empty(), "{name}");
        }
    }

    #[test]
    fn every_consecutive_pair_is_an_edge() {
        let (g, [s, _, _, t]) = super::helpers::two_corridors();
        for (name, strat) in strategies() {
            let path = strat.compute_route(&g, s, t, &free_flow);
            assert!(path.len() >= 2, "{name}");
            for w in path.windows(2) {
                assert!(g.find_edge(w[0], w[1]).is_some(), "{name}: {} -> {}", w[0], w[1]);
            }
        }
    }
}

// ── Cost optimality ───────────────────────────────────────────────────────────

#[cfg(test)]
mod optimality {
    use super::helpers::{free_flow, path_cost, square, two_corridors};
    use crate::{AStar, Dijkstra, RouteStrategy};

    #[test]
    fn square_tie_break() {
        // A→C around either side of the square costs exactly 2.0.
        let (g, [a, _, c, _]) = square();
        let path = Dijkstra.compute_route(&g, a, c, &free_flow);
        assert_eq!(path.len(), 3);
        assert_eq!(path.first(), Some(&a));
        assert_eq!(path.last(), Some(&c));
        assert!((path_cost(&g, &path, free_flow) - 2.0).abs() < 1e-9);

        let astar_path = AStar.compute_route(&g, a, c, &free_flow);
        assert!((path_cost(&g, &astar_path, free_flow) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn prefers_faster_corridor() {
        let (g, [s, m1, _, t]) = two_corridors();
        for strat in [&Dijkstra as &dyn RouteStrategy, &AStar] {
            let path = strat.compute_route(&g, s, t, &free_flow);
            assert_eq!(path, vec![s, m1, t]);
        }
    }

    #[test]
    fn dijkstra_and_astar_agree_on_cost() {
        let (g, [s, _, _, t]) = two_corridors();
        let d = path_cost(&g, &Dijkstra.compute_route(&g, s, t, &free_flow), free_flow);
        let a = path_cost(&g, &AStar.compute_route(&g, s, t, &free_flow), free_flow);
        assert!((d - a).abs() < 1e-9);
    }

    #[test]
    fn strategies_agree_across_a_mixed_speed_grid() {
        // 4x4 grid, 100 apart, bidirectional edges whose speed varies with
        // position.  Check cost equality for every corner-to-corner query.
        let mut g = mt_net::RoadGraph::new();
        let mut ids = Vec::new();
        for row in 0..4i32 {
            for col in 0..4i32 {
                ids.push(g.add_node(col * 100, row * 100));
            }
        }
        let at = |row: i32, col: i32| ids[(row * 4 + col) as usize];
        let speed = |row: i32, col: i32| 5 + ((row * 7 + col * 3) % 21) as u32;
        for row in 0..4 {
            for col in 0..4 {
                if col + 1 < 4 {
                    let v = speed(row, col);
                    g.add_edge(at(row, col), at(row, col + 1), v, 10).unwrap();
                    g.add_edge(at(row, col + 1), at(row, col), v, 10).unwrap();
                }
                if row + 1 < 4 {
                    let v = speed(row, col);
                    g.add_edge(at(row, col), at(row + 1, col), v, 10).unwrap();
                    g.add_edge(at(row + 1, col), at(row, col), v, 10).unwrap();
                }
            }
        }

        let corners = [at(0, 0), at(0, 3), at(3, 0), at(3, 3)];
        for &s in &corners {
            for &t in &corners {
                if s == t {
                    continue;
                }
                let d_path = Dijkstra.compute_route(&g, s, t, &free_flow);
                let a_path = AStar.compute_route(&g, s, t, &free_flow);
                assert!(!d_path.is_empty() && !a_path.is_empty());
                let d = path_cost(&g, &d_path, free_flow);
                let a = path_cost(&g, &a_path, free_flow);
                assert!((d - a).abs() < 1e-9, "{s} -> {t}: {d} vs {a}");
            }
        }
    }

    #[test]
    fn congested_weights_shift_the_route() {
        // Make the fast corridor artificially expensive through the time
        // function alone; the planners must pick the other one.
        let (g, [s, m1, m2, t]) = two_corridors();
        let congested = |road: &mt_net::Road| {
            let base = free_flow(road);
            if road.from() == s && road.to() == m1 {
                base * 100.0
            } else {
                base
            }
        };
        for strat in [&Dijkstra as &dyn RouteStrategy, &AStar] {
            let path = strat.compute_route(&g, s, t, &congested);
            assert_eq!(path, vec![s, m2, t]);
        }
    }
}

// ── Heuristic bound ───────────────────────────────────────────────────────────

#[cfg(test)]
mod heuristic {
    use super::helpers::{free_flow, square};
    use crate::vmax_upper_bound;

    #[test]
    fn vmax_is_the_fastest_edge() {
        let (g, _) = square();
        // Every edge runs at 10 length-units/s under free flow.
        let vmax = vmax_upper_bound(&g, &free_flow);
        assert!((vmax - 10.0).abs() < 1e-9);
    }

    #[test]
    fn vmax_picks_the_maximum_over_edges() {
        let mut g = mt_net::RoadGraph::new();
        let a = g.add_node(0, 0);
        let b = g.add_node(100, 0);
        let c = g.add_node(200, 0);
        g.add_edge(a, b, 10, 0).unwrap();
        g.add_edge(b, c, 40, 0).unwrap();
        let vmax = vmax_upper_bound(&g, &free_flow);
        assert!((vmax - 40.0).abs() < 1e-9);
    }

    #[test]
    #[should_panic]
    fn zero_time_on_positive_length_edge_is_fatal() {
        let (g, _) = square();
        let _ = vmax_upper_bound(&g, &|_| 0.0);
    }

    #[test]
    #[should_panic]
    fn non_finite_time_is_fatal() {
        let (g, _) = square();
        let _ = vmax_upper_bound(&g, &|_| f64::NAN);
    }
}
