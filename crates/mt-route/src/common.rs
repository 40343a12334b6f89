//! Shared machinery for the routing strategies.

use std::cmp::Ordering;

use mt_core::NodeId;
use mt_net::{Road, RoadGraph};

/// Sentinel for "no parent" in the reconstruction arrays.
pub(crate) const NO_PARENT: usize = usize::MAX;

/// Validate an edge time against the routing contract.  Aborts on violation
/// in every build profile.
#[inline]
pub(crate) fn checked_time(t: f64) -> f64 {
    assert!(
        t.is_finite() && t >= 0.0,
        "edge-time function returned an invalid cost: {t}"
    );
    t
}

// ── Heap entry ────────────────────────────────────────────────────────────────

/// Priority-queue entry ordered by cost, then node index for deterministic
/// tie-breaking.  Wrapped in `Reverse` to turn `BinaryHeap` into a min-heap.
#[derive(Copy, Clone, PartialEq)]
pub(crate) struct QueueEntry {
    pub cost: f64,
    pub node: usize,
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ── Path reconstruction ───────────────────────────────────────────────────────

/// Rebuild a path of node ids from a parent-index array.
///
/// Returns `[start]` when `start_idx == goal_idx`, the empty vector when the
/// goal was never reached, and otherwise the id sequence from start to goal.
/// A reconstructed path that does not begin at `start_idx` is discarded.
pub(crate) fn rebuild_path(
    start_idx: usize,
    goal_idx: usize,
    parent: &[usize],
    graph: &RoadGraph,
) -> Vec<NodeId> {
    if start_idx == goal_idx {
        return vec![graph.node(start_idx).id()];
    }
    if goal_idx >= parent.len() || parent[goal_idx] == NO_PARENT {
        return Vec::new();
    }

    let mut ids = Vec::new();
    let mut cur = goal_idx;
    loop {
        ids.push(graph.node(cur).id());
        if parent[cur] == NO_PARENT {
            break;
        }
        cur = parent[cur];
    }
    ids.reverse();

    if cur != start_idx {
        ids.clear();
    }
    ids
}

// ── Optimistic speed bound ────────────────────────────────────────────────────

/// Upper bound on any edge's effective speed under `time_fn`:
/// `max over edges of length / time_fn(edge)`.
///
/// Dividing a Euclidean remaining distance by this bound underestimates the
/// remaining travel time, which makes the A* heuristic admissible.
///
/// # Panics
///
/// Aborts when `time_fn` violates its contract (non-finite or negative time,
/// or zero time on a positive-length edge) and when the graph contains no
/// positive-length edge at all.
pub fn vmax_upper_bound(graph: &RoadGraph, time_fn: &dyn Fn(&Road) -> f64) -> f64 {
    let mut vmax = 0.0_f64;
    for e in graph.edges() {
        let len = e.length();
        let t = checked_time(time_fn(e));
        if len > 0.0 {
            assert!(
                t > 0.0,
                "positive-length edge {} -> {} has zero travel time",
                e.from(),
                e.to()
            );
            vmax = vmax.max(len / t);
        }
    }
    assert!(
        vmax > 0.0 && vmax.is_finite(),
        "no positive effective speed found in the graph"
    );
    vmax
}
