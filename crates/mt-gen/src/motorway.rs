//! Motorway corridor generator.
//!
//! Picks the farthest pair of intersections, collects every node within a
//! band around the connecting segment, orders them by their projection onto
//! it, simplifies the resulting polyline with Ramer–Douglas–Peucker, and
//! connects the survivors with bidirectional high-speed roads.

use mt_core::Point;
use mt_net::RoadGraph;

use crate::RoadGenerator;

/// One high-capacity corridor across the widest span of the node set.
pub struct MotorwayGenerator {
    threshold_ratio: f64,
    speed: u32,
    capacity: u32,
}

impl MotorwayGenerator {
    pub fn new(threshold_ratio: f64, speed: u32, capacity: u32) -> Self {
        Self {
            threshold_ratio,
            speed,
            capacity,
        }
    }
}

impl RoadGenerator for MotorwayGenerator {
    fn generate(&self, graph: &mut RoadGraph) {
        let nodes: Vec<(mt_core::NodeId, Point)> =
            graph.nodes().iter().map(|n| (n.id(), n.pos())).collect();
        let n = nodes.len();
        if n < 2 {
            return;
        }

        // Farthest pair spans the corridor.
        let (mut i0, mut i1, mut max_d) = (0usize, 1usize, 0.0_f64);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = nodes[i].1.distance(nodes[j].1);
                if d > max_d {
                    max_d = d;
                    i0 = i;
                    i1 = j;
                }
            }
        }
        let a = nodes[i0].1;
        let b = nodes[i1].1;
        let threshold = max_d * self.threshold_ratio;

        // Collect in-band nodes with their projection parameter, endpoints
        // pinned at t = 0 and t = 1.
        let mut seq: Vec<(f64, usize)> = vec![(0.0, i0)];
        for (k, &(_, p)) in nodes.iter().enumerate() {
            if k == i0 || k == i1 {
                continue;
            }
            if point_to_segment(p, a, b) <= threshold {
                seq.push((projection_parameter(p, a, b), k));
            }
        }
        seq.push((1.0, i1));
        seq.sort_by(|x, y| x.0.total_cmp(&y.0));

        let raw: Vec<(mt_core::NodeId, Point)> = seq.iter().map(|&(_, k)| nodes[k]).collect();
        let mut smooth = Vec::new();
        simplify_rdp(&raw, threshold * 0.5, &mut smooth);

        for pair in smooth.windows(2) {
            let (p, q) = (pair[0].0, pair[1].0);
            let _ = graph.add_edge_guarded(p, q, self.speed, self.capacity);
            let _ = graph.add_edge_guarded(q, p, self.speed, self.capacity);
        }
    }
}

// ── Segment projection helpers ────────────────────────────────────────────────

/// Parameter `t` of the projection of `p` onto segment `ab`, clamped to
/// `[0, 1]`.
fn projection_parameter(p: Point, a: Point, b: Point) -> f64 {
    let dx = f64::from(b.x - a.x);
    let dy = f64::from(b.y - a.y);
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return 0.0;
    }
    let t = (f64::from(p.x - a.x) * dx + f64::from(p.y - a.y) * dy) / len2;
    t.clamp(0.0, 1.0)
}

/// Distance from `p` to the closest point of segment `ab`.
fn point_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let t = projection_parameter(p, a, b);
    let px = f64::from(a.x) + t * f64::from(b.x - a.x);
    let py = f64::from(a.y) + t * f64::from(b.y - a.y);
    (f64::from(p.x) - px).hypot(f64::from(p.y) - py)
}

// ── Ramer–Douglas–Peucker ─────────────────────────────────────────────────────

/// Recursive polyline simplification: keeps the point farthest from the
/// chord while it deviates more than `eps`.
fn simplify_rdp<T: Copy>(pts: &[(T, Point)], eps: f64, out: &mut Vec<(T, Point)>) {
    if pts.len() < 3 {
        out.extend_from_slice(pts);
        return;
    }

    let first = pts[0].1;
    let last = pts[pts.len() - 1].1;
    let (mut max_dist, mut idx) = (0.0_f64, 0usize);
    for (i, &(_, p)) in pts.iter().enumerate().take(pts.len() - 1).skip(1) {
        let d = point_to_segment(p, first, last);
        if d > max_dist {
            max_dist = d;
            idx = i;
        }
    }

    if max_dist > eps {
        let mut left = Vec::new();
        let mut right = Vec::new();
        simplify_rdp(&pts[..=idx], eps, &mut left);
        simplify_rdp(&pts[idx..], eps, &mut right);
        // Merge, dropping the duplicated join point.
        out.extend_from_slice(&left[..left.len() - 1]);
        out.extend_from_slice(&right);
    } else {
        out.push(pts[0]);
        out.push(pts[pts.len() - 1]);
    }
}
