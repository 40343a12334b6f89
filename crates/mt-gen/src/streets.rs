//! Local street generator: k-nearest-neighbor links.

use mt_net::RoadGraph;

use crate::RoadGenerator;

/// Links every intersection to its `k` nearest neighbors with bidirectional
/// low-speed streets, subject to the planar guard.
pub struct StreetGenerator {
    k: usize,
    speed: u32,
    capacity: u32,
}

impl StreetGenerator {
    pub fn new(k: usize, speed: u32, capacity: u32) -> Self {
        Self { k, speed, capacity }
    }
}

impl RoadGenerator for StreetGenerator {
    fn generate(&self, graph: &mut RoadGraph) {
        let nodes: Vec<(mt_core::NodeId, mt_core::Point)> =
            graph.nodes().iter().map(|n| (n.id(), n.pos())).collect();
        let n = nodes.len();
        if n < 2 || self.k == 0 {
            return;
        }

        for i in 0..n {
            let mut dists: Vec<(f64, usize)> = (0..n)
                .filter(|&j| j != i)
                .map(|j| (nodes[i].1.distance(nodes[j].1), j))
                .collect();

            let m = self.k.min(dists.len());
            // Partial selection: only the m nearest need ordering.
            if m < dists.len() {
                dists.select_nth_unstable_by(m, |a, b| a.0.total_cmp(&b.0));
            }

            for &(_, j) in &dists[..m] {
                let (a, b) = (nodes[i].0, nodes[j].0);
                let _ = graph.add_edge_guarded(a, b, self.speed, self.capacity);
                let _ = graph.add_edge_guarded(b, a, self.speed, self.capacity);
            }
        }
    }
}
