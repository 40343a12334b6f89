//! Highway backbone generator: Kruskal's MST under the planar guard.

use mt_net::{EdgeInsert, RoadGraph};

use crate::RoadGenerator;

/// Connects the whole node set with a minimum-spanning-tree backbone.
///
/// Candidate pairs are processed in ascending distance order; a pair whose
/// guarded insertion is crossing-rejected is skipped *without* uniting its
/// components, so a longer non-crossing edge can connect them later.
pub struct HighwayGenerator {
    speed: u32,
    capacity: u32,
}

impl HighwayGenerator {
    pub fn new(speed: u32, capacity: u32) -> Self {
        Self { speed, capacity }
    }
}

impl RoadGenerator for HighwayGenerator {
    fn generate(&self, graph: &mut RoadGraph) {
        let nodes: Vec<(mt_core::NodeId, mt_core::Point)> =
            graph.nodes().iter().map(|n| (n.id(), n.pos())).collect();
        let n = nodes.len();
        if n < 2 {
            return;
        }

        struct Candidate {
            u: usize,
            v: usize,
            dist: f64,
        }
        let mut all = Vec::with_capacity(n * (n - 1) / 2);
        for u in 0..n {
            for v in (u + 1)..n {
                all.push(Candidate {
                    u,
                    v,
                    dist: nodes[u].1.distance(nodes[v].1),
                });
            }
        }
        all.sort_by(|a, b| a.dist.total_cmp(&b.dist));

        let mut forest = DisjointSet::new(n);
        for c in &all {
            if forest.find(c.u) == forest.find(c.v) {
                continue;
            }
            let (a, b) = (nodes[c.u].0, nodes[c.v].0);
            let r1 = graph.add_edge_guarded(a, b, self.speed, self.capacity);
            let r2 = graph.add_edge_guarded(b, a, self.speed, self.capacity);

            // Only unite when both directions landed (inserted or already
            // present); a crossing-rejected pair stays split for now.
            let landed = |r: &mt_net::NetResult<EdgeInsert>| {
                matches!(
                    r,
                    Ok(EdgeInsert::Inserted(_)) | Ok(EdgeInsert::DuplicateRejected)
                )
            };
            if landed(&r1) && landed(&r2) {
                forest.unite(c.u, c.v);
            }
        }
    }
}

// ── Disjoint-set forest ───────────────────────────────────────────────────────

struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            let root = self.find(self.parent[x]);
            self.parent[x] = root;
        }
        self.parent[x]
    }

    fn unite(&mut self, a: usize, b: usize) -> bool {
        let (mut a, mut b) = (self.find(a), self.find(b));
        if a == b {
            return false;
        }
        if self.rank[a] < self.rank[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        if self.rank[a] == self.rank[b] {
            self.rank[a] += 1;
        }
        true
    }
}
