//! Road network representation with incremental construction guards.
//!
//! # Data layout
//!
//! Nodes and edges live in ordered `Vec`s.  A `HashMap<NodeId, usize>` maps
//! ids to node positions (ids are graph-assigned and monotonic, but never
//! assumed to be indices), and a per-node adjacency list maps each node
//! index to its outgoing `(neighbor_index, EdgeId)` pairs.  The adjacency
//! list is updated on every insertion, so routing never scans the full edge
//! array.
//!
//! # Construction guards
//!
//! Network generators build a *readable* map: [`RoadGraph::add_edge_guarded`]
//! rejects exact duplicates and any edge whose segment properly intersects or
//! collinearly overlaps an existing edge (shared endpoints excluded).  The
//! guard exists for construction only; the simulation core never relies on
//! planarity at runtime.

use std::collections::HashMap;

use mt_core::{segments_cross, EdgeId, NodeId, Point};

use crate::error::{NetError, NetResult};

// ── Intersection ──────────────────────────────────────────────────────────────

/// A node of the road network: an id plus an integer world position.
///
/// Intersections are created by the owning [`RoadGraph`], which assigns ids
/// monotonically.  Equality is by id.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intersection {
    id: NodeId,
    pos: Point,
}

impl Intersection {
    pub(crate) fn new(id: NodeId, pos: Point) -> Self {
        Self { id, pos }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.pos.y
    }
}

impl PartialEq for Intersection {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Intersection {}

// ── Road ──────────────────────────────────────────────────────────────────────

/// A directed road between two intersections.
///
/// The length is the Euclidean distance between the endpoints, cached at
/// construction and immutable afterwards.  `capacity == 0` means the road
/// does not specify one; the congestion model substitutes its default.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Road {
    from: NodeId,
    to: NodeId,
    length: f64,
    max_speed: u32,
    capacity: u32,
}

impl Road {
    #[inline]
    pub fn from(&self) -> NodeId {
        self.from
    }

    #[inline]
    pub fn to(&self) -> NodeId {
        self.to
    }

    /// Cached Euclidean length.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Free-flow speed limit in model units.
    #[inline]
    pub fn max_speed(&self) -> u32 {
        self.max_speed
    }

    /// Comfortable vehicle capacity; 0 when unspecified.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}

// ── Guarded insertion outcome ─────────────────────────────────────────────────

/// Outcome of [`RoadGraph::add_edge_guarded`].  Rejections are ordinary
/// values, not errors: generators probe freely and skip rejected edges.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EdgeInsert {
    /// The edge was inserted.
    Inserted(EdgeId),
    /// An edge with the same (from, to) already exists.
    DuplicateRejected,
    /// The segment would cross or overlap an existing edge.
    CrossingRejected,
}

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Directed, id-addressable road network.
#[derive(Clone, Debug, Default)]
pub struct RoadGraph {
    nodes: Vec<Intersection>,
    edges: Vec<Road>,
    id_to_index: HashMap<NodeId, usize>,
    /// Outgoing adjacency: node index → (neighbor index, edge id).
    adjacency: Vec<Vec<(usize, EdgeId)>>,
    next_node_id: u32,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Node construction ─────────────────────────────────────────────────

    /// Add an intersection at `(x, y)` and return its graph-assigned id.
    pub fn add_node(&mut self, x: i32, y: i32) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        self.push_node(Intersection::new(id, Point::new(x, y)));
        id
    }

    /// Insert a pre-built intersection, e.g. when merging a subnetwork.
    ///
    /// Fails with [`NetError::DuplicateNode`] if the id is already present.
    /// The internal id counter is advanced past the inserted id so later
    /// [`add_node`](Self::add_node) calls cannot collide.
    pub fn insert_node(&mut self, node: Intersection) -> NetResult<()> {
        if self.id_to_index.contains_key(&node.id()) {
            return Err(NetError::DuplicateNode(node.id()));
        }
        self.next_node_id = self.next_node_id.max(node.id().0.saturating_add(1));
        self.push_node(node);
        Ok(())
    }

    fn push_node(&mut self, node: Intersection) {
        self.id_to_index.insert(node.id(), self.nodes.len());
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
    }

    // ── Edge construction ─────────────────────────────────────────────────

    /// Append a directed road without duplicate or crossing checks.
    ///
    /// Structural invariants still hold: both endpoints must exist and
    /// self-loops are rejected.  The length is computed from the endpoint
    /// positions at insertion.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        max_speed: u32,
        capacity: u32,
    ) -> NetResult<EdgeId> {
        let (from_idx, to_idx) = self.endpoint_indices(from, to)?;
        Ok(self.push_edge(from, to, from_idx, to_idx, max_speed, capacity))
    }

    /// Attempt to add a directed road, rejecting duplicates and planar
    /// crossings.
    ///
    /// * Duplicate: an edge with the same (from, to) ids already exists.
    /// * Crossing: the segment properly intersects or collinearly overlaps
    ///   any existing edge's segment.  Segments that merely share an
    ///   endpoint do not count.
    pub fn add_edge_guarded(
        &mut self,
        from: NodeId,
        to: NodeId,
        max_speed: u32,
        capacity: u32,
    ) -> NetResult<EdgeInsert> {
        let (from_idx, to_idx) = self.endpoint_indices(from, to)?;

        if self.adjacency[from_idx].iter().any(|&(n, _)| n == to_idx) {
            return Ok(EdgeInsert::DuplicateRejected);
        }

        let p1 = self.nodes[from_idx].pos();
        let p2 = self.nodes[to_idx].pos();
        let crosses = self.edges.iter().any(|e| {
            let q1 = self.nodes[self.id_to_index[&e.from()]].pos();
            let q2 = self.nodes[self.id_to_index[&e.to()]].pos();
            segments_cross(p1, p2, q1, q2)
        });
        if crosses {
            return Ok(EdgeInsert::CrossingRejected);
        }

        let id = self.push_edge(from, to, from_idx, to_idx, max_speed, capacity);
        Ok(EdgeInsert::Inserted(id))
    }

    fn endpoint_indices(&self, from: NodeId, to: NodeId) -> NetResult<(usize, usize)> {
        if from == to {
            return Err(NetError::SelfLoop(from));
        }
        let from_idx = self.index_of(from).ok_or(NetError::NodeNotFound(from))?;
        let to_idx = self.index_of(to).ok_or(NetError::NodeNotFound(to))?;
        Ok((from_idx, to_idx))
    }

    fn push_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        from_idx: usize,
        to_idx: usize,
        max_speed: u32,
        capacity: u32,
    ) -> EdgeId {
        let length = self.nodes[from_idx].pos().distance(self.nodes[to_idx].pos());
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Road {
            from,
            to,
            length,
            max_speed,
            capacity,
        });
        self.adjacency[from_idx].push((to_idx, id));
        id
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    /// Node-array index for `id`, if present.
    #[inline]
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.id_to_index.get(&id).copied()
    }

    /// World position of the node with `id`, if present.
    #[inline]
    pub fn position_of(&self, id: NodeId) -> Option<Point> {
        self.index_of(id).map(|i| self.nodes[i].pos())
    }

    /// Outgoing `(neighbor_index, EdgeId)` pairs of the node at `index`.
    #[inline]
    pub fn outgoing(&self, index: usize) -> &[(usize, EdgeId)] {
        &self.adjacency[index]
    }

    #[inline]
    pub fn node(&self, index: usize) -> &Intersection {
        &self.nodes[index]
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Road {
        &self.edges[id.index()]
    }

    /// Resolve the directed road `from → to` through the adjacency list.
    pub fn find_edge(&self, from: NodeId, to: NodeId) -> Option<&Road> {
        let from_idx = self.index_of(from)?;
        let to_idx = self.index_of(to)?;
        self.adjacency[from_idx]
            .iter()
            .find(|&&(n, _)| n == to_idx)
            .map(|&(_, e)| self.edge(e))
    }

    #[inline]
    pub fn nodes(&self) -> &[Intersection] {
        &self.nodes
    }

    #[inline]
    pub fn edges(&self) -> &[Road] {
        &self.edges
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
