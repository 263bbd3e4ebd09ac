//! Append-only directed weighted graph.
//!
//! Vertices and edges are identified purely by position. Nothing here
//! holds a reference into another structure, so a graph rebuilt from the
//! same edge list in the same order is indistinguishable from the original.

use crate::domain::StopIndex;

/// Dense vertex identifier.
pub type VertexId = usize;

/// Dense edge identifier, assigned in insertion order.
pub type EdgeId = usize;

/// The two states a passenger can be in at a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexRole {
    /// Standing at the stop, about to wait for a bus.
    Wait,
    /// Done waiting, ready to board.
    Board,
}

/// Vertex id of a stop in a given role.
///
/// Stop `i` owns vertices `2i` (wait) and `2i + 1` (board).
pub fn vertex_of(stop: StopIndex, role: VertexRole) -> VertexId {
    match role {
        VertexRole::Wait => stop.0 * 2,
        VertexRole::Board => stop.0 * 2 + 1,
    }
}

/// Inverse of [`vertex_of`].
pub fn stop_of(vertex: VertexId) -> (StopIndex, VertexRole) {
    let role = if vertex % 2 == 0 {
        VertexRole::Wait
    } else {
        VertexRole::Board
    };
    (StopIndex(vertex / 2), role)
}

/// A weighted directed edge. Weight is travel time in minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: f64,
}

/// Directed graph with a fixed vertex count and append-only edges.
#[derive(Debug, Clone, Default)]
pub struct DirectedWeightedGraph {
    edges: Vec<Edge>,
    /// Outgoing edge ids per vertex, in insertion order.
    incidence: Vec<Vec<EdgeId>>,
}

impl DirectedWeightedGraph {
    /// Create a graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            incidence: vec![Vec::new(); vertex_count],
        }
    }

    /// Append an edge and return its id.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is not a vertex of this graph. Callers
    /// loading untrusted data validate endpoints first.
    pub fn add_edge(&mut self, edge: Edge) -> EdgeId {
        assert!(
            edge.from < self.vertex_count() && edge.to < self.vertex_count(),
            "edge {} -> {} out of range for {} vertices",
            edge.from,
            edge.to,
            self.vertex_count()
        );

        let id = self.edges.len();
        self.edges.push(edge);
        self.incidence[edge.from].push(id);
        id
    }

    pub fn vertex_count(&self) -> usize {
        self.incidence.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Look up an edge by id.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// All edges in id order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Ids of edges leaving `vertex`, in insertion order.
    pub fn outgoing(&self, vertex: VertexId) -> &[EdgeId] {
        self.incidence
            .get(vertex)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}
