//! All-pairs routing table.
//!
//! One Dijkstra run per source vertex fills one row of the table. Each
//! entry keeps the best total weight and the last edge of the path that
//! achieved it, so any path can be rebuilt by following last edges back
//! to the row's source.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use tracing::{debug, info};

use super::graph::{DirectedWeightedGraph, EdgeId, VertexId};

/// Best known way to reach a target from a source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteEntry {
    /// Total weight of the path, in minutes.
    pub weight: f64,
    /// Last edge on the path; `None` only for the zero-length self path.
    pub prev_edge: Option<EdgeId>,
}

/// A path rebuilt from the table.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInfo {
    pub weight: f64,
    /// Edges in travel order.
    pub edges: Vec<EdgeId>,
}

/// Precomputed shortest paths between every ordered pair of vertices.
///
/// Read-only once built. Rows are keyed by source vertex and every
/// predecessor chain in a row ends at that row's source.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingTable {
    vertex_count: usize,
    /// Row-major `(source, target)` entries; `None` when unreachable.
    entries: Vec<Option<RouteEntry>>,
}

impl RoutingTable {
    /// Compute the table for `graph`.
    ///
    /// Runs one single-source search per vertex; cost is
    /// `O(V * E log V)` time and `O(V²)` memory.
    pub fn compute(graph: &DirectedWeightedGraph) -> Self {
        let vertex_count = graph.vertex_count();
        let mut entries = vec![None; vertex_count * vertex_count];

        for (source, row) in entries.chunks_mut(vertex_count.max(1)).enumerate() {
            let reached = fill_row(graph, source, row);
            debug!(source, reached, "Routing row computed");
        }

        let table = Self {
            vertex_count,
            entries,
        };
        info!(
            vertices = vertex_count,
            reachable_pairs = table.reachable_pairs(),
            "Routing table computed"
        );
        table
    }

    /// Rebuild a table from row-major entries.
    ///
    /// Returns `None` if the entry count is not `vertex_count²`.
    pub(crate) fn from_entries(
        vertex_count: usize,
        entries: Vec<Option<RouteEntry>>,
    ) -> Option<Self> {
        if vertex_count.checked_mul(vertex_count)? != entries.len() {
            return None;
        }
        Some(Self {
            vertex_count,
            entries,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Entry for a `(from, to)` pair; `None` if unreachable or out of range.
    pub fn entry(&self, from: VertexId, to: VertexId) -> Option<&RouteEntry> {
        if from >= self.vertex_count || to >= self.vertex_count {
            return None;
        }
        self.entries[from * self.vertex_count + to].as_ref()
    }

    /// All entries in row-major `(source, target)` order.
    pub fn entries(&self) -> &[Option<RouteEntry>] {
        &self.entries
    }

    /// Number of `(source, target)` pairs with a path, self pairs included.
    pub fn reachable_pairs(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Rebuild the best path from `from` to `to`.
    ///
    /// Walks last edges backwards within the `from` row. Returns `None`
    /// when `to` is unreachable, or when the chain does not lead back to
    /// `from` within `vertex_count` steps (only possible for a damaged
    /// table).
    pub fn build_route(
        &self,
        graph: &DirectedWeightedGraph,
        from: VertexId,
        to: VertexId,
    ) -> Option<RouteInfo> {
        let target = self.entry(from, to)?;
        let mut edges = Vec::new();
        let mut prev_edge = target.prev_edge;

        while let Some(edge_id) = prev_edge {
            if edges.len() >= self.vertex_count {
                debug!(from, to, "Predecessor chain does not terminate");
                return None;
            }
            edges.push(edge_id);
            let edge = graph.edge(edge_id)?;
            prev_edge = self.entry(from, edge.from)?.prev_edge;
        }

        edges.reverse();
        Some(RouteInfo {
            weight: target.weight,
            edges,
        })
    }
}

/// Run Dijkstra from `source`, writing the result into `row`.
///
/// Only a strictly shorter path replaces a known one, so among paths of
/// equal weight the first discovered wins. Returns the number of reached
/// vertices.
fn fill_row(
    graph: &DirectedWeightedGraph,
    source: VertexId,
    row: &mut [Option<RouteEntry>],
) -> usize {
    let mut settled = vec![false; row.len()];
    let mut frontier = BinaryHeap::new();
    let mut reached = 1;

    row[source] = Some(RouteEntry {
        weight: 0.0,
        prev_edge: None,
    });
    frontier.push(Reverse((OrderedFloat(0.0), source)));

    while let Some(Reverse((OrderedFloat(weight), vertex))) = frontier.pop() {
        if settled[vertex] {
            continue;
        }
        settled[vertex] = true;

        for &edge_id in graph.outgoing(vertex) {
            let Some(edge) = graph.edge(edge_id) else {
                continue;
            };
            let candidate = weight + edge.weight;

            let improves = match &row[edge.to] {
                Some(known) => candidate < known.weight,
                None => true,
            };
            if !improves || settled[edge.to] {
                continue;
            }

            if row[edge.to].is_none() {
                reached += 1;
            }
            row[edge.to] = Some(RouteEntry {
                weight: candidate,
                prev_edge: Some(edge_id),
            });
            frontier.push(Reverse((OrderedFloat(candidate), edge.to)));
        }
    }

    reached
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::graph::Edge;

    fn graph(vertex_count: usize, edges: &[(VertexId, VertexId, f64)]) -> DirectedWeightedGraph {
        let mut g = DirectedWeightedGraph::new(vertex_count);
        for &(from, to, weight) in edges {
            g.add_edge(Edge { from, to, weight });
        }
        g
    }

    #[test]
    fn self_pairs_are_zero_without_edge() {
        let g = graph(3, &[(0, 1, 1.0)]);
        let table = RoutingTable::compute(&g);
        for v in 0..3 {
            assert_eq!(
                table.entry(v, v),
                Some(&RouteEntry {
                    weight: 0.0,
                    prev_edge: None
                })
            );
        }
    }

    #[test]
    fn unreachable_pairs_are_none() {
        let g = graph(3, &[(0, 1, 1.0)]);
        let table = RoutingTable::compute(&g);
        assert!(table.entry(1, 0).is_none());
        assert!(table.entry(0, 2).is_none());
        assert_eq!(table.reachable_pairs(), 4);
    }

    #[test]
    fn table_has_vertex_count_squared_entries() {
        let g = graph(4, &[(0, 1, 1.0), (1, 2, 1.0)]);
        let table = RoutingTable::compute(&g);
        assert_eq!(table.entries().len(), 16);
    }

    #[test]
    fn picks_cheaper_multi_hop_path() {
        // 0 -> 2 directly costs 10, via 1 costs 3
        let g = graph(3, &[(0, 2, 10.0), (0, 1, 1.0), (1, 2, 2.0)]);
        let table = RoutingTable::compute(&g);

        let entry = table.entry(0, 2).unwrap();
        assert_eq!(entry.weight, 3.0);
        assert_eq!(entry.prev_edge, Some(2));

        let route = table.build_route(&g, 0, 2).unwrap();
        assert_eq!(route.edges, vec![1, 2]);
        assert_eq!(route.weight, 3.0);
    }

    #[test]
    fn equal_weight_keeps_first_discovered() {
        // Both 0 -> 1 -> 3 and 0 -> 2 -> 3 cost 2; vertex 1 settles first
        let g = graph(
            4,
            &[(0, 1, 1.0), (0, 2, 1.0), (1, 3, 1.0), (2, 3, 1.0)],
        );
        let table = RoutingTable::compute(&g);
        assert_eq!(table.entry(0, 3).unwrap().prev_edge, Some(2));
    }

    #[test]
    fn parallel_edges_keep_the_lighter() {
        let g = graph(2, &[(0, 1, 5.0), (0, 1, 4.0), (0, 1, 4.0)]);
        let table = RoutingTable::compute(&g);
        assert_eq!(table.entry(0, 1).unwrap().prev_edge, Some(1));
    }

    #[test]
    fn zero_weight_cycle_does_not_loop() {
        let g = graph(2, &[(0, 1, 0.0), (1, 0, 0.0)]);
        let table = RoutingTable::compute(&g);
        let route = table.build_route(&g, 0, 1).unwrap();
        assert_eq!(route.edges, vec![0]);
        assert_eq!(table.build_route(&g, 0, 0).unwrap().edges, Vec::<EdgeId>::new());
    }

    #[test]
    fn out_of_range_lookup_is_none() {
        let g = graph(2, &[(0, 1, 1.0)]);
        let table = RoutingTable::compute(&g);
        assert!(table.entry(0, 5).is_none());
        assert!(table.build_route(&g, 7, 0).is_none());
    }

    #[test]
    fn empty_graph() {
        let g = DirectedWeightedGraph::new(0);
        let table = RoutingTable::compute(&g);
        assert_eq!(table.vertex_count(), 0);
        assert!(table.entries().is_empty());
    }

    #[test]
    fn damaged_chain_is_rejected() {
        let g = graph(3, &[(1, 2, 1.0), (2, 1, 1.0)]);
        // Row 0 claims 1 and 2 reach each other in a loop that never hits 0
        let mut entries = vec![None; 9];
        entries[0] = Some(RouteEntry { weight: 0.0, prev_edge: None });
        entries[1] = Some(RouteEntry { weight: 1.0, prev_edge: Some(1) });
        entries[2] = Some(RouteEntry { weight: 1.0, prev_edge: Some(0) });
        let table = RoutingTable::from_entries(3, entries).unwrap();
        assert!(table.build_route(&g, 0, 2).is_none());
    }

    #[test]
    fn from_entries_checks_size() {
        assert!(RoutingTable::from_entries(2, vec![None; 3]).is_none());
        assert!(RoutingTable::from_entries(2, vec![None; 4]).is_some());
    }
}
