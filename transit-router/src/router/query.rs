//! Itinerary queries over a precomputed routing table.

use tracing::debug;

use super::builder::{BuildError, GraphBuilder, ItemKind, RouteGraph};
use super::config::RoutingSettings;
use super::table::RoutingTable;
use crate::catalogue::CatalogueFacts;

/// One step of an itinerary.
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryLeg {
    pub kind: ItemKind,
    /// Stop name for a wait, bus name for a ride.
    pub name: String,
    /// Stops covered by a ride; zero for a wait.
    pub span_count: u32,
    /// Minutes spent on this step.
    pub duration: f64,
}

/// Fastest way from one stop to another.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub legs: Vec<ItineraryLeg>,
    /// Sum of leg durations, in minutes.
    pub total_time: f64,
}

/// Route graph paired with its routing table.
///
/// Built once, either from catalogue facts or from a persisted base, and
/// only read afterwards.
#[derive(Debug, Clone)]
pub struct TransportRouter {
    graph: RouteGraph,
    table: RoutingTable,
}

impl TransportRouter {
    /// Build the graph and compute the full routing table.
    pub fn build<C: CatalogueFacts>(
        facts: &C,
        settings: &RoutingSettings,
    ) -> Result<Self, BuildError> {
        let graph = GraphBuilder::new(facts, settings).build()?;
        let table = RoutingTable::compute(graph.graph());
        Ok(Self { graph, table })
    }

    /// Pair a graph with a table computed for it earlier.
    ///
    /// Callers must ensure the table was computed for this exact graph.
    pub(crate) fn from_parts(graph: RouteGraph, table: RoutingTable) -> Self {
        debug_assert_eq!(graph.graph().vertex_count(), table.vertex_count());
        Self { graph, table }
    }

    pub fn route_graph(&self) -> &RouteGraph {
        &self.graph
    }

    pub fn table(&self) -> &RoutingTable {
        &self.table
    }

    /// Fastest itinerary from stop `from` to stop `to`.
    ///
    /// Itineraries start and end waiting at a stop. Returns `None` when
    /// either name is unknown or `to` cannot be reached.
    pub fn find_route(&self, from: &str, to: &str) -> Option<Itinerary> {
        let (Some(source), Some(target)) = (self.graph.wait_vertex(from), self.graph.wait_vertex(to))
        else {
            debug!(from, to, "Route query names an unknown stop");
            return None;
        };

        let route = self.table.build_route(self.graph.graph(), source, target)?;

        let mut legs = Vec::with_capacity(route.edges.len());
        for edge_id in route.edges {
            let edge = self.graph.graph().edge(edge_id)?;
            let item = self.graph.item(edge_id)?;
            legs.push(ItineraryLeg {
                kind: item.kind,
                name: item.name.clone(),
                span_count: item.span_count,
                duration: edge.weight,
            });
        }

        let total_time = legs.iter().fold(0.0, |acc, leg| acc + leg.duration);
        Some(Itinerary { legs, total_time })
    }
}
