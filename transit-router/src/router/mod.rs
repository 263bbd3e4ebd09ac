//! Route graph construction, shortest-path precomputation and itinerary
//! queries.
//!
//! The router answers "fastest way from stop A to stop B" in two phases.
//! The build phase turns the network into a graph with a wait vertex and
//! a board vertex per stop, then runs Dijkstra from every vertex to fill
//! an all-pairs routing table. The query phase only reads that table,
//! walking predecessor edges back from the target.

mod builder;
mod config;
mod graph;
mod query;
mod table;

#[cfg(test)]
pub(crate) mod testing;

pub use builder::{BuildError, GraphBuilder, Item, ItemKind, RouteGraph};
pub use config::RoutingSettings;
pub use graph::{DirectedWeightedGraph, Edge, EdgeId, VertexId, VertexRole, stop_of, vertex_of};
pub use query::{Itinerary, ItineraryLeg, TransportRouter};
pub use table::{RouteEntry, RouteInfo, RoutingTable};
