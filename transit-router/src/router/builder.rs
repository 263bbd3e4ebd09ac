//! Route graph construction.
//!
//! Every stop contributes a wait vertex and a board vertex joined by a
//! wait edge. Every bus run contributes one ride edge from each stop's
//! board vertex to the wait vertex of every later stop on the run, so a
//! single edge stands for "stay on this bus for N stops".

use std::collections::HashMap;

use tracing::info;

use super::config::RoutingSettings;
use super::graph::{DirectedWeightedGraph, Edge, EdgeId, VertexId, VertexRole, vertex_of};
use crate::catalogue::CatalogueFacts;
use crate::domain::StopIndex;

/// Error building a route graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// Two consecutive stops on a bus run have no road distance
    #[error("no road distance between {from} and {to} on bus {bus}")]
    MissingDistance {
        bus: String,
        from: String,
        to: String,
    },

    /// A bus run refers to a stop index the catalogue does not have
    #[error("bus {bus} refers to unknown stop {stop}")]
    UnknownStop { bus: String, stop: StopIndex },

    /// Routing tunables out of range
    #[error("invalid routing settings: {0}")]
    InvalidSettings(String),
}

/// What an edge means to a passenger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Wait,
    Ride,
}

/// Label of one graph edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub kind: ItemKind,
    /// Stops covered by a ride; zero for a wait.
    pub span_count: u32,
    /// Stop name for a wait, bus name for a ride.
    pub name: String,
}

impl Item {
    pub fn wait(stop: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Wait,
            span_count: 0,
            name: stop.into(),
        }
    }

    pub fn ride(bus: impl Into<String>, span_count: u32) -> Self {
        Self {
            kind: ItemKind::Ride,
            span_count,
            name: bus.into(),
        }
    }
}

/// A built route graph with its edge labels.
///
/// `items[e]` always labels `graph.edge(e)`.
#[derive(Debug, Clone)]
pub struct RouteGraph {
    graph: DirectedWeightedGraph,
    items: Vec<Item>,
    /// Stop name to its wait vertex.
    wait_index: HashMap<String, VertexId>,
}

impl RouteGraph {
    /// Assemble a route graph from parts that are known to agree.
    ///
    /// Callers must ensure there is exactly one item per edge.
    pub(crate) fn from_parts(
        graph: DirectedWeightedGraph,
        items: Vec<Item>,
        wait_index: HashMap<String, VertexId>,
    ) -> Self {
        debug_assert_eq!(graph.edge_count(), items.len());
        Self {
            graph,
            items,
            wait_index,
        }
    }

    pub fn graph(&self) -> &DirectedWeightedGraph {
        &self.graph
    }

    /// Edge labels in edge id order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Label of one edge.
    pub fn item(&self, edge: EdgeId) -> Option<&Item> {
        self.items.get(edge)
    }

    /// Wait vertex of a stop, by name.
    pub fn wait_vertex(&self, stop: &str) -> Option<VertexId> {
        self.wait_index.get(stop).copied()
    }

    /// Stop name to wait vertex, for every stop.
    pub fn wait_index(&self) -> &HashMap<String, VertexId> {
        &self.wait_index
    }
}

/// Builds a [`RouteGraph`] from catalogue facts and routing settings.
///
/// The same facts and settings always produce the same graph, edge ids
/// included.
pub struct GraphBuilder<'a, C: CatalogueFacts> {
    facts: &'a C,
    settings: &'a RoutingSettings,
}

impl<'a, C: CatalogueFacts> GraphBuilder<'a, C> {
    pub fn new(facts: &'a C, settings: &'a RoutingSettings) -> Self {
        Self { facts, settings }
    }

    /// Build the graph.
    ///
    /// Fails if the settings are out of range or a run uses a stop pair
    /// with no registered distance.
    pub fn build(&self) -> Result<RouteGraph, BuildError> {
        self.settings.validate()?;

        let stops = self.facts.stops();
        let mut graph = DirectedWeightedGraph::new(stops.len() * 2);
        let mut items = Vec::new();
        let mut wait_index = HashMap::with_capacity(stops.len());

        // Wait edges first, so stop i owns edge id i
        for (idx, stop) in stops.iter().enumerate() {
            let stop_idx = StopIndex(idx);
            let wait = vertex_of(stop_idx, VertexRole::Wait);
            graph.add_edge(Edge {
                from: wait,
                to: vertex_of(stop_idx, VertexRole::Board),
                weight: self.settings.bus_wait_time,
            });
            items.push(Item::wait(stop.name.as_str()));
            wait_index.insert(stop.name.clone(), wait);
        }

        let speed = self.settings.bus_speed_m_per_min();
        let runs = self.facts.bus_runs();
        for run in &runs {
            self.add_run(&mut graph, &mut items, run.bus, run.stops, speed)?;
        }

        info!(
            stops = stops.len(),
            runs = runs.len(),
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "Route graph built"
        );

        Ok(RouteGraph::from_parts(graph, items, wait_index))
    }

    /// Add one ride edge per ordered stop pair of a run.
    fn add_run(
        &self,
        graph: &mut DirectedWeightedGraph,
        items: &mut Vec<Item>,
        bus: &str,
        run: &[StopIndex],
        speed: f64,
    ) -> Result<(), BuildError> {
        let stop_count = self.facts.stops().len();
        if let Some(&stop) = run.iter().find(|s| s.0 >= stop_count) {
            return Err(BuildError::UnknownStop {
                bus: bus.to_string(),
                stop,
            });
        }

        // Hop distances once per run; every (i, j) pair sums a window of them
        let hops = run
            .windows(2)
            .map(|pair| {
                self.facts
                    .distance(pair[0], pair[1])
                    .ok_or_else(|| self.missing_distance(bus, pair[0], pair[1]))
            })
            .collect::<Result<Vec<u32>, _>>()?;

        for (i, &from) in run.iter().enumerate() {
            let board = vertex_of(from, VertexRole::Board);
            let mut meters = 0.0;

            for (span, &to) in run.iter().enumerate().skip(i + 1) {
                meters += f64::from(hops[span - 1]);
                graph.add_edge(Edge {
                    from: board,
                    to: vertex_of(to, VertexRole::Wait),
                    weight: meters / speed,
                });
                items.push(Item::ride(bus, (span - i) as u32));
            }
        }

        Ok(())
    }

    fn missing_distance(&self, bus: &str, from: StopIndex, to: StopIndex) -> BuildError {
        let stops = self.facts.stops();
        BuildError::MissingDistance {
            bus: bus.to_string(),
            from: stops[from.0].name.clone(),
            to: stops[to.0].name.clone(),
        }
    }
}
