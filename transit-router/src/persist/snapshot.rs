//! Encoded form of a transit base.
//!
//! Snapshot types mirror the in-memory structures with fixed-width ids so
//! the encoding does not depend on the platform's pointer width. Restoring
//! validates every cross-reference before building anything.

use std::collections::HashMap;

use bitcode::{Decode, Encode};

use super::PersistError;
use crate::catalogue::{CatalogueFacts, TransportCatalogue};
use crate::domain::{Coordinates, Stop, StopIndex};
use crate::router::{
    DirectedWeightedGraph, Edge, Item, ItemKind, RouteEntry, RouteGraph, RoutingTable,
    TransportRouter, VertexRole, vertex_of,
};

#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct BaseSnapshot {
    pub catalogue: CatalogueSnapshot,
    pub router: RouterSnapshot,
}

#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct CatalogueSnapshot {
    pub stops: Vec<StopSnapshot>,
    /// Registered distances, sorted by (from, to).
    pub distances: Vec<DistanceSnapshot>,
    /// Buses in name order with their declared, unexpanded stop lists.
    pub buses: Vec<BusSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct StopSnapshot {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct DistanceSnapshot {
    pub from: u32,
    pub to: u32,
    pub meters: u32,
}

#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct BusSnapshot {
    pub name: String,
    pub stops: Vec<u32>,
    pub is_roundtrip: bool,
}

#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct RouterSnapshot {
    pub vertex_count: u32,
    /// Edges in edge id order.
    pub edges: Vec<EdgeSnapshot>,
    /// Edge labels, parallel to `edges`.
    pub items: Vec<ItemSnapshot>,
    /// Stop name to wait vertex, sorted by vertex.
    pub wait_index: Vec<(String, u32)>,
    /// Row-major `(source, target)` routing table entries.
    pub table: Vec<Option<EntrySnapshot>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Encode, Decode)]
pub struct EdgeSnapshot {
    pub from: u32,
    pub to: u32,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub enum ItemKindSnapshot {
    Wait,
    Ride,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct ItemSnapshot {
    pub kind: ItemKindSnapshot,
    pub span_count: u32,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Encode, Decode)]
pub struct EntrySnapshot {
    pub weight: f64,
    pub prev_edge: Option<u32>,
}

impl BaseSnapshot {
    /// Capture a catalogue and the router built from it.
    ///
    /// Fails if any stop, vertex or edge id does not fit in 32 bits.
    pub fn capture(
        catalogue: &TransportCatalogue,
        router: &TransportRouter,
    ) -> Result<Self, PersistError> {
        Ok(Self {
            catalogue: CatalogueSnapshot::capture(catalogue)?,
            router: RouterSnapshot::capture(router)?,
        })
    }

    /// Rebuild the catalogue and router without recomputing any route.
    pub fn restore(self) -> Result<(TransportCatalogue, TransportRouter), PersistError> {
        let catalogue = self.catalogue.restore()?;
        let router = self.router.restore(catalogue.stops())?;
        Ok((catalogue, router))
    }
}

/// Narrow an in-memory id to its encoded width.
fn id32(value: usize, what: &'static str) -> Result<u32, PersistError> {
    u32::try_from(value).map_err(|_| PersistError::IdOverflow { what, value })
}

impl CatalogueSnapshot {
    fn capture(catalogue: &TransportCatalogue) -> Result<Self, PersistError> {
        let stops = catalogue
            .stops()
            .iter()
            .map(|stop| StopSnapshot {
                name: stop.name.clone(),
                latitude: stop.coordinates.latitude,
                longitude: stop.coordinates.longitude,
            })
            .collect();

        let mut distances = catalogue
            .registered_distances()
            .map(|(from, to, meters)| {
                Ok(DistanceSnapshot {
                    from: id32(from.0, "stop")?,
                    to: id32(to.0, "stop")?,
                    meters,
                })
            })
            .collect::<Result<Vec<_>, PersistError>>()?;
        distances.sort_by_key(|d| (d.from, d.to));

        let buses = catalogue
            .buses()
            .map(|bus| {
                Ok(BusSnapshot {
                    name: bus.name.clone(),
                    stops: bus
                        .declared_stops()
                        .iter()
                        .map(|s| id32(s.0, "stop"))
                        .collect::<Result<_, _>>()?,
                    is_roundtrip: bus.is_roundtrip,
                })
            })
            .collect::<Result<Vec<_>, PersistError>>()?;

        Ok(Self {
            stops,
            distances,
            buses,
        })
    }

    fn restore(self) -> Result<TransportCatalogue, PersistError> {
        let mut catalogue = TransportCatalogue::new();
        for stop in &self.stops {
            catalogue.add_stop(&stop.name, Coordinates::new(stop.latitude, stop.longitude))?;
        }

        let stop_name = |idx: u32| -> Result<&str, PersistError> {
            self.stops
                .get(idx as usize)
                .map(|s| s.name.as_str())
                .ok_or_else(|| PersistError::Corrupt(format!("stop index {idx} out of range")))
        };

        for d in &self.distances {
            catalogue.set_distance(stop_name(d.from)?, stop_name(d.to)?, d.meters)?;
        }

        for bus in &self.buses {
            let stops = bus
                .stops
                .iter()
                .map(|&idx| stop_name(idx).map(str::to_string))
                .collect::<Result<Vec<_>, _>>()?;
            catalogue.add_bus(&bus.name, &stops, bus.is_roundtrip)?;
        }

        Ok(catalogue)
    }
}

impl RouterSnapshot {
    fn capture(router: &TransportRouter) -> Result<Self, PersistError> {
        let route_graph = router.route_graph();
        let graph = route_graph.graph();

        let edges = graph
            .edges()
            .iter()
            .map(|e| {
                Ok(EdgeSnapshot {
                    from: id32(e.from, "vertex")?,
                    to: id32(e.to, "vertex")?,
                    weight: e.weight,
                })
            })
            .collect::<Result<Vec<_>, PersistError>>()?;

        let items = route_graph
            .items()
            .iter()
            .map(|item| ItemSnapshot {
                kind: match item.kind {
                    ItemKind::Wait => ItemKindSnapshot::Wait,
                    ItemKind::Ride => ItemKindSnapshot::Ride,
                },
                span_count: item.span_count,
                name: item.name.clone(),
            })
            .collect();

        let mut wait_index = route_graph
            .wait_index()
            .iter()
            .map(|(name, &vertex)| Ok((name.clone(), id32(vertex, "vertex")?)))
            .collect::<Result<Vec<_>, PersistError>>()?;
        wait_index.sort_by_key(|(_, vertex)| *vertex);

        let table = router
            .table()
            .entries()
            .iter()
            .map(|entry| {
                entry
                    .map(|e| -> Result<EntrySnapshot, PersistError> {
                        Ok(EntrySnapshot {
                            weight: e.weight,
                            prev_edge: e.prev_edge.map(|id| id32(id, "edge")).transpose()?,
                        })
                    })
                    .transpose()
            })
            .collect::<Result<Vec<_>, PersistError>>()?;

        Ok(Self {
            vertex_count: id32(graph.vertex_count(), "vertex")?,
            edges,
            items,
            wait_index,
            table,
        })
    }

    /// Rebuild the router for a catalogue holding `stops`.
    ///
    /// Sizes are checked against the stops before anything is allocated.
    fn restore(self, stops: &[Stop]) -> Result<TransportRouter, PersistError> {
        let vertex_count = self.vertex_count as usize;

        if stops.len().checked_mul(2) != Some(vertex_count) {
            return Err(PersistError::Corrupt(format!(
                "router has {vertex_count} vertices for {} stops",
                stops.len()
            )));
        }
        if vertex_count.checked_mul(vertex_count) != Some(self.table.len()) {
            return Err(PersistError::Corrupt(format!(
                "routing table has {} entries for {vertex_count} vertices",
                self.table.len()
            )));
        }
        if self.wait_index.len() != stops.len() {
            return Err(PersistError::Corrupt(format!(
                "wait index has {} entries for {} stops",
                self.wait_index.len(),
                stops.len()
            )));
        }

        if self.items.len() != self.edges.len() {
            return Err(PersistError::Corrupt(format!(
                "{} labels for {} edges",
                self.items.len(),
                self.edges.len()
            )));
        }

        let mut graph = DirectedWeightedGraph::new(vertex_count);
        for (id, e) in self.edges.iter().enumerate() {
            let (from, to) = (e.from as usize, e.to as usize);
            if from >= vertex_count || to >= vertex_count {
                return Err(PersistError::Corrupt(format!(
                    "edge {id} ({from} -> {to}) out of range for {vertex_count} vertices"
                )));
            }
            if !(e.weight.is_finite() && e.weight >= 0.0) {
                return Err(PersistError::Corrupt(format!(
                    "edge {id} has invalid weight {}",
                    e.weight
                )));
            }
            graph.add_edge(Edge {
                from,
                to,
                weight: e.weight,
            });
        }

        let items = self
            .items
            .into_iter()
            .map(|item| Item {
                kind: match item.kind {
                    ItemKindSnapshot::Wait => ItemKind::Wait,
                    ItemKindSnapshot::Ride => ItemKind::Ride,
                },
                span_count: item.span_count,
                name: item.name,
            })
            .collect();

        let mut wait_index = HashMap::with_capacity(self.wait_index.len());
        for (name, vertex) in self.wait_index {
            let vertex = vertex as usize;
            if vertex >= vertex_count {
                return Err(PersistError::Corrupt(format!(
                    "wait vertex {vertex} of {name} out of range"
                )));
            }
            if wait_index.insert(name, vertex).is_some() {
                return Err(PersistError::Corrupt("duplicate stop in wait index".into()));
            }
        }

        for (idx, stop) in stops.iter().enumerate() {
            let expected = vertex_of(StopIndex(idx), VertexRole::Wait);
            if wait_index.get(&stop.name) != Some(&expected) {
                return Err(PersistError::Corrupt(format!(
                    "stop {} is not indexed at wait vertex {expected}",
                    stop.name
                )));
            }
        }

        let table = restore_table(&graph, self.table)?;
        let route_graph = RouteGraph::from_parts(graph, items, wait_index);
        Ok(TransportRouter::from_parts(route_graph, table))
    }
}

/// Rebuild the routing table, checking each entry against the graph.
fn restore_table(
    graph: &DirectedWeightedGraph,
    table: Vec<Option<EntrySnapshot>>,
) -> Result<RoutingTable, PersistError> {
    let vertex_count = graph.vertex_count();
    let expected = vertex_count
        .checked_mul(vertex_count)
        .ok_or_else(|| PersistError::Corrupt("vertex count overflows".into()))?;
    if table.len() != expected {
        return Err(PersistError::Corrupt(format!(
            "routing table has {} entries, expected {expected}",
            table.len()
        )));
    }

    let mut entries = Vec::with_capacity(table.len());
    for (pos, entry) in table.into_iter().enumerate() {
        let (source, target) = (pos / vertex_count, pos % vertex_count);
        let Some(entry) = entry else {
            if source == target {
                return Err(PersistError::Corrupt(format!(
                    "vertex {source} cannot reach itself"
                )));
            }
            entries.push(None);
            continue;
        };

        let prev_edge = match entry.prev_edge {
            None if source == target && entry.weight == 0.0 => None,
            None => {
                return Err(PersistError::Corrupt(format!(
                    "entry ({source}, {target}) has no last edge"
                )));
            }
            Some(_) if source == target => {
                return Err(PersistError::Corrupt(format!(
                    "self entry of vertex {source} has a last edge"
                )));
            }
            Some(id) => {
                let id = id as usize;
                match graph.edge(id) {
                    Some(edge) if edge.to == target => Some(id),
                    Some(_) => {
                        return Err(PersistError::Corrupt(format!(
                            "last edge {id} of ({source}, {target}) does not end at {target}"
                        )));
                    }
                    None => {
                        return Err(PersistError::Corrupt(format!(
                            "last edge {id} of ({source}, {target}) out of range"
                        )));
                    }
                }
            }
        };

        entries.push(Some(RouteEntry {
            weight: entry.weight,
            prev_edge,
        }));
    }

    RoutingTable::from_entries(vertex_count, entries)
        .ok_or_else(|| PersistError::Corrupt("routing table size mismatch".into()))
}
