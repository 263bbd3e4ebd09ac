//! Transport catalogue.
//!
//! Plain associative storage for stops, buses and road distances, plus the
//! [`CatalogueFacts`] seam through which the router reads the network.

mod facts;

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::domain::{Bus, BusStats, Coordinates, DomainError, Stop, StopIndex, expand_route};

pub use facts::{BusRun, CatalogueFacts};

/// In-memory catalogue of a transit network.
///
/// Stops keep their insertion order, which later defines graph vertex ids.
/// Buses are kept ordered by name.
#[derive(Debug, Clone, Default)]
pub struct TransportCatalogue {
    stops: Vec<Stop>,
    stop_indexes: HashMap<String, StopIndex>,
    buses: BTreeMap<String, Bus>,
    /// Registered road distances in meters, keyed by (from, to).
    distances: HashMap<(StopIndex, StopIndex), u32>,
    /// Bus names serving each stop, indexed like `stops`.
    buses_at_stop: Vec<BTreeSet<String>>,
}

impl TransportCatalogue {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop.
    pub fn add_stop(
        &mut self,
        name: &str,
        coordinates: Coordinates,
    ) -> Result<StopIndex, DomainError> {
        if self.stop_indexes.contains_key(name) {
            return Err(DomainError::DuplicateStop(name.to_string()));
        }

        let index = StopIndex(self.stops.len());
        self.stops.push(Stop::new(name, coordinates));
        self.stop_indexes.insert(name.to_string(), index);
        self.buses_at_stop.push(BTreeSet::new());
        Ok(index)
    }

    /// Register the road distance from one stop to another, in meters.
    ///
    /// Distances are directional; the reverse direction is only used as a
    /// fallback when no distance was registered for it explicitly.
    pub fn set_distance(&mut self, from: &str, to: &str, meters: u32) -> Result<(), DomainError> {
        let from = self.require_stop(from)?;
        let to = self.require_stop(to)?;
        self.distances.insert((from, to), meters);
        Ok(())
    }

    /// Add a bus with its declared stop list.
    ///
    /// Non-round-trip routes are expanded to include the way back. Every
    /// pair of consecutive stops must already have a road distance.
    pub fn add_bus(
        &mut self,
        name: &str,
        stops: &[String],
        is_roundtrip: bool,
    ) -> Result<(), DomainError> {
        if self.buses.contains_key(name) {
            return Err(DomainError::DuplicateBus(name.to_string()));
        }

        let declared = stops
            .iter()
            .map(|s| self.require_stop(s))
            .collect::<Result<Vec<_>, _>>()?;
        let route = expand_route(&declared, is_roundtrip);
        let stats = self.route_stats(&route)?;

        for stop in &route {
            self.buses_at_stop[stop.0].insert(name.to_string());
        }

        self.buses.insert(
            name.to_string(),
            Bus {
                name: name.to_string(),
                stops: route,
                is_roundtrip,
                stats,
            },
        );
        Ok(())
    }

    /// Look up a stop's index by name.
    pub fn stop_index(&self, name: &str) -> Option<StopIndex> {
        self.stop_indexes.get(name).copied()
    }

    /// Look up a bus by name.
    pub fn bus(&self, name: &str) -> Option<&Bus> {
        self.buses.get(name)
    }

    /// All buses, ordered by name.
    pub fn buses(&self) -> impl Iterator<Item = &Bus> {
        self.buses.values()
    }

    /// Statistics for a bus, if it exists.
    pub fn bus_stats(&self, name: &str) -> Option<BusStats> {
        self.bus(name).map(|bus| bus.stats)
    }

    /// Names of buses serving a stop, ordered by name.
    ///
    /// Returns `None` for an unknown stop and an empty set for a stop no
    /// bus serves.
    pub fn buses_at_stop(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.stop_index(name).map(|idx| &self.buses_at_stop[idx.0])
    }

    /// Road distance between two stops in meters.
    ///
    /// Falls back to the reverse direction when only that one is registered.
    pub fn distance_between(&self, from: StopIndex, to: StopIndex) -> Option<u32> {
        self.distances
            .get(&(from, to))
            .or_else(|| self.distances.get(&(to, from)))
            .copied()
    }

    /// All explicitly registered distances, in no particular order.
    pub fn registered_distances(&self) -> impl Iterator<Item = (StopIndex, StopIndex, u32)> + '_ {
        self.distances
            .iter()
            .map(|(&(from, to), &meters)| (from, to, meters))
    }

    /// Number of stops.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Number of buses.
    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    fn require_stop(&self, name: &str) -> Result<StopIndex, DomainError> {
        self.stop_index(name)
            .ok_or_else(|| DomainError::UnknownStop(name.to_string()))
    }

    fn route_stats(&self, route: &[StopIndex]) -> Result<BusStats, DomainError> {
        let mut route_length = 0u64;
        let mut geographic_length = 0.0;

        for pair in route.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let meters =
                self.distance_between(from, to)
                    .ok_or_else(|| DomainError::MissingDistance {
                        from: self.stops[from.0].name.clone(),
                        to: self.stops[to.0].name.clone(),
                    })?;
            route_length += u64::from(meters);
            geographic_length += self.stops[from.0]
                .coordinates
                .distance_to(&self.stops[to.0].coordinates);
        }

        let unique_stop_count = route.iter().collect::<HashSet<_>>().len();
        Ok(BusStats::new(
            route.len(),
            unique_stop_count,
            route_length,
            geographic_length,
        ))
    }
}

impl CatalogueFacts for TransportCatalogue {
    fn stops(&self) -> &[Stop] {
        &self.stops
    }

    fn bus_runs(&self) -> Vec<BusRun<'_>> {
        self.buses
            .values()
            .flat_map(|bus| {
                bus.runs().into_iter().map(move |stops| BusRun {
                    bus: &bus.name,
                    stops,
                })
            })
            .collect()
    }

    fn distance(&self, from: StopIndex, to: StopIndex) -> Option<u32> {
        self.distance_between(from, to)
    }
}
