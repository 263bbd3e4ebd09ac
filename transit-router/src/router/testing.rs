//! Test doubles for the router.

use std::collections::HashMap;

use crate::catalogue::{BusRun, CatalogueFacts};
use crate::domain::{Coordinates, Stop, StopIndex};

/// Minimal facts: stops, explicit runs, symmetric distances.
pub(crate) struct FakeFacts {
    stops: Vec<Stop>,
    runs: Vec<(String, Vec<StopIndex>)>,
    distances: HashMap<(StopIndex, StopIndex), u32>,
}

impl FakeFacts {
    pub(crate) fn new(names: &[&str]) -> Self {
        Self {
            stops: names
                .iter()
                .map(|n| Stop::new(*n, Coordinates::new(0.0, 0.0)))
                .collect(),
            runs: Vec::new(),
            distances: HashMap::new(),
        }
    }

    pub(crate) fn with_distance(mut self, from: usize, to: usize, meters: u32) -> Self {
        self.distances.insert((StopIndex(from), StopIndex(to)), meters);
        self
    }

    pub(crate) fn with_run(mut self, bus: &str, stops: &[usize]) -> Self {
        self.runs
            .push((bus.to_string(), stops.iter().copied().map(StopIndex).collect()));
        self
    }
}

impl CatalogueFacts for FakeFacts {
    fn stops(&self) -> &[Stop] {
        &self.stops
    }

    fn bus_runs(&self) -> Vec<BusRun<'_>> {
        self.runs
            .iter()
            .map(|(bus, stops)| BusRun { bus, stops })
            .collect()
    }

    fn distance(&self, from: StopIndex, to: StopIndex) -> Option<u32> {
        self.distances
            .get(&(from, to))
            .or_else(|| self.distances.get(&(to, from)))
            .copied()
    }
}
