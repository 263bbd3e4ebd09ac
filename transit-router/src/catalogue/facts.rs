//! The view of a transit network the router is built from.

use crate::domain::{Stop, StopIndex};

/// A stretch of one bus line driven without terminating.
///
/// Every ordered pair of stops in `stops` can be travelled without
/// changing vehicles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusRun<'a> {
    pub bus: &'a str,
    pub stops: &'a [StopIndex],
}

/// Facts about a transit network needed to build a route graph.
///
/// Implemented by [`TransportCatalogue`](super::TransportCatalogue); tests
/// provide lightweight fakes.
pub trait CatalogueFacts {
    /// All stops, in insertion order. The position of a stop is its
    /// [`StopIndex`].
    fn stops(&self) -> &[Stop];

    /// Runs of every bus, with non-round-trip routes already split into
    /// their outbound and return runs.
    fn bus_runs(&self) -> Vec<BusRun<'_>>;

    /// Road distance between two stops in meters, looked up in either
    /// direction.
    fn distance(&self, from: StopIndex, to: StopIndex) -> Option<u32>;
}
