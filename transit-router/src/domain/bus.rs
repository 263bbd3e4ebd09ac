//! Bus route types.

use super::StopIndex;

/// Expand a declared stop list into the sequence a bus actually drives.
///
/// A round-trip route is driven as declared. Any other route runs to its
/// last stop and comes back the same way, so `A B C` becomes `A B C B A`.
pub fn expand_route<T: Clone>(stops: &[T], is_roundtrip: bool) -> Vec<T> {
    if is_roundtrip || stops.len() < 2 {
        return stops.to_vec();
    }

    let mut expanded = Vec::with_capacity(stops.len() * 2 - 1);
    expanded.extend_from_slice(stops);
    expanded.extend(stops[..stops.len() - 1].iter().rev().cloned());
    expanded
}

/// Summary statistics of a bus route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusStats {
    /// Number of stops on the driven (expanded) route.
    pub stop_count: usize,
    /// Number of distinct stops.
    pub unique_stop_count: usize,
    /// Total road distance along the driven route, in meters.
    pub route_length: u64,
    /// Road distance divided by great-circle distance.
    pub curvature: f64,
}

impl BusStats {
    /// Compute statistics from raw measurements.
    ///
    /// A route with zero geographic length (a single stop, or stops sharing
    /// coordinates) reports a curvature of 1.0.
    pub fn new(
        stop_count: usize,
        unique_stop_count: usize,
        route_length: u64,
        geographic_length: f64,
    ) -> Self {
        let curvature = if geographic_length > 0.0 {
            route_length as f64 / geographic_length
        } else {
            1.0
        };

        Self {
            stop_count,
            unique_stop_count,
            route_length,
            curvature,
        }
    }
}

/// A bus line as stored in the catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct Bus {
    pub name: String,
    /// Driven stop sequence; non-round-trip routes are already expanded.
    pub stops: Vec<StopIndex>,
    pub is_roundtrip: bool,
    pub stats: BusStats,
}

impl Bus {
    /// Index of the stop where the bus turns around.
    ///
    /// For a round-trip route this is the last stop.
    pub fn turning_index(&self) -> usize {
        if self.stops.is_empty() {
            0
        } else if self.is_roundtrip {
            self.stops.len() - 1
        } else {
            self.stops.len() / 2
        }
    }

    /// The stop list as originally declared, before expansion.
    pub fn declared_stops(&self) -> &[StopIndex] {
        if self.stops.is_empty() {
            &self.stops
        } else {
            &self.stops[..=self.turning_index()]
        }
    }

    /// Contiguous runs the bus drives without terminating.
    ///
    /// A passenger can stay aboard for any stretch within one run. A
    /// non-round-trip route yields the outbound and the return run, which
    /// share the turning stop.
    pub fn runs(&self) -> Vec<&[StopIndex]> {
        if self.stops.is_empty() {
            return Vec::new();
        }
        if self.is_roundtrip {
            return vec![&self.stops];
        }

        let turn = self.turning_index();
        vec![&self.stops[..=turn], &self.stops[turn..]]
    }
}
