//! Stop and coordinate types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Dense index of a stop in catalogue insertion order.
///
/// The index is the only identity a stop has outside the catalogue:
/// distances, graph vertices and the persisted base all key on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StopIndex(pub usize);

impl fmt::Display for StopIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Create coordinates from latitude and longitude in degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in meters.
    ///
    /// Uses the spherical law of cosines. Identical coordinates always
    /// yield exactly zero.
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        if self == other {
            return 0.0;
        }

        let lat_from = self.latitude.to_radians();
        let lat_to = other.latitude.to_radians();
        let delta_lng = (self.longitude - other.longitude).abs().to_radians();

        let cos_angle =
            lat_from.sin() * lat_to.sin() + lat_from.cos() * lat_to.cos() * delta_lng.cos();

        // Rounding can push the cosine just outside [-1, 1] for near-identical points
        cos_angle.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_M
    }
}

/// A named stop. Immutable once added to the catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub name: String,
    pub coordinates: Coordinates,
}

impl Stop {
    /// Creates a new stop.
    pub fn new(name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            name: name.into(),
            coordinates,
        }
    }
}
