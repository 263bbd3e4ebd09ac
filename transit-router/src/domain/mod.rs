//! Domain types for the transit router.
//!
//! Stops and buses as the catalogue stores them. Stops are addressed by
//! their dense insertion index rather than by reference, so everything
//! keyed on stops survives a round-trip through the persisted base.

mod bus;
mod error;
mod stop;

pub use bus::{Bus, BusStats, expand_route};
pub use error::DomainError;
pub use stop::{Coordinates, Stop, StopIndex};
