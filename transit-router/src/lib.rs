//! Transit routing over a bus network.
//!
//! Builds a time-weighted graph from a catalogue of stops and buses,
//! precomputes fastest paths between every pair of stops, persists the
//! result and answers itinerary queries against the saved base.

pub mod catalogue;
pub mod domain;
pub mod persist;
pub mod requests;
pub mod router;
