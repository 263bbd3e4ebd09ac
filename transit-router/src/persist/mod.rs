//! Persistence of a built transit base.
//!
//! A base is the catalogue plus the router built from it: graph, edge
//! labels, wait index and the complete routing table. Saving encodes all
//! of it with bitcode behind a checksummed header; loading restores it
//! verbatim, so a query process never reruns the shortest-path search.

mod error;
mod header;
mod snapshot;

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::catalogue::TransportCatalogue;
use crate::router::TransportRouter;

pub use error::PersistError;
pub use header::{FORMAT_VERSION, HEADER_SIZE, MAGIC};
pub use snapshot::BaseSnapshot;

/// Catalogue and router, ready to answer queries.
#[derive(Debug, Clone)]
pub struct TransitBase {
    pub catalogue: TransportCatalogue,
    pub router: TransportRouter,
}

impl TransitBase {
    pub fn new(catalogue: TransportCatalogue, router: TransportRouter) -> Self {
        Self { catalogue, router }
    }

    /// Encode the base, header included.
    pub fn encode(&self) -> Result<Vec<u8>, PersistError> {
        let snapshot = BaseSnapshot::capture(&self.catalogue, &self.router)?;
        Ok(header::wrap_payload(&bitcode::encode(&snapshot)))
    }

    /// Decode a base produced by [`TransitBase::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self, PersistError> {
        let payload = header::unwrap_payload(bytes)?;
        let snapshot: BaseSnapshot = bitcode::decode(payload)?;
        let (catalogue, router) = snapshot.restore()?;
        Ok(Self { catalogue, router })
    }

    /// Write the base to `path`, replacing any existing file atomically.
    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        let bytes = self.encode()?;
        atomic_write(path, &bytes)?;
        info!(
            path = %path.display(),
            bytes = bytes.len(),
            stops = self.catalogue.stop_count(),
            "Transit base saved"
        );
        Ok(())
    }

    /// Read a base from `path`.
    pub fn load(path: &Path) -> Result<Self, PersistError> {
        let bytes = fs::read(path)?;
        let base = Self::decode(&bytes)?;
        info!(
            path = %path.display(),
            bytes = bytes.len(),
            stops = base.catalogue.stop_count(),
            buses = base.catalogue.bus_count(),
            "Transit base loaded"
        );
        Ok(base)
    }
}

/// Write `data` to `path` via a temporary sibling file and a rename.
///
/// A crash mid-write leaves any previous file at `path` intact.
fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_path = PathBuf::from(path);
    tmp_path.as_mut_os_string().push(".tmp");

    let mut file = File::create(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(&tmp_path, path)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::Coordinates;
    use crate::router::RoutingSettings;
    use proptest::prelude::*;

    fn network() -> impl Strategy<Value = (usize, Vec<(Vec<usize>, bool)>, Vec<u32>)> {
        (2usize..=5).prop_flat_map(|n| {
            (
                Just(n),
                proptest::collection::vec(
                    (proptest::collection::vec(0..n, 1..=4), any::<bool>()),
                    0..=3,
                ),
                proptest::collection::vec(50u32..3000, n * n),
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Decoding an encoded base answers every stop pair identically
        #[test]
        fn roundtrip_preserves_queries((n, buses, distances) in network()) {
            let mut cat = TransportCatalogue::new();
            let stop_names: Vec<String> = (0..n).map(|i| format!("stop {i}")).collect();
            for (i, name) in stop_names.iter().enumerate() {
                cat.add_stop(name, Coordinates::new(i as f64 * 0.01, 0.0)).unwrap();
            }
            for from in 0..n {
                for to in 0..n {
                    cat.set_distance(&stop_names[from], &stop_names[to], distances[from * n + to]).unwrap();
                }
            }
            for (i, (stops, is_roundtrip)) in buses.iter().enumerate() {
                let stops: Vec<String> = stops.iter().map(|&s| stop_names[s].clone()).collect();
                cat.add_bus(&i.to_string(), &stops, *is_roundtrip).unwrap();
            }
            let router = TransportRouter::build(&cat, &RoutingSettings::new(3.0, 25.0)).unwrap();
            let base = TransitBase::new(cat, router);

            let restored = TransitBase::decode(&base.encode().unwrap()).unwrap();
            prop_assert_eq!(base.router.table(), restored.router.table());
            for from in &stop_names {
                for to in &stop_names {
                    prop_assert_eq!(
                        base.router.find_route(from, to),
                        restored.router.find_route(from, to)
                    );
                }
            }
        }
    }
}
