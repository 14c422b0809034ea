use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;

use super::GeometryFactory;

type FactoriesByAxisCount = HashMap<usize, Vec<Arc<GeometryFactory>>>;

// Grows for the lifetime of the process, nothing is ever evicted.
static FACTORIES_BY_SRID: LazyLock<Mutex<HashMap<i32, FactoriesByAxisCount>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Returns the canonical factory for the configuration, creating it on first request.
///
/// `scales` must already be normalized to `axis_count` entries.
pub(super) fn canonical(srid: i32, axis_count: usize, scales: Vec<f64>) -> Arc<GeometryFactory> {
    let mut registry = FACTORIES_BY_SRID.lock();
    let factories = registry
        .entry(srid)
        .or_default()
        .entry(axis_count)
        .or_default();

    if let Some(factory) = factories.iter().find(|f| f.scales() == scales.as_slice()) {
        log::trace!("Reusing geometry factory {factory}");
        return factory.clone();
    }

    let factory = Arc::new(GeometryFactory::new_uncached(srid, axis_count, scales));
    log::debug!("Created geometry factory {factory}");
    factories.push(factory.clone());
    factory
}

/// Number of canonical factories created so far.
pub fn cached_factory_count() -> usize {
    FACTORIES_BY_SRID
        .lock()
        .values()
        .flat_map(|by_axis| by_axis.values())
        .map(Vec::len)
        .sum()
}
