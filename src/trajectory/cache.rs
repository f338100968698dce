//! Process-lifetime memoization of generated trajectories.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::generator::DailyStatus;

/// Per-patient trajectory cache. First computation per id wins; later
/// callers share the same `Arc`, so repeated queries are pointer-equal.
/// Invalidated only by dropping the cache (process restart in practice).
#[derive(Default)]
pub struct TrajectoryCache {
    inner: RwLock<HashMap<String, Arc<Vec<DailyStatus>>>>,
}

impl TrajectoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached trajectory for `patient_id`, computing it with
    /// `compute` on first access.
    pub fn get_or_compute<F>(&self, patient_id: &str, compute: F) -> Arc<Vec<DailyStatus>>
    where
        F: FnOnce() -> Vec<DailyStatus>,
    {
        if let Some(found) = self
            .inner
            .read()
            .expect("trajectory cache lock poisoned")
            .get(patient_id)
        {
            tracing::debug!(patient_id, "trajectory cache hit");
            return Arc::clone(found);
        }

        // Compute outside the write lock; entry() keeps the first value if
        // another thread raced us here.
        let computed = Arc::new(compute());
        let mut map = self.inner.write().expect("trajectory cache lock poisoned");
        Arc::clone(map.entry(patient_id.to_string()).or_insert(computed))
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .expect("trajectory cache lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
