//! Per-feature in-flight markers.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use stellarmind_quota::FeatureKey;
use tracing::debug;

/// Features with a request currently outstanding.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    active: Arc<Mutex<HashSet<FeatureKey>>>,
}

impl InFlight {
    /// Mark `key` as in flight.
    ///
    /// Returns `None` when a request for `key` is already outstanding. The
    /// marker clears when the returned guard drops.
    pub fn try_acquire(&self, key: FeatureKey) -> Option<InFlightGuard> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if active.insert(key) {
            debug!(feature = %key, "Feature marked in flight");
            Some(InFlightGuard {
                key,
                active: Arc::clone(&self.active),
            })
        } else {
            None
        }
    }

    /// Whether a request for `key` is outstanding.
    pub fn is_active(&self, key: FeatureKey) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&key)
    }
}

/// Clears its feature's in-flight marker on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    key: FeatureKey,
    active: Arc<Mutex<HashSet<FeatureKey>>>,
}

impl InFlightGuard {
    /// Feature this guard covers.
    pub fn key(&self) -> FeatureKey {
        self.key
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
        debug!(feature = %self.key, "Feature no longer in flight");
    }
}
