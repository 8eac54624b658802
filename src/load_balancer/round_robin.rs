//! Round-robin load balancing strategy.

use std::sync::{Arc, Mutex, MutexGuard};
use crate::load_balancer::backend::Backend;

/// Round-robin selector with health-aware skipping.
///
/// The cursor advances once for every candidate examined, healthy or not,
/// so a scan always continues from where the previous one stopped.
#[derive(Debug, Default)]
pub struct RoundRobin {
    cursor: Mutex<usize>,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current raw cursor value. Only `cursor % len` means anything.
    pub fn cursor(&self) -> usize {
        *self.lock()
    }

    /// Pick the next healthy backend, examining at most `backends.len()` candidates.
    pub fn next_server(&self, backends: &[Arc<Backend>]) -> Option<Arc<Backend>> {
        if backends.is_empty() {
            return None;
        }

        let mut cursor = self.lock();
        let len = backends.len();

        for _ in 0..len {
            let backend = &backends[*cursor % len];
            *cursor = cursor.wrapping_add(1);
            if backend.is_healthy() {
                return Some(backend.clone());
            }
        }
        None
    }

    // The cursor is a plain integer, so a poisoned lock still holds a usable value.
    fn lock(&self) -> MutexGuard<'_, usize> {
        self.cursor.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
