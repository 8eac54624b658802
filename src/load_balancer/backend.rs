//! Backend abstraction.
//!
//! # Responsibilities
//! - Represent a single upstream server
//! - Track health state (healthy/unhealthy)
//!
//! # Design Decisions
//! - Address is immutable once the backend exists
//! - Health is a per-backend atomic, never a pool-wide lock
//! - Only the backend's own monitor task writes the flag

use std::sync::atomic::{AtomicBool, Ordering};
use url::Url;

/// A single backend server.
#[derive(Debug)]
pub struct Backend {
    /// Where requests and probes for this backend are sent.
    address: Url,
    /// Last known liveness, written by the health monitor.
    healthy: AtomicBool,
}

impl Backend {
    /// Create a new backend. Backends start out healthy until a probe says otherwise.
    pub fn new(address: Url) -> Self {
        Self {
            address,
            healthy: AtomicBool::new(true),
        }
    }

    /// The backend's base URL.
    pub fn address(&self) -> &Url {
        &self.address
    }

    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::Acquire)
    }

    /// Overwrite the health flag.
    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::Release);
    }
}
