//! Configuration schema definitions.
//!
//! Field names follow the `config.json` layout the balancer has always read:
//!
//! ```json
//! {
//!   "port": ":8080",
//!   "healthCheckInterval": "10s",
//!   "servers": ["http://localhost:5001", "http://localhost:5002"]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Root configuration for the load balancer.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BalancerConfig {
    /// Listen address. `":8080"`, `"8080"` and `"host:port"` are accepted.
    pub port: String,

    /// Probe interval as a duration string (e.g. "10s", "1m30s").
    pub health_check_interval: String,

    /// Backend base URLs, in ring order.
    pub servers: Vec<String>,

    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            port: ":8080".to_string(),
            health_check_interval: "10s".to_string(),
            servers: Vec::new(),
            log_level: "info".to_string(),
        }
    }
}
