//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Per-backend timer (active.rs)
//!     → probe.rs (HEAD request to backend address)
//!     → 200 OK → healthy, anything else → unhealthy
//!     → Backend health flag overwritten
//! ```
//!
//! # Design Decisions
//! - One independent task per backend; ticks across backends are unordered
//! - A failed probe is a state change plus a log line, never an error
//! - No lock is held while a probe is in flight

pub mod active;
pub mod probe;

pub use active::{HealthMonitor, HealthMonitors};
pub use probe::{HttpProbe, Probe, ProbeError};
