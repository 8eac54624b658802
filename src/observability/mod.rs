//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems emit tracing events with structured fields
//!     → logging.rs (EnvFilter + fmt layer)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - Backend-down probes log at warn, rejected requests at info
//! - Per-request spans come from tower_http's TraceLayer

pub mod logging;
