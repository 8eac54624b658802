//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init logging → Build pool → Start monitors → Serve
//!
//! Stop (shutdown.rs):
//!     trigger() → every health monitor task leaves its loop
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener runs until the process exits
//! - Background tasks still carry a stop hook so they can be torn down

pub mod shutdown;

pub use shutdown::Shutdown;
