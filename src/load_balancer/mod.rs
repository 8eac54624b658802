//! Load balancing subsystem.
//!
//! # Data Flow
//! ```text
//! Request arrives at the dispatcher
//!     → pool.rs (fixed, ordered backend list)
//!     → round_robin.rs (advance cursor, skip unhealthy)
//!     → backend.rs (health flag read)
//!     → Return backend or Unavailable
//! ```
//!
//! # Design Decisions
//! - One pool-wide lock guards only the cursor
//! - Health is per-backend; the pool never locks it
//! - Unhealthy backends stay in rotation and are re-examined every cycle

pub mod backend;
pub mod pool;
pub mod round_robin;

pub use backend::Backend;
pub use pool::BackendPool;

/// Selection failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Every backend in the ring was examined and none is healthy.
    #[error("no healthy backends available")]
    Unavailable,
}
