//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all route, tracing layer)
//!     → dispatcher.rs (pool.next() or 503)
//!     → forward.rs (rewrite URI, relay request and response)
//!     → Send to client
//! ```

pub mod dispatcher;
pub mod forward;
pub mod server;

pub use dispatcher::{Dispatcher, NO_HEALTHY_BACKENDS};
pub use forward::Forwarder;
pub use server::HttpServer;
