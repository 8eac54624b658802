//! Round-robin HTTP load balancer library.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod load_balancer;
pub mod observability;

pub use config::{BalancerConfig, ValidatedConfig};
pub use http::HttpServer;
pub use load_balancer::{Backend, BackendPool, PoolError};
