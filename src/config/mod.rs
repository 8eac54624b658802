//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (JSON, or TOML by extension)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (typed values, semantic checks)
//!     → ValidatedConfig (immutable, consumed at startup)
//! ```
//!
//! # Design Decisions
//! - Config is read once; there is no reload
//! - All fields but `servers` have defaults
//! - Any error is fatal before the listener binds

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::BalancerConfig;
pub use validation::{ValidatedConfig, ValidationError};
