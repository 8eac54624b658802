//! Configuration validation.
//!
//! # Responsibilities
//! - Turn raw strings into typed values (listen address, interval, URLs, log level)
//! - Reject anything the balancer cannot run with
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: BalancerConfig → Result<ValidatedConfig, Vec<ValidationError>>
//! - Runs before any subsystem is built

use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use url::Url;
use crate::config::schema::BalancerConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid port {value:?}: expected \":port\", \"port\" or \"host:port\"")]
    InvalidPort { value: String },

    #[error("invalid healthCheckInterval {value:?}: {reason}")]
    InvalidInterval { value: String, reason: String },

    #[error("servers must contain at least one backend")]
    NoServers,

    #[error("invalid server URL {value:?}: {reason}")]
    InvalidServer { value: String, reason: String },

    #[error("invalid logLevel {value:?}: expected trace, debug, info, warn or error")]
    InvalidLogLevel { value: String },
}

/// Configuration after validation, ready to build the balancer from.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub listen_addr: SocketAddr,
    pub health_check_interval: Duration,
    pub servers: Vec<Url>,
    pub log_level: String,
}

/// Validate a raw configuration, collecting every problem found.
pub fn validate_config(config: &BalancerConfig) -> Result<ValidatedConfig, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let listen_addr = parse_listen_addr(&config.port)
        .map_err(|e| errors.push(e))
        .ok();

    let health_check_interval = parse_interval(&config.health_check_interval)
        .map_err(|e| errors.push(e))
        .ok();

    if config.servers.is_empty() {
        errors.push(ValidationError::NoServers);
    }
    let mut servers = Vec::with_capacity(config.servers.len());
    for raw in &config.servers {
        match parse_server(raw) {
            Ok(url) => servers.push(url),
            Err(e) => errors.push(e),
        }
    }

    let log_level = parse_log_level(&config.log_level)
        .map_err(|e| errors.push(e))
        .ok();

    match (listen_addr, health_check_interval, log_level) {
        (Some(listen_addr), Some(health_check_interval), Some(log_level)) if errors.is_empty() => {
            Ok(ValidatedConfig {
                listen_addr,
                health_check_interval,
                servers,
                log_level,
            })
        }
        _ => Err(errors),
    }
}

/// Parse a Go-style listen string into a socket address.
pub fn parse_listen_addr(value: &str) -> Result<SocketAddr, ValidationError> {
    let invalid = || ValidationError::InvalidPort { value: value.to_string() };
    let trimmed = value.trim();

    // ":8080" and "8080" listen on every interface.
    let port_only = trimmed.strip_prefix(':').unwrap_or(trimmed);
    if let Ok(port) = port_only.parse::<u16>() {
        return Ok(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)));
    }

    if let Ok(addr) = trimmed.parse::<SocketAddr>() {
        return Ok(addr);
    }

    match trimmed.rsplit_once(':') {
        Some(("localhost", port)) => port
            .parse::<u16>()
            .map(|port| SocketAddr::from((Ipv4Addr::LOCALHOST, port)))
            .map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

fn parse_interval(value: &str) -> Result<Duration, ValidationError> {
    let interval = humantime::parse_duration(value.trim()).map_err(|e| {
        ValidationError::InvalidInterval {
            value: value.to_string(),
            reason: e.to_string(),
        }
    })?;

    if interval.is_zero() {
        return Err(ValidationError::InvalidInterval {
            value: value.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(interval)
}

fn parse_server(value: &str) -> Result<Url, ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidServer {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(value.trim()).map_err(|e| invalid(&e.to_string()))?;
    if url.scheme() != "http" {
        return Err(invalid("scheme must be http"));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host"));
    }
    Ok(url)
}

/// Accept any `tracing` level name, normalized to lower case for `EnvFilter`.
fn parse_log_level(value: &str) -> Result<String, ValidationError> {
    tracing::Level::from_str(value.trim())
        .map(|level| level.as_str().to_ascii_lowercase())
        .map_err(|_| ValidationError::InvalidLogLevel { value: value.to_string() })
}
