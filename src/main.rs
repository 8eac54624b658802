//! Round-robin HTTP load balancer.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                LOAD BALANCER                  │
//!                      │                                               │
//!   Client Request     │  ┌─────────┐   ┌────────────┐   ┌─────────┐  │
//!   ───────────────────┼─▶│  http   │──▶│ dispatcher │──▶│ forward │──┼──▶ Backend
//!                      │  │ server  │   └─────┬──────┘   └─────────┘  │
//!                      │  └─────────┘         │ next()                │
//!                      │                      ▼                       │
//!                      │              ┌──────────────┐                │
//!                      │              │ BackendPool  │                │
//!                      │              │ cursor + RR  │                │
//!                      │              └──────▲───────┘                │
//!                      │                     │ health flags           │
//!                      │              ┌──────┴───────┐                │
//!                      │              │health monitor│── HEAD ────────┼──▶ Backend
//!                      │              │ (per backend)│                │
//!                      │              └──────────────┘                │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use clap::Parser;
use tokio::net::TcpListener;

use lb_proxy::config::load_config;
use lb_proxy::observability::logging;
use lb_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "lb-proxy")]
#[command(about = "Round-robin HTTP load balancer with active health checks", long_about = None)]
struct Cli {
    /// Path to the configuration file (.json or .toml)
    #[arg(short, long, env = "LB_CONFIG", default_value = "config.json")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading {}: {}", cli.config.display(), e);
            std::process::exit(1);
        }
    };

    logging::init(&config.log_level)?;

    tracing::info!(
        listen_addr = %config.listen_addr,
        health_check_interval = ?config.health_check_interval,
        servers = config.servers.len(),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!(address = %listener.local_addr()?, "Server listening");

    let server = HttpServer::new(&config);
    server.run(listener).await?;

    Ok(())
}
