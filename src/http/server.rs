//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the backend pool from validated configuration
//! - Create the Axum router with the dispatcher on every path
//! - Start one health monitor per backend
//! - Serve on the given listener

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ValidatedConfig;
use crate::health::{HealthMonitors, HttpProbe};
use crate::http::dispatcher::Dispatcher;
use crate::http::forward::Forwarder;
use crate::load_balancer::BackendPool;

/// HTTP server for the load balancer.
pub struct HttpServer {
    router: Router,
    pool: Arc<BackendPool>,
    health_check_interval: Duration,
}

impl HttpServer {
    /// Create a server with a fresh pool built from configuration.
    pub fn new(config: &ValidatedConfig) -> Self {
        let pool = Arc::new(BackendPool::new(config.servers.iter().cloned()));
        Self::with_pool(pool, config.health_check_interval)
    }

    /// Create a server around an existing pool.
    pub fn with_pool(pool: Arc<BackendPool>, health_check_interval: Duration) -> Self {
        let dispatcher = Dispatcher::new(pool.clone(), Forwarder::new());
        Self {
            router: Self::build_router(dispatcher),
            pool,
            health_check_interval,
        }
    }

    /// Build the Axum router: every method and path goes to the dispatcher.
    fn build_router(dispatcher: Dispatcher) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(dispatcher)
            .layer(TraceLayer::new_for_http())
    }

    pub fn pool(&self) -> &Arc<BackendPool> {
        &self.pool
    }

    /// The request router, without a listener attached.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Start health monitoring and serve until the listener fails.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            backends = self.pool.len(),
            "HTTP server starting"
        );

        let monitors = HealthMonitors::spawn(
            &self.pool,
            Arc::new(HttpProbe::new()),
            self.health_check_interval,
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();
        let result = axum::serve(listener, app).await;

        monitors.stop().await;
        tracing::info!("HTTP server stopped");
        result
    }
}

async fn proxy_handler(State(dispatcher): State<Dispatcher>, request: Request<Body>) -> Response {
    dispatcher.handle(request).await
}
