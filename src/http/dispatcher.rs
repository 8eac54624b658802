//! Per-request dispatch.
//!
//! # Responsibilities
//! - Ask the pool for the next healthy backend
//! - Forward the request there, or answer 503 if none is healthy

use std::sync::Arc;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};
use crate::http::forward::Forwarder;
use crate::load_balancer::{BackendPool, PoolError};

/// Body sent when every backend is down.
pub const NO_HEALTHY_BACKENDS: &str = "No healthy servers available\n";

/// Entry point for every proxied request.
#[derive(Clone)]
pub struct Dispatcher {
    pool: Arc<BackendPool>,
    forwarder: Forwarder,
}

impl Dispatcher {
    pub fn new(pool: Arc<BackendPool>, forwarder: Forwarder) -> Self {
        Self { pool, forwarder }
    }

    pub fn pool(&self) -> &Arc<BackendPool> {
        &self.pool
    }

    /// Select a backend and forward. No retry on a different backend.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        let backend = match self.pool.next() {
            Ok(backend) => backend,
            Err(PoolError::Unavailable) => {
                tracing::info!(
                    method = %request.method(),
                    path = %request.uri().path(),
                    "Rejecting request: no healthy backends"
                );
                return (StatusCode::SERVICE_UNAVAILABLE, NO_HEALTHY_BACKENDS).into_response();
            }
        };

        tracing::debug!(
            method = %request.method(),
            path = %request.uri().path(),
            backend = %backend.address(),
            "Dispatching request"
        );

        self.forwarder.forward(request, backend.address()).await
    }
}
