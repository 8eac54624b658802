//! Active health checking.
//!
//! # Responsibilities
//! - Probe each backend on its own fixed interval
//! - Overwrite the backend's health flag with the outcome
//! - Run every monitor inside one task group with a stop hook

use std::sync::Arc;
use std::time::Duration;
use axum::http::StatusCode;
use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tokio::time::{self, Interval, MissedTickBehavior};
use crate::health::probe::Probe;
use crate::lifecycle::Shutdown;
use crate::load_balancer::{Backend, BackendPool};

/// Periodic prober for a single backend.
pub struct HealthMonitor<P> {
    backend: Arc<Backend>,
    probe: Arc<P>,
    interval: Duration,
}

impl<P: Probe> HealthMonitor<P> {
    pub fn new(backend: Arc<Backend>, probe: Arc<P>, interval: Duration) -> Self {
        Self {
            backend,
            probe,
            interval,
        }
    }

    /// Probe every `interval` until the stop signal fires.
    ///
    /// The first probe happens one interval after start. Ticks missed while a
    /// slow probe is in flight are skipped, not replayed.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        let mut ticker = time::interval_at(time::Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::debug!(
            addr = %self.backend.address(),
            interval = ?self.interval,
            "Health monitor starting"
        );

        loop {
            tokio::select! {
                _ = self.tick(&mut ticker) => {}
                _ = shutdown.recv() => {
                    tracing::debug!(addr = %self.backend.address(), "Health monitor stopped");
                    break;
                }
            }
        }
    }

    async fn tick(&self, ticker: &mut Interval) {
        ticker.tick().await;
        self.check().await;
    }

    /// Run one probe and record the result. Only `200 OK` counts as healthy.
    pub async fn check(&self) -> bool {
        let addr = self.backend.address();

        let healthy = match self.probe.probe(addr).await {
            Ok(StatusCode::OK) => true,
            Ok(status) => {
                tracing::warn!(addr = %addr, status = %status, "Backend is down: non-OK status");
                false
            }
            Err(e) => {
                tracing::warn!(addr = %addr, error = %e, "Backend is down: probe failed");
                false
            }
        };

        self.backend.set_healthy(healthy);
        healthy
    }
}

/// One health monitor task per backend, stoppable as a group.
///
/// Dropping the group aborts every task, so keep it alive for as long as
/// the backends should be monitored.
pub struct HealthMonitors {
    tasks: JoinSet<()>,
    shutdown: Shutdown,
}

impl HealthMonitors {
    /// Start a monitor for every backend in the pool.
    pub fn spawn<P: Probe>(pool: &BackendPool, probe: Arc<P>, interval: Duration) -> Self {
        let shutdown = Shutdown::new();
        let mut tasks = JoinSet::new();

        for backend in pool.backends() {
            let monitor = HealthMonitor::new(backend.clone(), probe.clone(), interval);
            tasks.spawn(monitor.run(shutdown.subscribe()));
        }

        tracing::info!(
            backends = pool.len(),
            interval = ?interval,
            "Health monitors started"
        );

        Self { tasks, shutdown }
    }

    /// Number of monitor tasks still running.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Signal every monitor to stop and wait for all of them to exit.
    pub async fn stop(mut self) {
        self.shutdown.trigger();
        while let Some(result) = self.tasks.join_next().await {
            if let Err(e) = result {
                tracing::warn!(error = %e, "Health monitor task ended abnormally");
            }
        }
        tracing::info!("Health monitors stopped");
    }
}
