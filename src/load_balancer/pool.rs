//! Backend pool management.
//!
//! # Responsibilities
//! - Own the fixed, ordered list of backends
//! - Apply round-robin selection with health skipping
//! - Expose backends to the health monitors

use std::sync::Arc;
use url::Url;
use crate::load_balancer::{
    PoolError,
    backend::Backend,
    round_robin::RoundRobin,
};

/// Ordered set of backends plus the shared round-robin cursor.
#[derive(Debug)]
pub struct BackendPool {
    backends: Vec<Arc<Backend>>,
    selector: RoundRobin,
}

impl BackendPool {
    /// Create a pool from backend addresses, preserving their order.
    pub fn new(addresses: impl IntoIterator<Item = Url>) -> Self {
        let backends = addresses
            .into_iter()
            .map(|address| Arc::new(Backend::new(address)))
            .collect();

        Self {
            backends,
            selector: RoundRobin::new(),
        }
    }

    /// Select the next healthy backend in ring order.
    pub fn next(&self) -> Result<Arc<Backend>, PoolError> {
        match self.selector.next_server(&self.backends) {
            Some(backend) => Ok(backend),
            None => {
                tracing::debug!(
                    backend_count = self.backends.len(),
                    cursor = self.selector.cursor(),
                    "No healthy backends found in pool"
                );
                Err(PoolError::Unavailable)
            }
        }
    }

    /// All backends in ring order (for health checking).
    pub fn backends(&self) -> &[Arc<Backend>] {
        &self.backends
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Number of backends currently marked healthy.
    pub fn healthy_count(&self) -> usize {
        self.backends.iter().filter(|b| b.is_healthy()).count()
    }

    /// Raw round-robin cursor.
    pub fn cursor(&self) -> usize {
        self.selector.cursor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    fn pool(n: usize) -> BackendPool {
        BackendPool::new(
            (0..n).map(|i| Url::parse(&format!("http://10.0.0.{}:80", i + 1)).unwrap()),
        )
    }

    fn index_of(pool: &BackendPool, backend: &Arc<Backend>) -> usize {
        pool.backends()
            .iter()
            .position(|b| Arc::ptr_eq(b, backend))
            .unwrap()
    }

    #[test]
    fn test_fairness_all_healthy() {
        let pool = pool(5);
        // Move the cursor off zero first; fairness holds from any position.
        pool.next().unwrap();
        pool.next().unwrap();

        let picks: Vec<_> = (0..5).map(|_| index_of(&pool, &pool.next().unwrap())).collect();
        assert_eq!(picks, vec![2, 3, 4, 0, 1]);
    }

    #[test]
    fn test_skipped_backend_never_returned() {
        let pool = pool(4);
        pool.backends()[2].set_healthy(false);

        for _ in 0..40 {
            let picked = pool.next().unwrap();
            assert_ne!(index_of(&pool, &picked), 2);
        }
        // 40 healthy picks plus one visit of the skipped slot per full cycle of three.
        assert_eq!(pool.cursor(), 40 + 13);
    }

    #[test]
    fn test_all_unhealthy_returns_unavailable() {
        let pool = pool(3);
        pool.next().unwrap();
        for b in pool.backends() {
            b.set_healthy(false);
        }

        let before = pool.cursor();
        assert!(matches!(pool.next(), Err(PoolError::Unavailable)));
        assert_eq!(pool.cursor(), before + 3);
        assert_eq!(pool.healthy_count(), 0);
    }

    #[test]
    fn test_empty_pool_is_unavailable() {
        let pool = BackendPool::new(Vec::new());
        assert!(pool.is_empty());
        assert!(matches!(pool.next(), Err(PoolError::Unavailable)));
    }

    #[test]
    fn test_recovery_without_rebuild() {
        let pool = pool(2);
        pool.backends()[0].set_healthy(false);

        assert_eq!(index_of(&pool, &pool.next().unwrap()), 1);
        assert_eq!(index_of(&pool, &pool.next().unwrap()), 1);

        pool.backends()[0].set_healthy(true);
        // cursor is at 4 now, ring position 0 comes up first
        assert_eq!(index_of(&pool, &pool.next().unwrap()), 0);
        assert_eq!(index_of(&pool, &pool.next().unwrap()), 1);
    }

    #[test]
    fn test_healthy_skip_pattern() {
        let pool = pool(3);
        pool.backends()[1].set_healthy(false);

        let picks: Vec<_> = (0..3).map(|_| index_of(&pool, &pool.next().unwrap())).collect();
        assert_eq!(picks, vec![0, 2, 0]);
    }

    #[test]
    fn test_first_backend_goes_down_mid_rotation() {
        let pool = pool(3);
        pool.backends()[1].set_healthy(false);

        assert_eq!(index_of(&pool, &pool.next().unwrap()), 0);
        pool.backends()[0].set_healthy(false);
        assert_eq!(index_of(&pool, &pool.next().unwrap()), 2);
    }

    #[test]
    fn test_concurrent_selection_all_healthy() {
        let pool = Arc::new(pool(4));
        let threads = 8;
        let calls = 1000;

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let pool = pool.clone();
                thread::spawn(move || {
                    let mut counts: HashMap<usize, usize> = HashMap::new();
                    for _ in 0..calls {
                        let picked = pool.next().unwrap();
                        *counts.entry(index_of(&pool, &picked)).or_default() += 1;
                    }
                    counts
                })
            })
            .collect();

        let mut totals: HashMap<usize, usize> = HashMap::new();
        for handle in handles {
            for (idx, count) in handle.join().unwrap() {
                *totals.entry(idx).or_default() += count;
            }
        }

        // Each cursor slot was handed out exactly once.
        assert_eq!(pool.cursor(), threads * calls);
        for idx in 0..4 {
            assert_eq!(totals[&idx], threads * calls / 4);
        }
    }

    #[test]
    fn test_concurrent_selection_with_flapping() {
        let pool = Arc::new(pool(3));
        let stop = Arc::new(AtomicBool::new(false));

        let flipper = {
            let pool = pool.clone();
            let stop = stop.clone();
            thread::spawn(move || {
                let mut healthy = false;
                while !stop.load(Ordering::Relaxed) {
                    for b in pool.backends() {
                        b.set_healthy(healthy);
                    }
                    healthy = !healthy;
                    thread::yield_now();
                }
            })
        };

        let workers: Vec<_> = (0..6)
            .map(|_| {
                let pool = pool.clone();
                thread::spawn(move || {
                    for _ in 0..2000 {
                        if let Ok(b) = pool.next() {
                            assert!(index_of(&pool, &b) < 3);
                        }
                    }
                })
            })
            .collect();

        for w in workers {
            w.join().unwrap();
        }
        stop.store(true, Ordering::Relaxed);
        flipper.join().unwrap();

        // Every call consumes between 1 and 3 cursor slots.
        let cursor = pool.cursor();
        assert!(cursor >= 6 * 2000);
        assert!(cursor <= 6 * 2000 * 3);
    }
}
