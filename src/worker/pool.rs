//! Worker pool with request-count recycling.
//!
//! The Rust-native rendition of a pre-fork process manager: a supervisor owns
//! a fixed-size pool of worker tasks sharing one listener. Each worker draws
//! a jittered request ceiling at spawn, serves connections until it reaches
//! the ceiling, then drains and exits; the supervisor replaces it. Recycling
//! one worker never interrupts requests in flight on the others.

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, Response};
use axum::Router;
use hyper::body::Incoming;
use hyper_util::rt::{TokioExecutor, TokioIo, TokioTimer};
use hyper_util::server::conn::auto::Builder as ConnectionBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use rand::Rng;
use tokio::sync::{broadcast, Semaphore};
use tokio::task::JoinSet;
use tower::ServiceExt;

use crate::config::{TimeoutConfig, WorkerConfig};
use crate::lifecycle::Shutdown;
use crate::net::Listener;
use crate::observability::metrics;

/// Why a worker's run loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitReason {
    /// Hit its request ceiling (or was asked to recycle via SIGHUP).
    Recycled,
    /// Observed the shutdown signal.
    ShuttingDown,
}

/// A worker's parting report to the supervisor.
#[derive(Debug)]
struct WorkerExit {
    id: usize,
    generation: u64,
    handled: u64,
    reason: ExitReason,
}

/// Supervisor for the worker pool.
pub struct WorkerPool {
    config: WorkerConfig,
    timeouts: TimeoutConfig,
    router: Router,
    recycle: broadcast::Sender<()>,
}

impl WorkerPool {
    pub fn new(
        config: WorkerConfig,
        timeouts: TimeoutConfig,
        router: Router,
        recycle: broadcast::Sender<()>,
    ) -> Self {
        Self {
            config,
            timeouts,
            router,
            recycle,
        }
    }

    /// Run the pool until shutdown is signalled and every worker has drained.
    pub async fn run(self, listener: Arc<Listener>, shutdown: Shutdown) {
        let mut workers = JoinSet::new();
        let mut next_id = self.config.count;

        for id in 0..self.config.count {
            self.spawn_worker(&mut workers, id, 0, &listener, &shutdown);
        }
        metrics::record_worker_count(self.config.count);

        let mut rx = shutdown.subscribe();
        let mut shutting_down = false;

        loop {
            tokio::select! {
                _ = rx.recv(), if !shutting_down => {
                    shutting_down = true;
                    tracing::info!("Draining workers");
                }
                joined = workers.join_next() => match joined {
                    None => break,
                    Some(Ok(exit)) => match exit.reason {
                        ExitReason::Recycled if !shutting_down && !shutdown.is_triggered() => {
                            metrics::record_worker_recycled();
                            tracing::info!(
                                worker = exit.id,
                                generation = exit.generation,
                                handled = exit.handled,
                                "Worker recycled"
                            );
                            self.spawn_worker(
                                &mut workers,
                                exit.id,
                                exit.generation + 1,
                                &listener,
                                &shutdown,
                            );
                        }
                        _ => {
                            tracing::info!(
                                worker = exit.id,
                                handled = exit.handled,
                                "Worker stopped"
                            );
                        }
                    },
                    Some(Err(e)) => {
                        tracing::error!(error = %e, "Worker task failed");
                        if !shutting_down && !shutdown.is_triggered() {
                            self.spawn_worker(&mut workers, next_id, 0, &listener, &shutdown);
                            next_id += 1;
                        }
                    }
                }
            }
        }

        metrics::record_worker_count(0);
    }

    fn spawn_worker(
        &self,
        workers: &mut JoinSet<WorkerExit>,
        id: usize,
        generation: u64,
        listener: &Arc<Listener>,
        shutdown: &Shutdown,
    ) {
        let worker = Worker {
            id,
            generation,
            ceiling: jittered_ceiling(self.config.max_requests, self.config.max_requests_jitter),
            handled: Arc::new(AtomicU64::new(0)),
            slots: Arc::new(Semaphore::new(self.config.threads)),
            listener: Arc::clone(listener),
            router: self.router.clone(),
            timeouts: self.timeouts.clone(),
        };
        workers.spawn(worker.run(shutdown.clone(), self.recycle.subscribe()));
    }
}

/// One worker: an accept loop bounded by its slot pool and request ceiling.
struct Worker {
    id: usize,
    generation: u64,
    ceiling: u64,
    handled: Arc<AtomicU64>,
    slots: Arc<Semaphore>,
    listener: Arc<Listener>,
    router: Router,
    timeouts: TimeoutConfig,
}

impl Worker {
    async fn run(self, shutdown: Shutdown, mut recycle: broadcast::Receiver<()>) -> WorkerExit {
        let mut shutdown_rx = shutdown.subscribe();
        let mut builder = ConnectionBuilder::new(TokioExecutor::new());
        builder
            .http1()
            .timer(TokioTimer::new())
            .keep_alive(true)
            .header_read_timeout(Duration::from_secs(self.timeouts.keepalive_secs));
        let graceful = GracefulShutdown::new();

        tracing::debug!(
            worker = self.id,
            generation = self.generation,
            ceiling = self.ceiling,
            "Worker started"
        );

        let reason = loop {
            if shutdown.is_triggered() {
                break ExitReason::ShuttingDown;
            }
            if self.handled.load(Ordering::Relaxed) >= self.ceiling {
                break ExitReason::Recycled;
            }

            let slot = tokio::select! {
                permit = self.slots.clone().acquire_owned() => {
                    permit.expect("worker slot semaphore closed")
                }
                _ = shutdown_rx.recv() => break ExitReason::ShuttingDown,
                _ = recycle.recv() => break ExitReason::Recycled,
            };

            tokio::select! {
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer, conn_permit)) => {
                        let service = WorkerService {
                            router: self.router.clone(),
                            peer,
                            handled: Arc::clone(&self.handled),
                        };
                        let conn = builder.serve_connection(TokioIo::new(stream), service);
                        let conn = graceful.watch(conn.into_owned());
                        tokio::spawn(async move {
                            if let Err(e) = conn.await {
                                tracing::debug!(peer = %peer, error = %e, "Connection ended with error");
                            }
                            drop(conn_permit);
                            drop(slot);
                        });
                    }
                    Err(e) => {
                        tracing::warn!(worker = self.id, error = %e, "Accept failed");
                        tokio::time::sleep(Duration::from_millis(100)).await;
                    }
                },
                _ = shutdown_rx.recv() => break ExitReason::ShuttingDown,
                _ = recycle.recv() => break ExitReason::Recycled,
            }
        };

        // Stop accepting, then give in-flight connections their full request
        // timeout plus the drain grace before closing anything.
        let drain = Duration::from_secs(self.timeouts.request_secs + self.timeouts.drain_grace_secs);
        if tokio::time::timeout(drain, graceful.shutdown()).await.is_err() {
            tracing::warn!(
                worker = self.id,
                "Drain deadline hit, closing remaining connections"
            );
        }

        WorkerExit {
            id: self.id,
            generation: self.generation,
            handled: self.handled.load(Ordering::Relaxed),
            reason,
        }
    }
}

/// Per-connection service: counts requests against the worker's ceiling,
/// injects the peer address, and dispatches into the shared router.
#[derive(Clone)]
struct WorkerService {
    router: Router,
    peer: SocketAddr,
    handled: Arc<AtomicU64>,
}

impl hyper::service::Service<Request<Incoming>> for WorkerService {
    type Response = Response<Body>;
    type Error = std::convert::Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        self.handled.fetch_add(1, Ordering::Relaxed);
        let mut req = req.map(Body::new);
        req.extensions_mut().insert(ConnectInfo(self.peer));
        let router = self.router.clone();
        Box::pin(async move { router.oneshot(req).await })
    }
}

/// Draw a recycling ceiling in `max_requests ± jitter`.
fn jittered_ceiling(max_requests: u64, jitter: u64) -> u64 {
    if jitter == 0 {
        return max_requests;
    }
    let low = max_requests.saturating_sub(jitter);
    let high = max_requests.saturating_add(jitter);
    rand::thread_rng().gen_range(low..=high)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceiling_stays_within_jitter_bounds() {
        for _ in 0..200 {
            let ceiling = jittered_ceiling(1000, 100);
            assert!((900..=1100).contains(&ceiling), "got {ceiling}");
        }
    }

    #[test]
    fn zero_jitter_is_exact() {
        assert_eq!(jittered_ceiling(500, 0), 500);
    }

    #[test]
    fn jitter_never_underflows() {
        for _ in 0..50 {
            let ceiling = jittered_ceiling(10, 9);
            assert!((1..=19).contains(&ceiling));
        }
    }
}
