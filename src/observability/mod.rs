//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → access_log.rs (one line per handled request)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - JSON log format in production, pretty format otherwise
//! - Request ID flows through all subsystems
//! - Metrics are cheap (atomic increments)

pub mod access_log;
pub mod logging;
pub mod metrics;
