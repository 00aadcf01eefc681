//! Liveness probing subsystem.
//!
//! # Data Flow
//! ```text
//! monitor.rs (periodic GET to the service root)
//!     → state.rs (consecutive-failure counter, healthy/unhealthy verdict)
//!     → /health handler and the pace_healthy gauge
//! ```
//!
//! # Design Decisions
//! - The probe is a plain HTTP request through the real listener, so it
//!   exercises the same path external traffic takes
//! - A grace period suppresses probes while the pool warms up
//! - One success restores healthy state; failures accumulate

pub mod monitor;
pub mod state;

pub use monitor::HealthMonitor;
pub use state::LivenessState;
