//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Preflight checks → Start subsystems → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Workers stop accepting → Drain → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//!     SIGHUP → Rolling worker recycle
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then observability, then listeners
//! - Ordered shutdown: stop accept, drain, close
//! - Worker drain has a deadline: forced close afterwards

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
