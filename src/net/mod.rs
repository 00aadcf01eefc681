//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (shared accept queue, global connection limit)
//!     → Hand off to a worker task (worker::pool)
//! ```
//!
//! # Design Decisions
//! - One listener shared by all workers; accept is called concurrently
//! - Bounded accept queue prevents resource exhaustion
//! - TLS termination is left to the deployment layer

pub mod listener;

pub use listener::{ConnectionPermit, Listener, ListenerError};
