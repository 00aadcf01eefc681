//! Worker pool subsystem.
//!
//! # Data Flow
//! ```text
//! net::Listener (shared accept queue)
//!     → pool.rs supervisor spawns N worker tasks
//!     → each worker: acquire slot → accept → serve connection
//!     → worker retires at its jittered request ceiling
//!     → supervisor spawns a replacement
//! ```
//!
//! # Design Decisions
//! - A worker is a task, not a process; the "threads" knob is a per-worker
//!   permit pool bounding concurrent connections
//! - Recycling ceilings are jittered so workers never restart in lockstep
//! - A retiring worker drains in-flight connections before exiting

pub mod pool;

pub use pool::WorkerPool;
