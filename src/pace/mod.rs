//! Pace conversion domain logic.
//!
//! # Data Flow
//! ```text
//! form / API input
//!     → convert.rs (min/km ↔ km/h)
//!     → race.rs (finish-time projections per distance)
//!     → rendered page or JSON payload
//! ```
//!
//! # Design Decisions
//! - Pure functions, no I/O; the HTTP layer owns parsing and rendering
//! - Invalid input (zero pace, non-positive speed) is a typed error,
//!   never a division by zero

pub mod convert;
pub mod race;

pub use convert::{pace_to_speed, speed_to_pace, Pace, PaceError, Speed};
pub use race::{project_races, RaceProjections};
