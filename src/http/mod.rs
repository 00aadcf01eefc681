//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (from a worker task)
//!     → server.rs (Axum router, middleware stack)
//!     → request.rs (request ID injection)
//!     → handlers.rs (form, JSON API, health)
//!     → render.rs (HTML page)
//!     → Send to client
//! ```

pub mod handlers;
pub mod render;
pub mod request;
pub mod server;

pub use request::{RequestId, RequestIdLayer, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
