//! HTTP bootstrap subsystem.
//!
//! # Data Flow
//! ```text
//! incoming request
//!     → middleware.rs (dev-server middleware via the foreign adapter)
//!       or ServeDir + compression (production static assets)
//!     → server.rs (catch-all handler: template → render → assemble)
//!     → 200 text/html, or 500 with the error's stack text
//! ```

pub mod middleware;
pub mod server;

pub use middleware::{ForeignMiddleware, ForeignMiddlewareLayer, ForeignOutcome};
pub use server::{Hooks, SsrServer};
