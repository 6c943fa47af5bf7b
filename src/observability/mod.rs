//! Observability subsystem.
//!
//! Structured logging only; request-level tracing comes from the
//! `TraceLayer` installed by the http bootstrap.

pub mod logging;
