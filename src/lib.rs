//! SSR Bootstrap Server
//!
//! Wires an Axum HTTP server to a frontend bundler, choosing between a
//! development-time middleware pipeline and a production static-asset
//! pipeline, and invokes an application-owned render function per request
//! to produce HTML.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────┐
//!                       │                  SSR SERVER                  │
//!                       │                                              │
//!   Client Request      │  ┌─────────┐    ┌──────────────────────────┐ │
//!   ────────────────────┼─▶│  http   │───▶│ dev middleware (adapter) │ │
//!                       │  │ server  │    │ or static assets + gzip  │ │
//!                       │  └─────────┘    └────────────┬─────────────┘ │
//!                       │                              ▼               │
//!                       │                     ┌──────────────┐         │
//!                       │                     │  catch-all   │         │
//!                       │                     │   handler    │         │
//!                       │                     └──────┬───────┘         │
//!                       │                            ▼                 │
//!                       │      template ─▶ renderer ─▶ assemble        │
//!                       │      (ssr::strategy, one of two variants     │
//!                       │       fixed at startup)                      │
//!   Client Response     │                            │                 │
//!   ◀───────────────────┼────────────────────────────┘                 │
//!                       └──────────────────────────────────────────────┘
//! ```
//!
//! The mode (development vs production) is decided once at startup and
//! never changes for the process lifetime. Development re-reads the
//! template and re-resolves the render function on every request so edits
//! are picked up without restart; production caches both at startup.

pub mod config;
pub mod devserver;
pub mod http;
pub mod observability;
pub mod ssr;

pub use config::{ServerConfig, ServerMode};
pub use http::{Hooks, SsrServer};
pub use ssr::{Manifest, RenderedPage, Renderer, ServeError};
