//! Server-side rendering core.
//!
//! # Data Flow
//! ```text
//! request URL
//!     → strategy.rs (acquire template + renderer, mode fixed at startup)
//!     → render.rs (application render function: URL + manifest → fragments)
//!     → template.rs (substitute markers, assemble final HTML)
//! ```
//!
//! # Design Decisions
//! - The dev/prod branch is taken exactly once, at startup, by selecting a
//!   strategy; per-request code never consults a mode flag
//! - Template caching and render-function caching always agree: a strategy
//!   either caches both or refreshes both
//! - Marker substitution is forgiving: a missing marker is not an error

pub mod error;
pub mod manifest;
pub mod render;
pub mod strategy;
pub mod template;

pub use error::ServeError;
pub use manifest::Manifest;
pub use render::{RenderError, RenderedPage, Renderer};
pub use strategy::{DevelopmentStrategy, ProductionStrategy, RenderStrategy};
