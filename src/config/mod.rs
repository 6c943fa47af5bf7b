//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! environment (SSR_MODE, SSR_TEST)
//!     → schema.rs (defaults + env overrides)
//!     → ServerConfig (immutable after startup)
//!     → consumed by the http bootstrap
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the mode never changes mid-process
//! - All fields have defaults so tests can build configs inline
//! - Environment is the only configuration surface (no CLI, no file)

pub mod schema;

pub use schema::ServerConfig;
pub use schema::ServerMode;
