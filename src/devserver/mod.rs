//! Bundler dev-server interface.
//!
//! The bundler's development server is an external collaborator; this
//! module defines only the surface the bootstrap needs from it:
//!
//! - contribute connect-style middleware to the HTTP pipeline
//! - transform the on-disk index template for a request URL
//! - load the application's server-entry module on demand
//! - remap stack traces of transformed modules back to source locations
//!
//! Tests drive the bootstrap with stub implementations of these traits.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::http::middleware::ForeignMiddleware;
use crate::ssr::render::Renderer;

/// Dev-server log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
}

/// File-watching configuration for the dev server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchOptions {
    /// Poll the filesystem instead of relying on native change events.
    pub use_polling: bool,

    /// Poll interval when polling is enabled.
    pub poll_interval: Duration,
}

/// Configuration handed to the dev-server factory at startup.
#[derive(Debug, Clone)]
pub struct DevServerOptions {
    /// Project root the dev server serves modules from.
    pub root: PathBuf,

    /// Suppressed to `Error` under test mode.
    pub log_level: LogLevel,

    /// The dev server contributes middleware instead of owning routing and
    /// listening.
    pub middleware_mode: bool,

    pub watch: WatchOptions,
}

impl DevServerOptions {
    /// Options for an embedded dev server rooted at `root`.
    ///
    /// Automated edits during tests can outrun native file watchers and
    /// drop change events, so polling at a short interval is enforced
    /// rather than left to the dev server's default.
    pub fn for_root(root: PathBuf, test_mode: bool) -> Self {
        Self {
            root,
            log_level: if test_mode {
                LogLevel::Error
            } else {
                LogLevel::Info
            },
            middleware_mode: true,
            watch: WatchOptions {
                use_polling: true,
                poll_interval: Duration::from_millis(100),
            },
        }
    }
}

/// Dev-server failure surfaced to the request handler.
#[derive(Debug, Error)]
pub enum DevServerError {
    #[error("dev server startup failed: {0}")]
    Startup(String),

    #[error("index html transform failed: {0}")]
    Transform(String),

    #[error("server entry load failed: {0}")]
    ModuleLoad(String),
}

/// The running dev-server handle, present only in development mode and
/// owned exclusively by the bootstrap.
#[async_trait]
pub trait DevServer: Send + Sync {
    /// The middleware the dev server contributes to the request pipeline
    /// (asset serving, module transforms, HMR endpoints).
    fn middleware(&self) -> Arc<dyn ForeignMiddleware>;

    /// Transform the raw index template for a request URL, injecting the
    /// dev-mode client bootstrap. The URL doubles as the transform cache
    /// key.
    async fn transform_index_html(&self, url: &str, html: &str)
        -> Result<String, DevServerError>;

    /// Load the application's server-entry module fresh and return its
    /// render export.
    async fn load_server_entry(&self) -> Result<Arc<dyn Renderer>, DevServerError>;

    /// Remap transformed stack frames back to original source locations.
    /// Diagnostic only: `None` leaves the stack text unchanged, and a
    /// remapping failure must never mask the error being reported.
    fn fix_stacktrace(&self, stack: &str) -> Option<String>;
}

/// How the bootstrap obtains a dev server in development mode.
#[async_trait]
pub trait DevServerFactory: Send + Sync {
    async fn create(&self, options: DevServerOptions)
        -> Result<Arc<dyn DevServer>, DevServerError>;
}
