//! Dual-mode acquisition strategy.
//!
//! The mode branch is taken exactly once, at startup, by constructing one
//! of the two strategies below; the catch-all handler only ever sees the
//! trait. This keeps the caching invariant structural: a strategy either
//! refreshes both the template and the renderer per request (development)
//! or caches both for the process lifetime (production). The two are never
//! mixed.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::devserver::DevServer;
use crate::ssr::error::ServeError;
use crate::ssr::render::Renderer;

/// Per-request acquisition of the HTML template and the render function.
#[async_trait]
pub trait RenderStrategy: Send + Sync {
    /// The HTML template to substitute into, for the given request URL.
    async fn acquire_template(&self, url: &str) -> Result<String, ServeError>;

    /// The application's render function.
    async fn acquire_renderer(&self) -> Result<Arc<dyn Renderer>, ServeError>;

    /// Best-effort stack remapping for diagnostics. `None` leaves the
    /// stack text unchanged.
    fn remap_stack(&self, _stack: &str) -> Option<String> {
        None
    }
}

/// Development: everything is re-resolved per request through the dev
/// server, so unsaved edits show up without a restart.
pub struct DevelopmentStrategy {
    template_path: PathBuf,
    dev: Arc<dyn DevServer>,
}

impl DevelopmentStrategy {
    pub fn new(template_path: PathBuf, dev: Arc<dyn DevServer>) -> Self {
        Self { template_path, dev }
    }
}

#[async_trait]
impl RenderStrategy for DevelopmentStrategy {
    async fn acquire_template(&self, url: &str) -> Result<String, ServeError> {
        // Always read fresh so on-disk edits apply to the very next request.
        let raw = tokio::fs::read_to_string(&self.template_path).await?;
        let transformed = self.dev.transform_index_html(url, &raw).await?;
        Ok(transformed)
    }

    async fn acquire_renderer(&self) -> Result<Arc<dyn Renderer>, ServeError> {
        Ok(self.dev.load_server_entry().await?)
    }

    fn remap_stack(&self, stack: &str) -> Option<String> {
        self.dev.fix_stacktrace(stack)
    }
}

/// Production: the template string and the render function are resolved
/// once at startup and reused, byte-identical, for every request.
pub struct ProductionStrategy {
    template: String,
    renderer: Arc<dyn Renderer>,
}

impl ProductionStrategy {
    pub fn new(template: String, renderer: Arc<dyn Renderer>) -> Self {
        Self { template, renderer }
    }
}

#[async_trait]
impl RenderStrategy for ProductionStrategy {
    async fn acquire_template(&self, _url: &str) -> Result<String, ServeError> {
        Ok(self.template.clone())
    }

    async fn acquire_renderer(&self) -> Result<Arc<dyn Renderer>, ServeError> {
        Ok(self.renderer.clone())
    }
}
