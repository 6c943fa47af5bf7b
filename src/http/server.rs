//! Server bootstrap and the catch-all render handler.
//!
//! # Responsibilities
//! - Decide the serving mode once at startup and build the matching
//!   pipeline (dev middleware vs compression + static assets)
//! - Register the catch-all handler that renders every path
//! - Bind the listener, unless test mode drives the router in memory
//!
//! # Per-request protocol
//! ```text
//! original URL (path + query)
//!     → strategy.acquire_template(url)
//!     → strategy.acquire_renderer()
//!     → renderer.render(url, manifest)
//!     → template::assemble
//!     → 200 text/html
//! any failure → remap stack (dev, best-effort) → log → 500 plaintext
//! ```

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::{ServerConfig, ServerMode};
use crate::devserver::{DevServer, DevServerFactory, DevServerOptions};
use crate::http::middleware::ForeignMiddlewareLayer;
use crate::ssr::error::ServeError;
use crate::ssr::manifest::Manifest;
use crate::ssr::render::Renderer;
use crate::ssr::strategy::{DevelopmentStrategy, ProductionStrategy, RenderStrategy};
use crate::ssr::template;

/// What the embedding application supplies: a way to start the bundler's
/// dev server, and the prebuilt render entry for production. Only the hook
/// matching the configured mode is consulted.
#[derive(Default)]
pub struct Hooks {
    pub dev_server: Option<Arc<dyn DevServerFactory>>,
    pub server_entry: Option<Arc<dyn Renderer>>,
}

impl Hooks {
    pub fn development(factory: Arc<dyn DevServerFactory>) -> Self {
        Self {
            dev_server: Some(factory),
            ..Self::default()
        }
    }

    pub fn production(server_entry: Arc<dyn Renderer>) -> Self {
        Self {
            server_entry: Some(server_entry),
            ..Self::default()
        }
    }
}

/// State injected into the catch-all handler. Read-only after startup.
#[derive(Clone)]
struct AppState {
    strategy: Arc<dyn RenderStrategy>,
    manifest: Arc<Manifest>,
}

/// The configured SSR server.
///
/// Construction performs all startup side effects but binds nothing; a
/// test harness can drive [`SsrServer::router`] directly, while
/// [`SsrServer::run`] starts the listener.
pub struct SsrServer {
    router: Router,
    config: ServerConfig,
    dev_server: Option<Arc<dyn DevServer>>,
}

impl std::fmt::Debug for SsrServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SsrServer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SsrServer {
    /// Build the server for the configured mode.
    ///
    /// Production reads the template and manifest from the build output
    /// once and serves static assets with compression. Development starts
    /// a dev server through the factory and installs its middleware; the
    /// template and render function are then re-resolved on every request.
    pub async fn new(config: ServerConfig, hooks: Hooks) -> Result<Self, ServeError> {
        match config.mode {
            ServerMode::Production => Self::production(config, hooks),
            ServerMode::Development => Self::development(config, hooks).await,
        }
    }

    fn production(config: ServerConfig, hooks: Hooks) -> Result<Self, ServeError> {
        let renderer = hooks.server_entry.ok_or(ServeError::MissingServerEntry)?;

        // Read once; every request sees this exact byte sequence.
        let template = std::fs::read_to_string(config.prod_template())?;
        let manifest = Arc::new(Manifest::load(&config.manifest_path())?);

        tracing::info!(
            template_bytes = template.len(),
            manifest_empty = manifest.is_empty(),
            "production assets loaded"
        );

        let state = AppState {
            strategy: Arc::new(ProductionStrategy::new(template, renderer)),
            manifest,
        };

        // Static assets are looked up first. Directory index lookup is
        // disabled so the extensionless index route falls through to the
        // catch-all handler instead of the static server.
        let assets = ServeDir::new(config.client_dir())
            .append_index_html_on_directories(false)
            .fallback(ssr_router(state));

        let router = Router::new()
            .fallback_service(assets)
            .layer(CompressionLayer::new())
            .layer(TraceLayer::new_for_http());

        Ok(Self {
            router,
            config,
            dev_server: None,
        })
    }

    async fn development(config: ServerConfig, hooks: Hooks) -> Result<Self, ServeError> {
        let factory = hooks.dev_server.ok_or(ServeError::MissingDevServer)?;

        let options = DevServerOptions::for_root(config.root.clone(), config.test_mode);
        let dev = factory.create(options).await?;

        tracing::info!(root = %config.root.display(), "dev server started in middleware mode");

        let state = AppState {
            strategy: Arc::new(DevelopmentStrategy::new(config.index_html(), dev.clone())),
            manifest: Arc::new(Manifest::default()),
        };

        let router = ssr_router(state)
            .layer(ForeignMiddlewareLayer::new(dev.middleware()))
            .layer(TraceLayer::new_for_http());

        Ok(Self {
            router,
            config,
            dev_server: Some(dev),
        })
    }

    /// The in-memory router; drives requests without a network listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The dev-server handle, present in development mode.
    pub fn dev_server(&self) -> Option<Arc<dyn DevServer>> {
        self.dev_server.clone()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Start serving. Test mode suppresses the listener and hands the
    /// server back so a harness can drive [`SsrServer::router`] in memory;
    /// otherwise this binds and serves until the process is stopped.
    pub async fn start(self) -> Result<Option<Self>, std::io::Error> {
        if self.config.test_mode {
            return Ok(Some(self));
        }
        self.run().await?;
        Ok(None)
    }

    /// Bind the listener and serve until the process is stopped.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(&self.config.bind_address).await?;
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "SSR server listening");

        axum::serve(listener, self.router).await
    }
}

/// The catch-all routes: every path, every method, one handler.
fn ssr_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(render_handler))
        .route("/{*path}", any(render_handler))
        .with_state(state)
}

async fn render_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let url = request
        .uri()
        .path_and_query()
        .map_or_else(|| request.uri().path().to_string(), |pq| pq.as_str().to_string());

    tracing::debug!(url = %url, "rendering");

    match render_page(&state, &url).await {
        Ok(html) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html")],
            html,
        )
            .into_response(),
        Err(err) => {
            let stack = err.stack();
            let stack = state.strategy.remap_stack(&stack).unwrap_or(stack);
            tracing::error!(url = %url, error = %stack, "render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, stack).into_response()
        }
    }
}

/// The five-step protocol, strictly sequential within a request.
async fn render_page(state: &AppState, url: &str) -> Result<String, ServeError> {
    let template = state.strategy.acquire_template(url).await?;
    let renderer = state.strategy.acquire_renderer().await?;
    let page = renderer.render(url, &state.manifest).await?;
    Ok(template::assemble(&template, &page))
}
