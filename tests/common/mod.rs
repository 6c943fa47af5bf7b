//! Shared stubs and scaffolding for integration tests.
#![allow(dead_code)] // each test binary uses a subset of these helpers

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use ssr_serve::devserver::{
    DevServer, DevServerError, DevServerFactory, DevServerOptions,
};
use ssr_serve::http::{ForeignMiddleware, ForeignOutcome};
use ssr_serve::ssr::{Manifest, RenderError, RenderedPage, Renderer};
use ssr_serve::{ServerConfig, ServerMode};

/// Renderer resolving to fixed fragments.
pub struct StubRenderer {
    pub app_html: String,
    pub preload_links: String,
}

impl StubRenderer {
    pub fn new(app_html: &str, preload_links: &str) -> Arc<Self> {
        Arc::new(Self {
            app_html: app_html.to_string(),
            preload_links: preload_links.to_string(),
        })
    }
}

#[async_trait]
impl Renderer for StubRenderer {
    async fn render(&self, _url: &str, _manifest: &Manifest) -> Result<RenderedPage, RenderError> {
        Ok(RenderedPage {
            app_html: self.app_html.clone(),
            preload_links: self.preload_links.clone(),
        })
    }
}

/// Renderer that always rejects with a fixed message.
pub struct FailingRenderer(pub &'static str);

#[async_trait]
impl Renderer for FailingRenderer {
    async fn render(&self, _url: &str, _manifest: &Manifest) -> Result<RenderedPage, RenderError> {
        Err(RenderError::new(self.0))
    }
}

/// Renderer that echoes the URL, failing only for URLs containing "fail".
/// Lets one in-flight request error while a concurrent one succeeds.
pub struct PathSensitiveRenderer;

#[async_trait]
impl Renderer for PathSensitiveRenderer {
    async fn render(&self, url: &str, _manifest: &Manifest) -> Result<RenderedPage, RenderError> {
        if url.contains("fail") {
            return Err(RenderError::new("boom"));
        }
        Ok(RenderedPage {
            app_html: format!("<div>{url}</div>"),
            preload_links: String::new(),
        })
    }
}

/// Renderer that derives preload links from the manifest, to prove the
/// startup-loaded manifest reaches render calls.
pub struct ManifestRenderer {
    pub module_id: &'static str,
}

#[async_trait]
impl Renderer for ManifestRenderer {
    async fn render(&self, _url: &str, manifest: &Manifest) -> Result<RenderedPage, RenderError> {
        let links = manifest
            .preload_assets(self.module_id)
            .unwrap_or_default()
            .iter()
            .map(|asset| format!("<link rel=\"preload\" href=\"{asset}\">"))
            .collect();
        Ok(RenderedPage {
            app_html: "<div>app</div>".to_string(),
            preload_links: links,
        })
    }
}

/// Foreign middleware that forwards everything untouched.
pub struct PassthroughMiddleware;

#[async_trait]
impl ForeignMiddleware for PassthroughMiddleware {
    async fn handle(&self, request: Request<Body>) -> ForeignOutcome {
        ForeignOutcome::Forward(request)
    }
}

/// Foreign middleware answering dev-client endpoints itself, the way a
/// bundler's middleware serves transformed modules.
pub struct DevEndpointMiddleware;

#[async_trait]
impl ForeignMiddleware for DevEndpointMiddleware {
    async fn handle(&self, request: Request<Body>) -> ForeignOutcome {
        if request.uri().path().starts_with("/@dev/") {
            let response = Response::builder()
                .status(200)
                .body(Body::from("pong"))
                .unwrap();
            return ForeignOutcome::Respond(response);
        }
        ForeignOutcome::Forward(request)
    }
}

/// Stub dev server: identity template transform, configurable render
/// entry, counters for observing per-request resolution.
pub struct StubDevServer {
    pub renderer: Arc<dyn Renderer>,
    pub middleware: Arc<dyn ForeignMiddleware>,
    /// Prefix prepended by `fix_stacktrace`; `None` disables remapping.
    pub remap_prefix: Option<&'static str>,
    pub entry_loads: AtomicUsize,
    pub transform_urls: Mutex<Vec<String>>,
}

impl StubDevServer {
    fn base(renderer: Arc<dyn Renderer>) -> Self {
        Self {
            renderer,
            middleware: Arc::new(PassthroughMiddleware),
            remap_prefix: None,
            entry_loads: AtomicUsize::new(0),
            transform_urls: Mutex::new(Vec::new()),
        }
    }

    pub fn new(renderer: Arc<dyn Renderer>) -> Arc<Self> {
        Arc::new(Self::base(renderer))
    }

    pub fn with_middleware(
        renderer: Arc<dyn Renderer>,
        middleware: Arc<dyn ForeignMiddleware>,
    ) -> Arc<Self> {
        Arc::new(Self {
            middleware,
            ..Self::base(renderer)
        })
    }

    pub fn with_remap(renderer: Arc<dyn Renderer>, prefix: &'static str) -> Arc<Self> {
        Arc::new(Self {
            remap_prefix: Some(prefix),
            ..Self::base(renderer)
        })
    }
}

#[async_trait]
impl DevServer for StubDevServer {
    fn middleware(&self) -> Arc<dyn ForeignMiddleware> {
        self.middleware.clone()
    }

    async fn transform_index_html(
        &self,
        url: &str,
        html: &str,
    ) -> Result<String, DevServerError> {
        self.transform_urls.lock().unwrap().push(url.to_string());
        Ok(html.to_string())
    }

    async fn load_server_entry(&self) -> Result<Arc<dyn Renderer>, DevServerError> {
        self.entry_loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.renderer.clone())
    }

    fn fix_stacktrace(&self, stack: &str) -> Option<String> {
        self.remap_prefix
            .map(|prefix| format!("{prefix}\n{stack}"))
    }
}

/// Factory handing out a fixed dev server and recording the options the
/// bootstrap configured it with.
pub struct RecordingFactory {
    pub dev: Arc<StubDevServer>,
    pub options: Mutex<Option<DevServerOptions>>,
}

impl RecordingFactory {
    pub fn new(dev: Arc<StubDevServer>) -> Arc<Self> {
        Arc::new(Self {
            dev,
            options: Mutex::new(None),
        })
    }
}

#[async_trait]
impl DevServerFactory for RecordingFactory {
    async fn create(
        &self,
        options: DevServerOptions,
    ) -> Result<Arc<dyn DevServer>, DevServerError> {
        *self.options.lock().unwrap() = Some(options);
        Ok(self.dev.clone())
    }
}

/// Build-output scaffold for production mode: template + manifest under
/// `dist/client` in a temp dir.
pub fn prod_scaffold(template: &str, manifest_json: &str) -> (TempDir, ServerConfig) {
    let dir = tempfile::tempdir().unwrap();
    let client = dir.path().join("dist/client");
    std::fs::create_dir_all(&client).unwrap();
    std::fs::write(client.join("index.html"), template).unwrap();
    std::fs::write(client.join("ssr-manifest.json"), manifest_json).unwrap();

    let config = ServerConfig {
        root: dir.path().to_path_buf(),
        mode: ServerMode::Production,
        test_mode: true,
        ..Default::default()
    };
    (dir, config)
}

/// Project-root scaffold for development mode: `index.html` in a temp dir.
pub fn dev_scaffold(template: &str) -> (TempDir, ServerConfig) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), template).unwrap();

    let config = ServerConfig {
        root: dir.path().to_path_buf(),
        mode: ServerMode::Development,
        test_mode: true,
        ..Default::default()
    };
    (dir, config)
}

/// Drive one GET through the in-memory router.
pub async fn get(router: &Router, uri: &str) -> Response {
    router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
