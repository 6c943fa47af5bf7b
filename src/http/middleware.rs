//! Foreign-middleware adapter.
//!
//! The bundler's dev server hands out middleware written against a
//! connect-style convention: given a request it either writes a complete
//! response itself or passes the (possibly modified) request on to the
//! next handler. Tower expresses the same idea as a `Service` wrapping an
//! inner `Service`. This module is the translation layer between the two
//! conventions and contains no business logic, so it can be tested on its
//! own with a stub foreign middleware.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use tower::{Layer, Service};

/// What a foreign middleware did with a request.
pub enum ForeignOutcome {
    /// The middleware produced the full response; the pipeline stops here.
    Respond(Response),

    /// The middleware passed the request on, possibly after modifying it.
    Forward(Request<Body>),
}

/// A request handler written against the connect-style convention.
#[async_trait]
pub trait ForeignMiddleware: Send + Sync {
    async fn handle(&self, request: Request<Body>) -> ForeignOutcome;
}

/// Tower layer installing a foreign middleware in front of a service.
#[derive(Clone)]
pub struct ForeignMiddlewareLayer {
    middleware: Arc<dyn ForeignMiddleware>,
}

impl ForeignMiddlewareLayer {
    pub fn new(middleware: Arc<dyn ForeignMiddleware>) -> Self {
        Self { middleware }
    }
}

impl<S> Layer<S> for ForeignMiddlewareLayer {
    type Service = ForeignMiddlewareService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ForeignMiddlewareService {
            inner,
            middleware: self.middleware.clone(),
        }
    }
}

/// The adapted service: runs the foreign middleware first, then either
/// short-circuits with its response or calls the inner service.
#[derive(Clone)]
pub struct ForeignMiddlewareService<S> {
    inner: S,
    middleware: Arc<dyn ForeignMiddleware>,
}

impl<S> Service<Request<Body>> for ForeignMiddlewareService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let middleware = self.middleware.clone();
        // Swap in the clone so the polled-ready instance is the one driven.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            match middleware.handle(request).await {
                ForeignOutcome::Respond(response) => Ok(response),
                ForeignOutcome::Forward(request) => inner.call(request).await,
            }
        })
    }
}
