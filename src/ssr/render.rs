//! The render-function contract.
//!
//! The application owns a server-entry module whose exported render
//! function turns a request URL and the preload manifest into two HTML
//! fragments. This crate never inspects the fragments; it only places them
//! into the template.

use async_trait::async_trait;
use thiserror::Error;

use crate::ssr::manifest::Manifest;

/// The two fragments a render call yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// The rendered application markup, placed at the app-html marker.
    pub app_html: String,

    /// Preload `<link>` tags for the route's assets, placed at the
    /// preload-links marker.
    pub preload_links: String,
}

/// A failed render. Carries the message (and any stack text) the
/// application's render function produced.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct RenderError(String);

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The application's server-entry render function.
///
/// In development this is re-resolved from the server-entry module on every
/// request; in production it is resolved once from the prebuilt server
/// bundle and shared across requests.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, url: &str, manifest: &Manifest) -> Result<RenderedPage, RenderError>;
}
