//! The handler-boundary error type.

use thiserror::Error;

use crate::devserver::DevServerError;
use crate::ssr::manifest::ManifestError;
use crate::ssr::render::RenderError;

/// Any failure between receiving a request and assembling its HTML, plus
/// the startup failures of the bootstrap itself.
///
/// All per-request variants are handled identically: caught at the
/// catch-all handler, logged, and returned as a 500 with the error text as
/// the body.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("failed to read template: {0}")]
    Template(#[from] std::io::Error),

    #[error("dev server failure: {0}")]
    DevServer(#[from] DevServerError),

    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    #[error("failed to load ssr manifest: {0}")]
    Manifest(#[from] ManifestError),

    #[error("development mode requires a dev server factory")]
    MissingDevServer,

    #[error("production mode requires a prebuilt server entry")]
    MissingServerEntry,
}

impl ServeError {
    /// Render the error and its source chain as diagnostic text, one frame
    /// per line. This is what gets logged and written into the 500 body.
    pub fn stack(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            out.push_str("\n    caused by: ");
            out.push_str(&cause.to_string());
            source = cause.source();
        }
        out
    }
}
