//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Serving mode, fixed at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerMode {
    /// Templates and the render function are re-resolved on every request
    /// through the bundler's dev server, so edits apply without restart.
    #[default]
    Development,

    /// Template, manifest and render function are resolved once at startup
    /// and cached for the process lifetime.
    Production,
}

/// Root configuration for the SSR server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Project root directory. The development template (`index.html`) and
    /// the build output directory are resolved relative to this.
    pub root: PathBuf,

    /// Development or production serving.
    pub mode: ServerMode,

    /// Suppresses the TCP listener and dev-server log output so a test
    /// harness can drive the server programmatically.
    pub test_mode: bool,

    /// Bind address for the listener.
    pub bind_address: String,

    /// Client build output directory, relative to `root`. Holds the
    /// production template, the SSR manifest and the static assets.
    pub client_dist: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            mode: ServerMode::Development,
            test_mode: false,
            bind_address: "0.0.0.0:3000".to_string(),
            client_dist: PathBuf::from("dist/client"),
        }
    }
}

impl ServerConfig {
    /// Build a config from the environment: `SSR_MODE=production` selects
    /// production, anything else (including unset) selects development;
    /// `SSR_TEST` set to a non-empty value enables test mode.
    pub fn from_env() -> Self {
        let mode = match std::env::var("SSR_MODE") {
            Ok(v) if v == "production" => ServerMode::Production,
            _ => ServerMode::Development,
        };
        let test_mode = std::env::var("SSR_TEST").is_ok_and(|v| !v.is_empty());

        Self {
            mode,
            test_mode,
            ..Self::default()
        }
    }

    /// Development template, re-read from disk on every request.
    pub fn index_html(&self) -> PathBuf {
        self.root.join("index.html")
    }

    /// Client build output directory.
    pub fn client_dir(&self) -> PathBuf {
        self.root.join(&self.client_dist)
    }

    /// Production template, read once at startup.
    pub fn prod_template(&self) -> PathBuf {
        self.client_dir().join("index.html")
    }

    /// SSR manifest produced by the client build.
    pub fn manifest_path(&self) -> PathBuf {
        self.client_dir().join("ssr-manifest.json")
    }
}
