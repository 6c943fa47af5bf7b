//! SSR preload manifest.
//!
//! The client build emits `ssr-manifest.json`, a mapping from module id to
//! the asset paths that should be preloaded when that module is rendered.
//! Production loads it once at startup; development serves with an empty
//! manifest because the dev server resolves modules on demand.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Mapping from module id to preload asset paths.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Manifest(HashMap<String, Vec<String>>);

/// Failure to read or parse the manifest file.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Manifest {
    /// Load the manifest from a build artifact on disk.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    /// Preload asset paths for a module, if any were recorded.
    pub fn preload_assets(&self, module_id: &str) -> Option<&[String]> {
        self.0.get(module_id).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
