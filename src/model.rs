//! Locating, downloading and caching the tagger model.

use crate::errors::{Result, resource_unavailable};
use crate::perceptron::PerceptronModel;
use log::{debug, info};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// File name of the model inside the cache directory.
pub const MODEL_FILE: &str = "perceptron-tagger.json";

/// Where to look for the model.
#[derive(Clone, Debug, Default)]
pub struct ModelSource {
    /// Explicit model file or directory. If given, nothing else is tried.
    pub path: Option<PathBuf>,
    /// Where to fetch the model from if it is not in the cache.
    pub url: Option<String>,
    /// Cache directory; defaults to `$XDG_CACHE_HOME/mattr` or `~/.cache/mattr`.
    pub cache_dir: Option<PathBuf>,
}

impl ModelSource {
    pub fn cache_dir(&self) -> PathBuf {
        if let Some(dir) = &self.cache_dir {
            return dir.clone();
        }
        if let Some(dir) = env::var_os("XDG_CACHE_HOME") {
            return PathBuf::from(dir).join("mattr");
        }
        match env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(".cache").join("mattr"),
            None => PathBuf::from(".mattr-cache"),
        }
    }

    pub fn cached_file(&self) -> PathBuf {
        self.cache_dir().join(MODEL_FILE)
    }
}

/// Finds the model on disk, downloading it into the cache if needed.
pub fn locate(source: &ModelSource) -> Result<PathBuf> {
    if let Some(path) = &source.path {
        if path.exists() {
            return Ok(path.clone());
        }
        return Err(resource_unavailable(format!(
            "model not found: {}",
            path.display()
        )));
    }
    let cached = source.cached_file();
    if cached.exists() {
        debug!(target: "mattr", "model found in cache: {}", cached.display());
        return Ok(cached);
    }
    match &source.url {
        None => Err(resource_unavailable(format!(
            "no model in {} and no download URL given",
            cached.display()
        ))),
        Some(url) => {
            download(url, &cached).map_err(|e| {
                resource_unavailable(format!("cannot download model from {url}: {e}"))
            })?;
            Ok(cached)
        }
    }
}

fn download(url: &str, dest: &Path) -> Result<()> {
    info!(target: "mattr", "download: {url}");
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    let bytes = response.bytes()?;
    if let Some(dir) = dest.parent() {
        fs::create_dir_all(dir)?;
    }
    // a partial download never has the final name
    let partial = dest.with_extension("part");
    fs::write(&partial, &bytes)?;
    fs::rename(&partial, dest)?;
    info!(target: "mattr", "model saved: {} ({} bytes)", dest.display(), bytes.len());
    Ok(())
}

pub fn load(source: &ModelSource) -> Result<PerceptronModel> {
    let path = locate(source)?;
    info!(target: "mattr", "read model: {}", path.display());
    PerceptronModel::load(&path)
}

static SHARED_MODEL: OnceLock<std::result::Result<Arc<PerceptronModel>, String>> = OnceLock::new();

/// The process-wide model, loaded on first use.
///
/// Only the first call does any work; later calls get the same model (or the
/// same error) regardless of `source`.
pub fn shared_model(source: &ModelSource) -> std::result::Result<Arc<PerceptronModel>, String> {
    SHARED_MODEL
        .get_or_init(|| load(source).map(Arc::new).map_err(|e| e.to_string()))
        .clone()
}
