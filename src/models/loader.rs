//! Model artifact loader with a per-path cache

use crate::error::ModelLoadError;
use crate::models::{LinearRegressor, OnnxRegressor, PredictorHandle};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::{debug, info, warn};

static GLOBAL_LOADER: OnceLock<ModelLoader> = OnceLock::new();

/// Loads model artifacts once and hands out shared handles
pub struct ModelLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
    /// Handles already loaded, keyed by the path they were requested with
    cache: RwLock<HashMap<PathBuf, PredictorHandle>>,
}

impl ModelLoader {
    /// Create a new model loader with default settings (1 thread)
    pub fn new() -> Self {
        Self::with_threads(1)
    }

    /// Create a new model loader with specified number of threads
    pub fn with_threads(onnx_threads: usize) -> Self {
        Self {
            onnx_threads: onnx_threads.max(1),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Process-wide loader, created on first use
    pub fn global() -> &'static ModelLoader {
        GLOBAL_LOADER.get_or_init(ModelLoader::new)
    }

    /// Initialise the process-wide loader; later calls return the first one.
    pub fn init_global(onnx_threads: usize) -> &'static ModelLoader {
        GLOBAL_LOADER.get_or_init(|| ModelLoader::with_threads(onnx_threads))
    }

    /// Load the artifact at `path`, reusing the cached handle when present.
    ///
    /// Failures are returned, never cached, and never panic.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<PredictorHandle, ModelLoadError> {
        let path = path.as_ref();

        if let Some(handle) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
        {
            debug!(path = %path.display(), "Model cache hit");
            return Ok(handle.clone());
        }

        let handle = match self.load_uncached(path) {
            Ok(handle) => handle,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load model");
                return Err(e);
            }
        };

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let handle = cache.entry(path.to_path_buf()).or_insert(handle).clone();

        info!(
            model = %handle.name(),
            path = %path.display(),
            "Model loaded and cached"
        );

        Ok(handle)
    }

    /// Number of cached handles
    pub fn cached_count(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn load_uncached(&self, path: &Path) -> Result<PredictorHandle, ModelLoadError> {
        if !path.is_file() {
            return Err(ModelLoadError::Missing {
                path: path.to_path_buf(),
            });
        }

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "onnx" => Ok(Arc::new(OnnxRegressor::from_file(path, self.onnx_threads)?)),
            "json" => Ok(Arc::new(LinearRegressor::from_file(path)?)),
            _ => Err(ModelLoadError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new()
    }
}
