//! Shared server state

use crate::error::ModelLoadError;
use crate::metrics::PredictionMetrics;
use crate::models::{InferenceEngine, ModelLoader};
use crate::session::Session;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// State shared by every request handler.
///
/// Holds the outcome of the one startup load; each request builds its own
/// [`Session`] from it.
#[derive(Clone)]
pub struct AppState {
    engine: Result<InferenceEngine, ModelLoadError>,
    model_path: PathBuf,
    metrics: Arc<PredictionMetrics>,
}

impl AppState {
    pub fn new(
        engine: Result<InferenceEngine, ModelLoadError>,
        model_path: impl Into<PathBuf>,
        metrics: Arc<PredictionMetrics>,
    ) -> Self {
        Self {
            engine,
            model_path: model_path.into(),
            metrics,
        }
    }

    /// Load the model through `loader` and build the state around the result
    pub fn load(loader: &ModelLoader, model_path: &Path, metrics: Arc<PredictionMetrics>) -> Self {
        let engine = loader.load(model_path).map(InferenceEngine::new);
        Self::new(engine, model_path, metrics)
    }

    /// Fresh session with default control values
    pub fn session(&self) -> Session {
        Session::new(self.engine.clone())
    }

    pub fn model_loaded(&self) -> bool {
        self.engine.is_ok()
    }

    pub fn model_name(&self) -> Option<&str> {
        self.engine.as_ref().ok().map(|e| e.model_name())
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn metrics(&self) -> &Arc<PredictionMetrics> {
        &self.metrics
    }
}
