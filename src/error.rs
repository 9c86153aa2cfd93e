//! Error types for model loading, input validation and inference

use std::path::PathBuf;
use thiserror::Error;

/// Failure to bring the model artifact into memory.
///
/// Never fatal: the session falls back to the disabled state and keeps
/// showing a warning.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelLoadError {
    #[error("model artifact not found at {}", path.display())]
    Missing { path: PathBuf },

    #[error("failed to read model artifact {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("unsupported model artifact format '{extension}' for {}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },
}

impl ModelLoadError {
    /// Path of the artifact that failed to load
    pub fn path(&self) -> &PathBuf {
        match self {
            ModelLoadError::Missing { path }
            | ModelLoadError::Unreadable { path, .. }
            | ModelLoadError::UnsupportedFormat { path, .. } => path,
        }
    }

    pub(crate) fn unreadable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ModelLoadError::Unreadable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Failure raised while running the model on one request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("feature schema mismatch: model expects {expected:?}, request has {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("model inference failed: {0}")]
    Inference(String),

    #[error("model returned no predictions")]
    EmptyOutput,

    #[error("model returned a non-finite prediction ({0})")]
    NonFinite(f64),
}

impl PredictionError {
    pub(crate) fn inference(cause: impl ToString) -> Self {
        PredictionError::Inference(cause.to_string())
    }
}

/// A control value rejected by the input collector
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid value '{value}' for {field}: {reason}")]
pub struct ParameterError {
    pub field: &'static str,
    pub value: String,
    pub reason: String,
}

/// Top-level error aggregating every failure the presenter can render
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    ModelLoad(#[from] ModelLoadError),

    #[error(transparent)]
    Prediction(#[from] PredictionError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_carries_path() {
        let err = ModelLoadError::Missing {
            path: PathBuf::from("model.onnx"),
        };
        assert_eq!(err.path(), &PathBuf::from("model.onnx"));
        assert!(err.to_string().contains("model.onnx"));
    }

    #[test]
    fn test_prediction_error_keeps_cause() {
        let err = PredictionError::inference("shape [1, 2] does not match [1, 3]");
        assert!(err.to_string().contains("shape [1, 2]"));

        let wrapped: Error = err.into();
        assert!(matches!(wrapped, Error::Prediction(_)));
    }
}
