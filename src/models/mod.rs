//! Model artifacts, loading and inference

pub mod inference;
pub mod linear;
pub mod loader;
pub mod onnx;

pub use inference::InferenceEngine;
pub use linear::LinearRegressor;
pub use loader::ModelLoader;
pub use onnx::OnnxRegressor;

use crate::error::PredictionError;
use crate::types::request::PredictionRequest;
use std::sync::Arc;

/// A trained regression model, treated as a black box.
///
/// Implementations return one prediction per input row; callers only send
/// single-row requests and consume index 0.
pub trait Regressor: Send + Sync {
    /// Model name used in logs and responses
    fn name(&self) -> &str;

    /// Feature names the model was trained on, when the artifact records them
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// Run inference on one labeled record
    fn predict(&self, request: &PredictionRequest) -> Result<Vec<f64>, PredictionError>;
}

/// Shared, immutable reference to a loaded model
pub type PredictorHandle = Arc<dyn Regressor>;

/// Fail with [`PredictionError::SchemaMismatch`] unless the request columns
/// match `expected` exactly, in order.
pub fn check_schema(expected: &[String], request: &PredictionRequest) -> Result<(), PredictionError> {
    let found = request.names();
    let matches = found.len() == expected.len()
        && found.iter().zip(expected).all(|(a, b)| *a == b.as_str());
    if matches {
        return Ok(());
    }

    Err(PredictionError::SchemaMismatch {
        expected: expected.to_vec(),
        found: found.into_iter().map(str::to_string).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::request::FEATURE_SCHEMA;

    fn schema() -> Vec<String> {
        FEATURE_SCHEMA.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_schema_matches() {
        let request = PredictionRequest::from_parameters(&Default::default());
        assert!(check_schema(&schema(), &request).is_ok());
    }

    #[test]
    fn test_schema_order_matters() {
        let request = PredictionRequest::from_columns([
            ("% Iron Concentrate", 66.0),
            ("Amina Flow", 540.0),
            ("Flotation Column 03 Air Flow", 250.0),
        ]);

        match check_schema(&schema(), &request) {
            Err(PredictionError::SchemaMismatch { found, .. }) => {
                assert_eq!(found[0], "% Iron Concentrate");
            }
            other => panic!("expected schema mismatch, got {:?}", other),
        }
    }
}
