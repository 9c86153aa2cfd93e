//! Prediction invoker: turns operating parameters into one model call

use crate::error::PredictionError;
use crate::models::PredictorHandle;
use crate::types::parameters::InputParameters;
use crate::types::prediction::PredictionResult;
use crate::types::request::PredictionRequest;
use std::time::Instant;
use tracing::{debug, error, info};

/// Runs a loaded model on the current control values
#[derive(Clone)]
pub struct InferenceEngine {
    model: PredictorHandle,
}

impl InferenceEngine {
    pub fn new(model: PredictorHandle) -> Self {
        if let Some(features) = model.feature_names() {
            info!(model = %model.name(), features = ?features, "Inference engine initialized");
        } else {
            info!(model = %model.name(), "Inference engine initialized");
        }
        Self { model }
    }

    /// Name of the underlying model
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Run one synchronous prediction. No retries, no batching.
    pub fn predict(&self, params: &InputParameters) -> Result<PredictionResult, PredictionError> {
        let start = Instant::now();
        let request = PredictionRequest::from_parameters(params);

        debug!(
            model = %self.model.name(),
            columns = ?request.columns(),
            "Running inference"
        );

        let result = self
            .model
            .predict(&request)
            .and_then(|predictions| first_prediction(&predictions));

        match result {
            Ok(value) => {
                debug!(
                    model = %self.model.name(),
                    prediction = value,
                    latency_us = start.elapsed().as_micros() as u64,
                    "Inference complete"
                );
                Ok(PredictionResult::new(value, self.model.name()))
            }
            Err(e) => {
                error!(model = %self.model.name(), error = %e, "Inference failed");
                Err(e)
            }
        }
    }
}

/// Only index 0 of the model output is consumed
fn first_prediction(predictions: &[f64]) -> Result<f64, PredictionError> {
    let value = *predictions.first().ok_or(PredictionError::EmptyOutput)?;
    if !value.is_finite() {
        return Err(PredictionError::NonFinite(value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LinearRegressor, Regressor};
    use crate::types::request::FEATURE_SCHEMA;
    use std::sync::Arc;

    struct FixedOutput(Vec<f64>);

    impl Regressor for FixedOutput {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict(&self, _request: &PredictionRequest) -> Result<Vec<f64>, PredictionError> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    impl Regressor for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn predict(&self, _request: &PredictionRequest) -> Result<Vec<f64>, PredictionError> {
            Err(PredictionError::inference("could not convert string to float"))
        }
    }

    #[test]
    fn test_predict_consumes_first_value() {
        let engine = InferenceEngine::new(Arc::new(FixedOutput(vec![2.345, 9.0])));
        let result = engine.predict(&InputParameters::default()).unwrap();

        assert_eq!(result.silica_percentage, 2.345);
        assert_eq!(result.model, "fixed");
    }

    #[test]
    fn test_empty_and_non_finite_output() {
        let empty = InferenceEngine::new(Arc::new(FixedOutput(vec![])));
        assert_eq!(
            empty.predict(&InputParameters::default()).unwrap_err(),
            PredictionError::EmptyOutput
        );

        let nan = InferenceEngine::new(Arc::new(FixedOutput(vec![f64::NAN])));
        assert!(matches!(
            nan.predict(&InputParameters::default()).unwrap_err(),
            PredictionError::NonFinite(_)
        ));
    }

    #[test]
    fn test_model_failure_keeps_cause() {
        let engine = InferenceEngine::new(Arc::new(Failing));
        let err = engine.predict(&InputParameters::default()).unwrap_err();
        assert!(err.to_string().contains("could not convert string to float"));
    }

    #[test]
    fn test_linear_model_end_to_end() {
        let model = LinearRegressor::new(
            "linear",
            FEATURE_SCHEMA.iter().map(|s| s.to_string()).collect(),
            vec![0.0, 0.0, 0.5],
            -30.0,
        );
        let engine = InferenceEngine::new(Arc::new(model));

        let result = engine.predict(&InputParameters::new(66.0, 540, 250)).unwrap();
        assert!((result.silica_percentage - 3.0).abs() < 1e-9);
        assert_eq!(result.formatted(), "3.00%");
    }
}
