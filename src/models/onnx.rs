//! ONNX regression model run through ONNX Runtime

use crate::error::{ModelLoadError, PredictionError};
use crate::models::Regressor;
use crate::types::request::PredictionRequest;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

/// Loaded ONNX model with metadata
pub struct OnnxRegressor {
    /// Model name
    name: String,
    /// ONNX Runtime session; `run` needs exclusive access
    session: Mutex<Session>,
    /// Input name for the feature tensor
    input_name: String,
    /// Output name for the predictions
    output_name: String,
}

impl OnnxRegressor {
    /// Load an ONNX model from file
    pub fn from_file<P: AsRef<Path>>(path: P, onnx_threads: usize) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "onnx".to_string());

        info!(model = %name, path = %path.display(), threads = onnx_threads, "Loading ONNX model");

        ort::init()
            .commit()
            .map_err(|e| ModelLoadError::unreadable(path, e))?;

        let session =
            build_session(path, onnx_threads).map_err(|e| ModelLoadError::unreadable(path, e))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "float_input".to_string());

        // Regression exports name their output "variable"; prefer it when present
        let output_name = session
            .outputs
            .iter()
            .find(|o| o.name.contains("variable") || o.name.contains("output"))
            .or_else(|| session.outputs.first())
            .map(|o| o.name.clone())
            .unwrap_or_else(|| "variable".to_string());

        info!(
            model = %name,
            input = %input_name,
            output = %output_name,
            "Model loaded successfully"
        );

        Ok(Self {
            name,
            session: Mutex::new(session),
            input_name,
            output_name,
        })
    }
}

fn build_session(path: &Path, onnx_threads: usize) -> ort::Result<Session> {
    Session::builder()?
        .with_optimization_level(GraphOptimizationLevel::Level3)?
        .with_intra_threads(onnx_threads)?
        .commit_from_file(path)
}

impl Regressor for OnnxRegressor {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, request: &PredictionRequest) -> Result<Vec<f64>, PredictionError> {
        // Prepare input tensor - shape [1, num_features]
        let values: Vec<f32> = request.values().iter().map(|&v| v as f32).collect();
        let shape = vec![1_i64, values.len() as i64];
        let input_tensor = Tensor::from_array((shape, values)).map_err(PredictionError::inference)?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| PredictionError::inference(format!("Lock error: {}", e)))?;

        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input_tensor])
            .map_err(PredictionError::inference)?;

        let output = outputs.get(self.output_name.as_str()).ok_or_else(|| {
            PredictionError::inference(format!("model has no output named '{}'", self.output_name))
        })?;

        // XGBoost exports float32; some sklearn converters emit float64
        let predictions: Vec<f64> = match output.try_extract_tensor::<f32>() {
            Ok((_, data)) => data.iter().map(|&v| v as f64).collect(),
            Err(_) => {
                let (_, data) = output
                    .try_extract_tensor::<f64>()
                    .map_err(PredictionError::inference)?;
                data.to_vec()
            }
        };

        debug!(model = %self.name, predictions = ?predictions, "ONNX inference complete");
        Ok(predictions)
    }
}
