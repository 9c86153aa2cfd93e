//! Linear regression artifact stored as JSON

use crate::error::{ModelLoadError, PredictionError};
use crate::models::{check_schema, Regressor};
use crate::types::request::PredictionRequest;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Coefficients of a fitted linear model, keyed by trained feature order.
///
/// ```json
/// {
///   "name": "silica-linear",
///   "feature_names": ["Amina Flow", "Flotation Column 03 Air Flow", "% Iron Concentrate"],
///   "coefficients": [0.0012, -0.0021, -0.31],
///   "intercept": 22.4
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    #[serde(default = "default_name")]
    pub name: String,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

fn default_name() -> String {
    "linear".to_string()
}

impl LinearRegressor {
    pub fn new(
        name: impl Into<String>,
        feature_names: Vec<String>,
        coefficients: Vec<f64>,
        intercept: f64,
    ) -> Self {
        Self {
            name: name.into(),
            feature_names,
            coefficients,
            intercept,
        }
    }

    /// Read and validate a JSON artifact
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| ModelLoadError::unreadable(path, e))?;
        let model: LinearRegressor =
            serde_json::from_slice(&bytes).map_err(|e| ModelLoadError::unreadable(path, e))?;

        if model.coefficients.len() != model.feature_names.len() {
            return Err(ModelLoadError::unreadable(
                path,
                format!(
                    "{} coefficients for {} features",
                    model.coefficients.len(),
                    model.feature_names.len()
                ),
            ));
        }

        Ok(model)
    }
}

impl Regressor for LinearRegressor {
    fn name(&self) -> &str {
        &self.name
    }

    fn feature_names(&self) -> Option<&[String]> {
        Some(&self.feature_names)
    }

    fn predict(&self, request: &PredictionRequest) -> Result<Vec<f64>, PredictionError> {
        check_schema(&self.feature_names, request)?;

        let value = request
            .values()
            .iter()
            .zip(&self.coefficients)
            .fold(self.intercept, |acc, (x, w)| acc + x * w);

        debug!(model = %self.name, prediction = value, "Linear model evaluated");
        Ok(vec![value])
    }
}
