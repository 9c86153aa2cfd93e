//! JSON response envelope

use serde::{Deserialize, Serialize};

/// Common API response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Response payload
    pub data: Option<T>,
    /// Error message
    pub error: Option<String>,
    /// Machine-readable error kind
    pub kind: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            kind: None,
        }
    }

    pub fn error(kind: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
            kind: Some(kind.into()),
        }
    }
}

/// Body of a successful `/api/v1/predict` call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction_id: String,
    pub silica_percentage: f64,
    /// Two-decimal display string, e.g. `1.23%`
    pub formatted: String,
    pub model: String,
}
