//! Prediction output

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Predicted silica percentage for one trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Unique prediction identifier
    pub prediction_id: String,

    /// Predicted silica concentrate percentage
    pub silica_percentage: f64,

    /// Name of the model that produced the value
    pub model: String,

    /// Prediction timestamp
    pub timestamp: DateTime<Utc>,
}

impl PredictionResult {
    pub fn new(silica_percentage: f64, model: impl Into<String>) -> Self {
        Self {
            prediction_id: uuid::Uuid::new_v4().to_string(),
            silica_percentage,
            model: model.into(),
            timestamp: Utc::now(),
        }
    }

    /// Value formatted for display, e.g. `1.23%`
    pub fn formatted(&self) -> String {
        crate::presenter::format_percentage(self.silica_percentage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_ids_are_unique() {
        let a = PredictionResult::new(1.5, "linear");
        let b = PredictionResult::new(1.5, "linear");
        assert_ne!(a.prediction_id, b.prediction_id);
        assert_eq!(a.formatted(), "1.50%");
    }
}
