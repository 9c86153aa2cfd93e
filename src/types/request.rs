//! Single-row model input built from the operating parameters

use crate::types::parameters::InputParameters;
use serde::Serialize;

/// Column names and order the model was trained on
pub const FEATURE_SCHEMA: [&str; 3] = [
    "Amina Flow",
    "Flotation Column 03 Air Flow",
    "% Iron Concentrate",
];

/// A labeled single-row record matching [`FEATURE_SCHEMA`].
///
/// Built fresh on every trigger and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    columns: Vec<(String, f64)>,
}

impl PredictionRequest {
    /// Map the operating parameters onto the trained feature schema.
    pub fn from_parameters(params: &InputParameters) -> Self {
        let values = [
            params.amine_flow as f64,
            params.air_flow as f64,
            params.iron_concentrate,
        ];

        Self {
            columns: FEATURE_SCHEMA
                .iter()
                .zip(values)
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }

    /// Build a record from arbitrary columns, in the given order.
    pub fn from_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            columns: columns
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    pub fn columns(&self) -> &[(String, f64)] {
        &self.columns
    }

    /// Column names in order
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Row values in column order
    pub fn values(&self) -> Vec<f64> {
        self.columns.iter().map(|(_, value)| *value).collect()
    }

    /// Look up a single column by name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| *value)
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters_map_to_schema() {
        let request = PredictionRequest::from_parameters(&InputParameters::new(66.0, 540, 250));

        assert_eq!(
            request.names(),
            vec!["Amina Flow", "Flotation Column 03 Air Flow", "% Iron Concentrate"]
        );
        assert_eq!(request.values(), vec![540.0, 250.0, 66.0]);
        assert_eq!(request.get("Amina Flow"), Some(540.0));
        assert_eq!(request.get("% Iron Concentrate"), Some(66.0));
        assert_eq!(request.get("Ore Pulp pH"), None);
    }

    #[test]
    fn test_negative_air_flow_is_kept() {
        let request = PredictionRequest::from_parameters(&InputParameters::new(60.0, 240, -175));
        assert_eq!(request.get("Flotation Column 03 Air Flow"), Some(-175.0));
        assert_eq!(request.width(), FEATURE_SCHEMA.len());
    }
}
