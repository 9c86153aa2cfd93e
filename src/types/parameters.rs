//! Operating parameters collected from the form

use serde::{Deserialize, Serialize};

/// Current values of the three plant operating controls.
///
/// Each field is independent; bounds and step granularity are enforced by
/// [`crate::controls::ControlPanel`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputParameters {
    /// Iron concentrate percentage
    pub iron_concentrate: f64,

    /// Amine flow
    pub amine_flow: i64,

    /// Flotation column 03 air flow
    pub air_flow: i64,
}

impl InputParameters {
    pub fn new(iron_concentrate: f64, amine_flow: i64, air_flow: i64) -> Self {
        Self {
            iron_concentrate,
            amine_flow,
            air_flow,
        }
    }
}

impl Default for InputParameters {
    fn default() -> Self {
        Self {
            iron_concentrate: 66.0,
            amine_flow: 540,
            air_flow: 250,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = InputParameters::default();
        assert_eq!(params.iron_concentrate, 66.0);
        assert_eq!(params.amine_flow, 540);
        assert_eq!(params.air_flow, 250);
    }

    #[test]
    fn test_json_field_names() {
        let params: InputParameters = serde_json::from_str(
            r#"{"iron_concentrate": 64.5, "amine_flow": 300, "air_flow": -20}"#,
        )
        .unwrap();
        assert_eq!(params, InputParameters::new(64.5, 300, -20));
    }
}
