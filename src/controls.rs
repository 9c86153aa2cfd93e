//! Bounded input controls for the plant operating parameters.
//!
//! Each control mirrors a slider: a fixed range, a fixed step and a default.
//! Fields are validated independently; there is no cross-field check.

use crate::error::ParameterError;
use crate::types::parameters::InputParameters;
use serde::{Deserialize, Serialize};

/// Tolerance used when checking that a float lies on the step grid
const STEP_EPSILON: f64 = 1e-6;

/// Numeric kind of a control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Float,
    Integer,
}

/// Static description of one slider control
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SliderSpec {
    /// Form field name
    pub key: &'static str,
    pub label: &'static str,
    pub caption: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
    pub kind: ValueKind,
    /// Reads the value this control drives
    #[serde(skip)]
    pub read: fn(&InputParameters) -> f64,
}

fn read_iron_concentrate(params: &InputParameters) -> f64 {
    params.iron_concentrate
}

fn read_amine_flow(params: &InputParameters) -> f64 {
    params.amine_flow as f64
}

fn read_air_flow(params: &InputParameters) -> f64 {
    params.air_flow as f64
}

pub const IRON_CONCENTRATE: SliderSpec = SliderSpec {
    key: "iron_concentrate",
    label: "% Iron Concentrate",
    caption: "Percentage of iron in the concentrate.",
    min: 60.0,
    max: 70.0,
    step: 0.05,
    default: 66.0,
    kind: ValueKind::Float,
    read: read_iron_concentrate,
};

pub const AMINE_FLOW: SliderSpec = SliderSpec {
    key: "amine_flow",
    label: "Amine flow",
    caption: "Amine flow.",
    min: 240.0,
    max: 740.0,
    step: 1.0,
    default: 540.0,
    kind: ValueKind::Integer,
    read: read_amine_flow,
};

pub const AIR_FLOW: SliderSpec = SliderSpec {
    key: "air_flow",
    label: "Flotation column air flow",
    caption: "Air flow in flotation column 03.",
    min: -175.0,
    max: 305.0,
    step: 1.0,
    default: 250.0,
    kind: ValueKind::Integer,
    read: read_air_flow,
};

/// All controls in display order
pub const CONTROLS: [SliderSpec; 3] = [IRON_CONCENTRATE, AMINE_FLOW, AIR_FLOW];

impl SliderSpec {
    /// Check range and step granularity for a candidate value.
    pub fn validate(&self, value: f64) -> Result<f64, ParameterError> {
        if !value.is_finite() {
            return Err(self.reject(value, "value must be a finite number"));
        }
        if value < self.min || value > self.max {
            return Err(self.reject(
                value,
                format!("must be between {} and {}", self.format(self.min), self.format(self.max)),
            ));
        }

        let steps = (value - self.min) / self.step;
        if (steps - steps.round()).abs() > STEP_EPSILON {
            return Err(self.reject(
                value,
                format!("must be a multiple of {} from {}", self.step, self.format(self.min)),
            ));
        }

        Ok(value)
    }

    /// Parse submitted form text and validate it.
    pub fn parse(&self, raw: &str) -> Result<f64, ParameterError> {
        let raw = raw.trim();
        let parsed = match self.kind {
            ValueKind::Float => raw.parse::<f64>().ok(),
            ValueKind::Integer => raw.parse::<i64>().ok().map(|v| v as f64),
        };

        match parsed {
            Some(value) => self.validate(value),
            None => Err(ParameterError {
                field: self.key,
                value: raw.to_string(),
                reason: match self.kind {
                    ValueKind::Float => "not a number".to_string(),
                    ValueKind::Integer => "not a whole number".to_string(),
                },
            }),
        }
    }

    /// Render a value with the precision the control displays
    pub fn format(&self, value: f64) -> String {
        match self.kind {
            ValueKind::Float => format!("{:.2}", value),
            ValueKind::Integer => format!("{}", value as i64),
        }
    }

    fn reject(&self, value: f64, reason: impl Into<String>) -> ParameterError {
        ParameterError {
            field: self.key,
            value: self.format(value),
            reason: reason.into(),
        }
    }
}

/// Raw values as submitted by the page form or query string.
///
/// Missing fields keep the panel's current value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ParameterForm {
    pub iron_concentrate: Option<String>,
    pub amine_flow: Option<String>,
    pub air_flow: Option<String>,
}

/// Holds the current control values for one session
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPanel {
    params: InputParameters,
}

impl ControlPanel {
    /// Panel initialised with the default control values.
    pub fn new() -> Self {
        Self {
            params: InputParameters::new(
                IRON_CONCENTRATE.default,
                AMINE_FLOW.default as i64,
                AIR_FLOW.default as i64,
            ),
        }
    }

    /// Current values
    pub fn parameters(&self) -> &InputParameters {
        &self.params
    }

    pub fn set_iron_concentrate(&mut self, value: f64) -> Result<(), ParameterError> {
        self.params.iron_concentrate = IRON_CONCENTRATE.validate(value)?;
        Ok(())
    }

    pub fn set_amine_flow(&mut self, value: i64) -> Result<(), ParameterError> {
        AMINE_FLOW.validate(value as f64)?;
        self.params.amine_flow = value;
        Ok(())
    }

    pub fn set_air_flow(&mut self, value: i64) -> Result<(), ParameterError> {
        AIR_FLOW.validate(value as f64)?;
        self.params.air_flow = value;
        Ok(())
    }

    /// Replace every value at once; nothing changes if any field is rejected.
    pub fn set_all(&mut self, params: InputParameters) -> Result<(), ParameterError> {
        let mut next = self.clone();
        next.set_iron_concentrate(params.iron_concentrate)?;
        next.set_amine_flow(params.amine_flow)?;
        next.set_air_flow(params.air_flow)?;
        *self = next;
        Ok(())
    }

    /// Apply submitted form text; nothing changes if any field is rejected.
    pub fn apply_form(&mut self, form: &ParameterForm) -> Result<(), ParameterError> {
        let mut next = self.params;

        if let Some(raw) = &form.iron_concentrate {
            next.iron_concentrate = IRON_CONCENTRATE.parse(raw)?;
        }
        if let Some(raw) = &form.amine_flow {
            next.amine_flow = AMINE_FLOW.parse(raw)? as i64;
        }
        if let Some(raw) = &form.air_flow {
            next.air_flow = AIR_FLOW.parse(raw)? as i64;
        }

        self.params = next;
        Ok(())
    }

    /// Apply every field that is valid on its own and skip the others.
    ///
    /// Used to keep the accepted values on screen after a rejected submission.
    pub fn apply_valid_fields(&mut self, form: &ParameterForm) {
        if let Some(Ok(value)) = form.iron_concentrate.as_deref().map(|raw| IRON_CONCENTRATE.parse(raw)) {
            self.params.iron_concentrate = value;
        }
        if let Some(Ok(value)) = form.amine_flow.as_deref().map(|raw| AMINE_FLOW.parse(raw)) {
            self.params.amine_flow = value as i64;
        }
        if let Some(Ok(value)) = form.air_flow.as_deref().map(|raw| AIR_FLOW.parse(raw)) {
            self.params.air_flow = value as i64;
        }
    }

    /// Current value of a control, formatted for display
    pub fn display_value(&self, spec: &SliderSpec) -> String {
        spec.format((spec.read)(&self.params))
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(iron: &str, amine: &str, air: &str) -> ParameterForm {
        ParameterForm {
            iron_concentrate: Some(iron.to_string()),
            amine_flow: Some(amine.to_string()),
            air_flow: Some(air.to_string()),
        }
    }

    #[test]
    fn test_default_panel() {
        let panel = ControlPanel::new();
        assert_eq!(panel.parameters(), &InputParameters::new(66.0, 540, 250));
    }

    #[test]
    fn test_iron_concentrate_bounds_accepted() {
        let mut panel = ControlPanel::new();
        assert!(panel.set_iron_concentrate(60.0).is_ok());
        assert!(panel.set_iron_concentrate(70.0).is_ok());
        assert_eq!(panel.parameters().iron_concentrate, 70.0);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut panel = ControlPanel::new();

        let err = panel.set_iron_concentrate(70.05).unwrap_err();
        assert_eq!(err.field, "iron_concentrate");

        assert!(panel.set_amine_flow(239).is_err());
        assert!(panel.set_air_flow(306).is_err());
        assert!(panel.set_air_flow(-175).is_ok());

        // rejected values leave the panel untouched
        assert_eq!(panel.parameters().iron_concentrate, 66.0);
        assert_eq!(panel.parameters().amine_flow, 540);
    }

    #[test]
    fn test_step_granularity() {
        assert!(IRON_CONCENTRATE.validate(63.35).is_ok());
        assert!(IRON_CONCENTRATE.validate(63.37).is_err());
        assert!(IRON_CONCENTRATE.validate(f64::NAN).is_err());
    }

    #[test]
    fn test_apply_form() {
        let mut panel = ControlPanel::new();
        panel.apply_form(&form("61.25", "300", "-20")).unwrap();
        assert_eq!(panel.parameters(), &InputParameters::new(61.25, 300, -20));
        assert_eq!(panel.display_value(&IRON_CONCENTRATE), "61.25");
        assert_eq!(panel.display_value(&AIR_FLOW), "-20");
    }

    #[test]
    fn test_apply_form_is_atomic() {
        let mut panel = ControlPanel::new();
        let err = panel.apply_form(&form("62.00", "abc", "10")).unwrap_err();

        assert_eq!(err.field, "amine_flow");
        assert_eq!(err.reason, "not a whole number");
        assert_eq!(panel, ControlPanel::new());
    }

    #[test]
    fn test_partial_form_keeps_current_values() {
        let mut panel = ControlPanel::new();
        let partial = ParameterForm {
            amine_flow: Some("700".to_string()),
            ..Default::default()
        };
        panel.apply_form(&partial).unwrap();
        assert_eq!(panel.parameters(), &InputParameters::new(66.0, 700, 250));
    }

    #[test]
    fn test_controls_read_their_own_field() {
        let mut panel = ControlPanel::new();
        panel.set_all(InputParameters::new(67.5, 241, -174)).unwrap();

        let shown: Vec<String> = CONTROLS.iter().map(|spec| panel.display_value(spec)).collect();
        assert_eq!(shown, vec!["67.50", "241", "-174"]);
    }

    #[test]
    fn test_apply_valid_fields_skips_rejected() {
        let mut panel = ControlPanel::new();
        panel.apply_valid_fields(&form("61.00", "300", "999"));

        assert_eq!(panel.parameters(), &InputParameters::new(61.0, 300, 250));
    }

    #[test]
    fn test_set_all_rejects_without_partial_update() {
        let mut panel = ControlPanel::new();
        assert!(panel.set_all(InputParameters::new(65.0, 600, 400)).is_err());
        assert_eq!(panel, ControlPanel::new());
    }
}
