//! One interactive session: control values plus the prediction state machine.
//!
//! ```text
//! Idle --(model missing)--> Disabled
//! Idle --(trigger)--> Predicting --> {Success, Failed} --> Idle
//! ```

use crate::controls::{ControlPanel, ParameterForm};
use crate::error::{Error, ModelLoadError, ParameterError, PredictionError};
use crate::models::InferenceEngine;
use crate::types::prediction::PredictionResult;
use tracing::{debug, info, warn};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Disabled,
    Predicting,
}

/// Result of one trigger
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(PredictionResult),
    Failed(PredictionError),
    /// The model never loaded; nothing was run
    Unavailable(ModelLoadError),
    /// Submitted values were rejected before reaching the model
    Invalid(ParameterError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// The failure behind this outcome, if any
    pub fn error(&self) -> Option<Error> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failed(e) => Some(e.clone().into()),
            Outcome::Unavailable(e) => Some(e.clone().into()),
            Outcome::Invalid(e) => Some(e.clone().into()),
        }
    }
}

pub struct Session {
    controls: ControlPanel,
    engine: Result<InferenceEngine, ModelLoadError>,
    phase: Phase,
}

impl Session {
    /// Start a session; a failed model load puts it straight into `Disabled`.
    pub fn new(engine: Result<InferenceEngine, ModelLoadError>) -> Self {
        let phase = match &engine {
            Ok(_) => Phase::Idle,
            Err(e) => {
                warn!(error = %e, "Prediction disabled");
                Phase::Disabled
            }
        };

        Self {
            controls: ControlPanel::new(),
            engine,
            phase,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the trigger control is available
    pub fn can_predict(&self) -> bool {
        self.phase != Phase::Disabled
    }

    pub fn load_error(&self) -> Option<&ModelLoadError> {
        self.engine.as_ref().err()
    }

    pub fn controls(&self) -> &ControlPanel {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut ControlPanel {
        &mut self.controls
    }

    /// Run one prediction with the current control values.
    pub fn trigger(&mut self) -> Outcome {
        let engine = match &self.engine {
            Ok(engine) => engine,
            Err(e) => return Outcome::Unavailable(e.clone()),
        };

        self.phase = Phase::Predicting;
        debug!(params = ?self.controls.parameters(), "Prediction triggered");

        let outcome = match engine.predict(self.controls.parameters()) {
            Ok(result) => {
                info!(
                    prediction_id = %result.prediction_id,
                    silica_percentage = result.silica_percentage,
                    "Prediction succeeded"
                );
                Outcome::Success(result)
            }
            Err(e) => Outcome::Failed(e),
        };

        self.phase = Phase::Idle;
        outcome
    }

    /// Apply submitted values, then trigger. Rejected values never reach the model.
    pub fn submit(&mut self, form: &ParameterForm) -> Outcome {
        if let Err(e) = self.controls.apply_form(form) {
            warn!(field = e.field, value = %e.value, reason = %e.reason, "Input rejected");
            self.controls.apply_valid_fields(form);
            return Outcome::Invalid(e);
        }
        self.trigger()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PredictorHandle, Regressor};
    use crate::types::request::PredictionRequest;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Returns the iron concentrate column divided by ten, counting calls
    #[derive(Default)]
    struct CountingModel {
        calls: AtomicUsize,
    }

    impl Regressor for CountingModel {
        fn name(&self) -> &str {
            "counting"
        }

        fn predict(&self, request: &PredictionRequest) -> Result<Vec<f64>, PredictionError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            let iron = request
                .get("% Iron Concentrate")
                .ok_or(PredictionError::EmptyOutput)?;
            Ok(vec![iron / 10.0])
        }
    }

    struct RejectingModel;

    impl Regressor for RejectingModel {
        fn name(&self) -> &str {
            "rejecting"
        }

        fn predict(&self, _request: &PredictionRequest) -> Result<Vec<f64>, PredictionError> {
            Err(PredictionError::inference("feature_names mismatch"))
        }
    }

    fn session_with(model: PredictorHandle) -> Session {
        Session::new(Ok(InferenceEngine::new(model)))
    }

    #[test]
    fn test_missing_model_disables_session() {
        let mut session = Session::new(Err(ModelLoadError::Missing {
            path: PathBuf::from("model.onnx"),
        }));

        assert_eq!(session.phase(), Phase::Disabled);
        assert!(!session.can_predict());
        assert!(matches!(session.trigger(), Outcome::Unavailable(_)));
        assert_eq!(session.phase(), Phase::Disabled);
    }

    #[test]
    fn test_trigger_returns_to_idle() {
        let mut session = session_with(Arc::new(CountingModel::default()));
        assert_eq!(session.phase(), Phase::Idle);

        match session.trigger() {
            Outcome::Success(result) => assert!((result.silica_percentage - 6.6).abs() < 1e-9),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_failure_keeps_session_usable() {
        let mut session = session_with(Arc::new(RejectingModel));

        match session.trigger() {
            Outcome::Failed(e) => assert!(e.to_string().contains("feature_names mismatch")),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.can_predict());
    }

    #[test]
    fn test_invalid_submit_never_calls_model() {
        let model = Arc::new(CountingModel::default());
        let mut session = session_with(model.clone());

        let form = ParameterForm {
            iron_concentrate: Some("75".to_string()),
            ..Default::default()
        };
        assert!(matches!(session.submit(&form), Outcome::Invalid(_)));
        assert_eq!(model.calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_rejected_submit_keeps_valid_fields() {
        let mut session = session_with(Arc::new(CountingModel::default()));

        let form = ParameterForm {
            iron_concentrate: Some("62.50".to_string()),
            amine_flow: Some("300".to_string()),
            air_flow: Some("999".to_string()),
        };
        assert!(matches!(session.submit(&form), Outcome::Invalid(_)));

        let params = session.controls().parameters();
        assert_eq!(params.iron_concentrate, 62.5);
        assert_eq!(params.amine_flow, 300);
        assert_eq!(params.air_flow, 250);
    }

    #[test]
    fn test_input_changes_do_not_trigger() {
        let model = Arc::new(CountingModel::default());
        let mut session = session_with(model.clone());

        session.controls_mut().set_amine_flow(300).unwrap();
        session.controls_mut().set_air_flow(-100).unwrap();
        assert_eq!(model.calls.load(Ordering::Relaxed), 0);

        assert!(session.trigger().is_success());
        assert_eq!(model.calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_iron_concentrate_boundaries_predict() {
        for iron in ["60.00", "70.00"] {
            let mut session = session_with(Arc::new(CountingModel::default()));
            let form = ParameterForm {
                iron_concentrate: Some(iron.to_string()),
                ..Default::default()
            };
            assert!(session.submit(&form).is_success(), "iron={}", iron);
        }
    }
}
