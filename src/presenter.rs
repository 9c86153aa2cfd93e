//! Turns prediction outcomes into user-facing messages

use crate::error::{Error, ModelLoadError};
use crate::session::Outcome;
use serde::Serialize;

/// Kind of message panel, mapped to styling by the page renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    Success,
    Info,
    Warning,
    Error,
}

/// One rendered message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub kind: PanelKind,
    pub title: Option<String>,
    pub body: String,
}

impl Panel {
    fn new(kind: PanelKind, body: impl Into<String>) -> Self {
        Self {
            kind,
            title: None,
            body: body.into(),
        }
    }

    fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Two decimals and a trailing percent sign
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Persistent warning shown while the model is unavailable
pub fn load_warning(err: &ModelLoadError) -> Panel {
    Panel::new(
        PanelKind::Warning,
        format!(
            "The model could not be loaded. Please check the model file path ({}).",
            err
        ),
    )
}

/// Panel for any failure, worded by where it happened
pub fn present_error(err: &Error) -> Panel {
    match err {
        Error::ModelLoad(e) => load_warning(e),
        Error::Prediction(e) => Panel::new(
            PanelKind::Error,
            format!("An error occurred during prediction: {}", e),
        ),
        Error::Parameter(e) => Panel::new(PanelKind::Error, format!("Invalid input: {}", e)),
    }
}

/// Panels for the result of one trigger
pub fn present(outcome: &Outcome) -> Vec<Panel> {
    match outcome {
        Outcome::Success(result) => vec![
            Panel::new(
                PanelKind::Success,
                format!("Predicted percentage: {}", result.formatted()),
            )
            .titled("Prediction result"),
            Panel::new(
                PanelKind::Info,
                "This value represents the percentage of silica present in the operation.",
            ),
        ],
        failure => failure
            .error()
            .map(|e| present_error(&e))
            .into_iter()
            .collect(),
    }
}
