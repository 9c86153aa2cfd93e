//! Silica Predictor Library
//!
//! Serves an interactive form that feeds three flotation plant operating
//! parameters into a pre-trained regression model and shows the predicted
//! silica concentrate percentage.

pub mod api;
pub mod config;
pub mod controls;
pub mod error;
pub mod metrics;
pub mod models;
pub mod presenter;
pub mod session;
pub mod types;

pub use config::AppConfig;
pub use controls::{ControlPanel, ParameterForm};
pub use error::{Error, ModelLoadError, ParameterError, PredictionError};
pub use models::{InferenceEngine, ModelLoader, PredictorHandle, Regressor};
pub use session::{Outcome, Session};
pub use types::{InputParameters, PredictionRequest, PredictionResult};
