//! Type definitions for the silica predictor

pub mod parameters;
pub mod prediction;
pub mod request;

pub use parameters::InputParameters;
pub use prediction::PredictionResult;
pub use request::{PredictionRequest, FEATURE_SCHEMA};
