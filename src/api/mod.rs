//! HTTP surface: the predictor page and the JSON API

pub mod handlers;
pub mod page;
pub mod response;
pub mod state;

pub use handlers::configure_routes;
pub use response::{ApiResponse, PredictionResponse};
pub use state::AppState;
