//! API request handlers

use crate::api::page;
use crate::api::response::{ApiResponse, PredictionResponse};
use crate::api::state::AppState;
use crate::controls::{ParameterForm, CONTROLS};
use crate::presenter;
use crate::session::Outcome;
use crate::types::parameters::InputParameters;
use crate::types::request::FEATURE_SCHEMA;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{http::header::ContentType, web, HttpRequest, HttpResponse};
use std::time::Instant;
use tracing::{debug, warn};

/// Configure all routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/predict", web::post().to(predict_form))
        .service(
            web::scope("/api/v1")
                .app_data(web::JsonConfig::default().error_handler(json_error))
                .route("/health", web::get().to(health_check))
                .route("/schema", web::get().to(schema))
                .route("/metrics", web::get().to(metrics))
                .route("/predict", web::post().to(predict_json)),
        );
}

/// Malformed or mistyped JSON bodies get the same envelope as rejected values
fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    if let Some(state) = req.app_data::<web::Data<AppState>>() {
        state.metrics().record_rejected();
    }
    warn!(path = %req.path(), error = %err, "Rejected JSON body");

    let response =
        HttpResponse::BadRequest().json(ApiResponse::<()>::error("invalid_input", err.to_string()));
    InternalError::from_response(err, response).into()
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

/// Render the page; query values preset the controls without predicting
async fn index(state: web::Data<AppState>, query: web::Query<ParameterForm>) -> HttpResponse {
    let mut session = state.session();
    let panels = match session.controls_mut().apply_form(&query) {
        Ok(()) => Vec::new(),
        Err(e) => {
            session.controls_mut().apply_valid_fields(&query);
            presenter::present(&Outcome::Invalid(e))
        }
    };
    html(page::render(&session, &panels))
}

/// Trigger from the page form; always answers with the rendered page
async fn predict_form(state: web::Data<AppState>, form: web::Form<ParameterForm>) -> HttpResponse {
    let mut session = state.session();

    let start = Instant::now();
    let outcome = session.submit(&form);
    state.metrics().record_outcome(&outcome, start.elapsed());

    debug!(success = outcome.is_success(), "Form prediction handled");
    html(page::render(&session, &presenter::present(&outcome)))
}

/// JSON prediction endpoint
async fn predict_json(
    state: web::Data<AppState>,
    params: web::Json<InputParameters>,
) -> HttpResponse {
    let mut session = state.session();

    let start = Instant::now();
    let outcome = match session.controls_mut().set_all(params.into_inner()) {
        Ok(()) => session.trigger(),
        Err(e) => Outcome::Invalid(e),
    };
    state.metrics().record_outcome(&outcome, start.elapsed());

    match outcome {
        Outcome::Success(result) => HttpResponse::Ok().json(ApiResponse::success(PredictionResponse {
            formatted: result.formatted(),
            prediction_id: result.prediction_id,
            silica_percentage: result.silica_percentage,
            model: result.model,
        })),
        Outcome::Invalid(e) => HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error("invalid_input", e.to_string())),
        Outcome::Failed(e) => HttpResponse::UnprocessableEntity()
            .json(ApiResponse::<()>::error("prediction_failed", e.to_string())),
        Outcome::Unavailable(e) => HttpResponse::ServiceUnavailable()
            .json(ApiResponse::<()>::error("model_unavailable", e.to_string())),
    }
}

/// Health check handler
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": if state.model_loaded() { "ok" } else { "degraded" },
        "model_loaded": state.model_loaded(),
        "model": state.model_name(),
        "model_path": state.model_path().display().to_string(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Feature schema and control bounds
async fn schema() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "features": FEATURE_SCHEMA,
        "controls": CONTROLS,
    }))
}

async fn metrics(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.metrics().snapshot())
}
