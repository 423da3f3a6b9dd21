use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

use crate::error::{PredictError, ValidationError};
use crate::server::types::*;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, PredictError> {
    let Json(payload) = payload
        .map_err(|rejection| ValidationError::MalformedBody(rejection.body_text()))?;

    let start = Instant::now();
    let prediction = state
        .service
        .predict_json(&payload.features)
        .inspect_err(|e| warn!(error = %e, "Prediction failed"))?;
    let duration = start.elapsed();

    Ok(Json(PredictResponse {
        prediction: vec![prediction],
        inference_time_ms: duration.as_secs_f64() * 1000.0,
    }))
}

pub async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::NOT_FOUND, "metrics disabled").into_response(),
    }
}
