use crate::inference::InferenceService;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};

/// Shared Application State
#[derive(Clone)]
pub struct AppState {
    pub service: InferenceService,
    /// `None` when metrics are disabled in the config.
    pub metrics: Option<PrometheusHandle>,
}

// --- DTOs (Data Transfer Objects) ---

#[derive(Deserialize)]
pub struct PredictRequest {
    /// `[square_footage, bedrooms, bathrooms, year_built]`. Kept as raw JSON so
    /// non-numeric entries surface as validation errors.
    pub features: Vec<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PredictResponse {
    /// Always a single element.
    pub prediction: Vec<f64>,
    pub inference_time_ms: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}
