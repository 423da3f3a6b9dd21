use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures while loading the model artifact. All of them are fatal at startup.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Model artifact not found at path: {0}")]
    NotFound(String),

    #[error("Failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed model artifact {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Shape mismatch in {field}: expected {expected} values, got {got}")]
    Shape {
        field: String,
        expected: usize,
        got: usize,
    },

    #[error("Invalid decision tree {tree} at node {node}: {reason}")]
    InvalidTree {
        tree: usize,
        node: usize,
        reason: String,
    },

    #[error("Feature order mismatch: expected {expected:?}, got {got:?}")]
    FeatureOrder {
        expected: Vec<String>,
        got: Vec<String>,
    },

    #[error("Tree ensemble contains no trees")]
    EmptyEnsemble,

    #[error("Unsupported model backend: {0}")]
    Unsupported(String),

    #[cfg(feature = "onnx")]
    #[error("ONNX Runtime error: {0}")]
    Onnx(#[from] ort::Error),
}

/// Per-request input problems. Always the caller's fault.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Expected {expected} features, got {got}")]
    Cardinality { expected: usize, got: usize },

    #[error("Feature {index} is not a number: {found}")]
    NonNumeric { index: usize, found: String },

    #[error("Feature {index} is not finite: {value}")]
    NonFinite { index: usize, value: f64 },

    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

/// Unexpected failures inside the scaling or regressor call.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Scaled feature {index} overflowed to {value}")]
    NonFiniteInput { index: usize, value: f64 },

    #[error("Regressor produced a non-finite prediction: {0}")]
    NonFiniteOutput(f64),

    #[error("Inference backend error: {0}")]
    Backend(String),

    #[cfg(feature = "onnx")]
    #[error("ONNX Runtime error: {0}")]
    Onnx(#[from] ort::Error),
}

/// Everything `/predict` can fail with.
#[derive(Error, Debug)]
pub enum PredictError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl PredictError {
    pub fn status(&self) -> StatusCode {
        match self {
            PredictError::Validation(_) => StatusCode::BAD_REQUEST,
            PredictError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Label used for the `outcome` metric dimension.
    pub fn outcome(&self) -> &'static str {
        match self {
            PredictError::Validation(_) => "invalid",
            PredictError::Inference(_) => "error",
        }
    }
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            PredictError::Validation(e) => e.to_string(),
            PredictError::Inference(InferenceError::Backend(_)) => {
                "Internal server error".to_string()
            }
            PredictError::Inference(e) => e.to_string(),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
