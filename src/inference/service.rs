use crate::error::{InferenceError, PredictError};
use crate::model::ModelStore;
use crate::preprocessing::FeatureVector;
use metrics::{counter, histogram};
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

/// Turns one feature vector into one price prediction.
///
/// Holds nothing but the immutable model store, so it can be cloned into
/// every request handler and called concurrently without locking.
#[derive(Clone)]
pub struct InferenceService {
    store: ModelStore,
}

impl InferenceService {
    pub fn new(store: ModelStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ModelStore {
        &self.store
    }

    /// Validates raw numbers, then scales and predicts.
    pub fn predict(&self, features: &[f64]) -> Result<f64, PredictError> {
        observe(|| {
            let features = FeatureVector::new(features)?;
            Ok(self.predict_features(&features)?)
        })
    }

    /// Same as [`predict`](Self::predict) for the elements of a JSON array.
    pub fn predict_json(&self, features: &[Value]) -> Result<f64, PredictError> {
        observe(|| {
            let features = FeatureVector::from_json(features)?;
            Ok(self.predict_features(&features)?)
        })
    }

    /// Scales an already validated vector and runs the regressor. The output
    /// is returned as is: no clamping or rounding.
    pub fn predict_features(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let scaled = self.store.transform().transform(features.view());

        if let Some((index, &value)) = scaled.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(InferenceError::NonFiniteInput { index, value });
        }

        let prediction = self.store.regressor().predict(scaled.view())?;
        if !prediction.is_finite() {
            return Err(InferenceError::NonFiniteOutput(prediction));
        }

        debug!(
            features = ?features.as_slice(),
            scaled = ?scaled.as_slice(),
            prediction,
            "Prediction computed"
        );

        Ok(prediction)
    }
}

fn observe(f: impl FnOnce() -> Result<f64, PredictError>) -> Result<f64, PredictError> {
    let start = Instant::now();
    let result = f();
    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    counter!("predictions_total", "outcome" => outcome).increment(1);
    histogram!("prediction_latency_seconds").record(start.elapsed().as_secs_f64());
    result
}
