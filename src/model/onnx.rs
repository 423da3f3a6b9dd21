use crate::error::{ArtifactError, InferenceError};
use crate::model::regressor::Regressor;
use ndarray::ArrayView1;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use std::path::Path;
use std::sync::{Mutex, Once};
use tracing::{debug, info};

static ORT_INIT: Once = Once::new();

// Initialize the global environment for ORT (only needed once)
fn init_ort() {
    ORT_INIT.call_once(|| {
        let _ = ort::init().with_name("pricecast").commit();
    });
}

/// A regressor exported to ONNX (e.g. a converted tree ensemble), taking a
/// `[1, 4]` float tensor and producing a single value.
pub struct OnnxRegressor {
    session: Mutex<Session>,
    input_name: String,
}

impl OnnxRegressor {
    /// Loads an ONNX graph from disk and creates an inference session.
    pub fn load(model_path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = model_path.as_ref();
        if !path.exists() {
            return Err(ArtifactError::NotFound(path.display().to_string()));
        }

        init_ort();

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(1)?
            .commit_from_file(path)?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| ArtifactError::Unsupported("ONNX graph declares no inputs".into()))?;

        info!(path = %path.display(), input = %input_name, "Loaded ONNX regressor");
        for (i, input) in session.inputs.iter().enumerate() {
            debug!("  Input {}: {} ({:?})", i, input.name, input.input_type);
        }

        Ok(Self {
            session: Mutex::new(session),
            input_name,
        })
    }
}

impl Regressor for OnnxRegressor {
    fn predict(&self, scaled: ArrayView1<'_, f64>) -> Result<f64, InferenceError> {
        let shape = vec![1usize, scaled.len()];
        let data: Box<[f32]> = scaled.iter().map(|&x| x as f32).collect();
        let input_value = Value::from_array((shape, data))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| InferenceError::Backend("ONNX session lock poisoned".to_string()))?;
        let outputs = session.run(ort::inputs![self.input_name.as_str() => input_value])?;

        let (_, data) = outputs[0].try_extract_tensor::<f32>()?;
        data.first()
            .map(|&y| y as f64)
            .ok_or_else(|| InferenceError::Backend("ONNX graph returned an empty tensor".into()))
    }

    fn kind(&self) -> &'static str {
        "onnx"
    }
}
