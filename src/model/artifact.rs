use crate::error::ArtifactError;
use crate::model::regressor::{Aggregation, DecisionTree, LinearRegressor, Regressor, TreeEnsemble};
use crate::model::scaler::StandardScaler;
use crate::preprocessing::FEATURE_NAMES;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// On-disk layout of a model artifact: the fitted model and the scaler that
/// was fit alongside it.
#[derive(Debug, Deserialize)]
pub struct ArtifactFile {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub scaler: ScalerSpec,
    pub model: ModelSpec,
}

#[derive(Debug, Deserialize)]
pub struct ScalerSpec {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    RandomForest {
        trees: Vec<DecisionTree>,
    },
    GradientBoosting {
        init: f64,
        learning_rate: f64,
        trees: Vec<DecisionTree>,
    },
    Onnx {
        path: PathBuf,
    },
}

/// Reads and parses the artifact file without building anything from it.
pub fn read(path: &Path) -> Result<ArtifactFile, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::NotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ArtifactError::Malformed {
        path: path.display().to_string(),
        source,
    })
}

impl ArtifactFile {
    /// Validates shapes and builds the scaler and regressor from the parsed file.
    /// `base_dir` resolves relative paths inside the artifact.
    pub fn build(
        self,
        base_dir: &Path,
    ) -> Result<(Arc<dyn Regressor>, StandardScaler), ArtifactError> {
        if let Some(names) = self.feature_names {
            if names.iter().map(String::as_str).ne(FEATURE_NAMES) {
                return Err(ArtifactError::FeatureOrder {
                    expected: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
                    got: names,
                });
            }
        }

        let scaler = StandardScaler::new(self.scaler.mean, self.scaler.scale)?;
        let regressor = self.model.build(base_dir)?;
        Ok((regressor, scaler))
    }
}

impl ModelSpec {
    fn build(self, base_dir: &Path) -> Result<Arc<dyn Regressor>, ArtifactError> {
        let regressor: Arc<dyn Regressor> = match self {
            ModelSpec::Linear {
                coefficients,
                intercept,
            } => Arc::new(LinearRegressor::new(coefficients, intercept)?),
            ModelSpec::RandomForest { trees } => {
                Arc::new(TreeEnsemble::new(trees, Aggregation::Mean)?)
            }
            ModelSpec::GradientBoosting {
                init,
                learning_rate,
                trees,
            } => Arc::new(TreeEnsemble::new(
                trees,
                Aggregation::Boosted {
                    init,
                    learning_rate,
                },
            )?),
            ModelSpec::Onnx { path } => build_onnx(&base_dir.join(path))?,
        };
        Ok(regressor)
    }
}

#[cfg(feature = "onnx")]
fn build_onnx(path: &Path) -> Result<Arc<dyn Regressor>, ArtifactError> {
    Ok(Arc::new(crate::model::onnx::OnnxRegressor::load(path)?))
}

#[cfg(not(feature = "onnx"))]
fn build_onnx(path: &Path) -> Result<Arc<dyn Regressor>, ArtifactError> {
    Err(ArtifactError::Unsupported(format!(
        "{} requires the `onnx` feature",
        path.display()
    )))
}
