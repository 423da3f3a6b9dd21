use crate::error::ArtifactError;
use crate::model::artifact;
use crate::model::regressor::Regressor;
use crate::model::scaler::FeatureTransform;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// The fitted regressor and its scaler, loaded once and shared read-only for
/// the lifetime of the process. Cloning only bumps reference counts.
#[derive(Clone)]
pub struct ModelStore {
    regressor: Arc<dyn Regressor>,
    transform: Arc<dyn FeatureTransform>,
}

impl ModelStore {
    pub fn new(regressor: Arc<dyn Regressor>, transform: Arc<dyn FeatureTransform>) -> Self {
        Self {
            regressor,
            transform,
        }
    }

    /// Loads a model artifact from disk.
    ///
    /// # Arguments
    /// * `path` - Path to the JSON artifact bundle
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        let (regressor, scaler) = artifact::read(path)?.build(base_dir)?;

        info!(
            path = %path.display(),
            kind = regressor.kind(),
            "Loaded model artifact"
        );

        Ok(Self::new(regressor, Arc::new(scaler)))
    }

    pub fn regressor(&self) -> &dyn Regressor {
        self.regressor.as_ref()
    }

    pub fn transform(&self) -> &dyn FeatureTransform {
        self.transform.as_ref()
    }

    pub fn into_parts(self) -> (Arc<dyn Regressor>, Arc<dyn FeatureTransform>) {
        (self.regressor, self.transform)
    }
}
