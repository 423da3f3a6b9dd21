pub mod config;
pub mod error;
pub mod inference;
pub mod model;
pub mod observability;
pub mod preprocessing;
pub mod server;

#[cfg(test)]
mod integration_tests;

// Re-export common types
pub use error::{ArtifactError, InferenceError, PredictError, ValidationError};
pub use inference::InferenceService;
pub use model::ModelStore;
pub use preprocessing::FeatureVector;
