pub mod artifact;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod regressor;
pub mod scaler;
pub mod store;

pub use regressor::Regressor;
pub use scaler::{FeatureTransform, StandardScaler};
pub use store::ModelStore;
