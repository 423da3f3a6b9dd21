pub mod features;

pub use features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
