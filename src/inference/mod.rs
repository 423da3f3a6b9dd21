pub mod service;

pub use service::InferenceService;
