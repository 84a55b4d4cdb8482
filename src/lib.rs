pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::http::{create_router, run_server, AppState};
pub use adapters::onnx::{load_model_handle, OnnxClassifier};
pub use config::ServiceSettings;
pub use crate::core::{normalizer::ImageNormalizer, pipeline::InferencePipeline};
pub use domain::ports::{Classifier, ModelHandle};
pub use utils::error::{Result, ServiceError};
