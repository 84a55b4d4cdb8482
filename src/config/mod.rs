#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_origin, validate_path, validate_positive_number, Validate,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MODEL_PATH: &str = "../best_model.onnx";
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;
const MIN_UPLOAD_SIZE: usize = 1024;

/// Fully resolved service settings (CLI flags overlaid with the optional TOML file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSettings {
    pub host: String,
    pub port: u16,
    pub model_path: String,
    pub allowed_origins: Vec<String>,
    pub max_upload_size: usize,
    pub verbose: bool,
    pub json_logs: bool,
    pub monitor: bool,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model_path: DEFAULT_MODEL_PATH.to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
            verbose: false,
            json_logs: false,
            monitor: false,
        }
    }
}

impl ServiceSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Validate for ServiceSettings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.host)?;
        validate_positive_number("server.port", usize::from(self.port), 1)?;
        validate_positive_number("server.max_upload_size", self.max_upload_size, MIN_UPLOAD_SIZE)?;
        validate_path("model.path", &self.model_path)?;
        for origin in &self.allowed_origins {
            validate_origin("server.allowed_origins", origin)?;
        }
        Ok(())
    }
}
