use crate::config::ServiceSettings;
use crate::utils::error::{Result, ServiceError};
use crate::utils::validation::{validate_required_field, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional configuration file. Every key is optional; present keys override CLI values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub model: Option<ModelSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub allowed_origins: Option<Vec<String>>,
    pub max_upload_size: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelSection {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
    pub monitor: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ServiceError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ServiceError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ServiceError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    /// Overlays every key present in the file onto `settings`.
    pub fn apply_to(&self, settings: &mut ServiceSettings) {
        if let Some(server) = &self.server {
            if let Some(host) = &server.host {
                settings.host = host.clone();
            }
            if let Some(port) = server.port {
                settings.port = port;
            }
            if let Some(origins) = &server.allowed_origins {
                settings.allowed_origins = origins.clone();
            }
            if let Some(size) = server.max_upload_size {
                settings.max_upload_size = size;
            }
        }

        if let Some(path) = self.model.as_ref().and_then(|m| m.path.as_ref()) {
            settings.model_path = path.clone();
        }

        if let Some(logging) = &self.logging {
            settings.verbose = logging.verbose.unwrap_or(settings.verbose);
            settings.json_logs = logging.json.unwrap_or(settings.json_logs);
            settings.monitor = logging.monitor.unwrap_or(settings.monitor);
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        // a [model] table must name its file
        if let Some(model) = &self.model {
            validate_required_field("model.path", &model.path)?;
        }
        let mut settings = ServiceSettings::default();
        self.apply_to(&mut settings);
        settings.validate()
    }
}
