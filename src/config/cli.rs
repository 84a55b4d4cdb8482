use crate::config::toml_config::TomlConfig;
use crate::config::{
    ServiceSettings, DEFAULT_HOST, DEFAULT_MAX_UPLOAD_SIZE, DEFAULT_MODEL_PATH, DEFAULT_PORT,
};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "metaselect")]
#[command(about = "Breast cancer image classification API")]
pub struct CliConfig {
    #[arg(long, env = "API_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(long, env = "API_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(long, env = "MODEL_PATH", default_value = DEFAULT_MODEL_PATH)]
    pub model_path: String,

    #[arg(
        long,
        value_delimiter = ',',
        default_value = "http://localhost:3000,http://127.0.0.1:3000"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long, env = "MAX_UPLOAD_SIZE", default_value_t = DEFAULT_MAX_UPLOAD_SIZE)]
    pub max_upload_size: usize,

    #[arg(long, help = "TOML configuration file; its keys override command line values")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Log process CPU and memory usage")]
    pub monitor: bool,
}

impl CliConfig {
    /// Builds the effective settings: flags first, then the TOML file on top.
    pub fn resolve(&self) -> Result<ServiceSettings> {
        let mut settings = ServiceSettings {
            host: self.host.clone(),
            port: self.port,
            model_path: self.model_path.clone(),
            allowed_origins: self.allowed_origins.clone(),
            max_upload_size: self.max_upload_size,
            verbose: self.verbose,
            json_logs: self.json_logs,
            monitor: self.monitor,
        };

        if let Some(path) = &self.config {
            let file_config = TomlConfig::from_file(path)?;
            file_config.validate()?;
            file_config.apply_to(&mut settings);
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_settings_defaults() {
        let cli = CliConfig::parse_from(["metaselect"]);
        let settings = cli.resolve().unwrap();
        assert_eq!(settings.host, ServiceSettings::default().host);
        assert_eq!(settings.model_path, ServiceSettings::default().model_path);
        assert_eq!(
            settings.allowed_origins,
            ServiceSettings::default().allowed_origins
        );
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_flags_are_parsed() {
        let cli = CliConfig::parse_from([
            "metaselect",
            "--port",
            "9100",
            "--model-path",
            "/tmp/model.onnx",
            "--allowed-origins",
            "https://a.example.com,https://b.example.com",
            "--verbose",
        ]);
        let settings = cli.resolve().unwrap();
        assert_eq!(settings.port, 9100);
        assert_eq!(settings.model_path, "/tmp/model.onnx");
        assert_eq!(settings.allowed_origins.len(), 2);
        assert!(settings.verbose);
    }

    #[test]
    fn test_config_file_overrides_flags() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[server]\nport = 9300\n[logging]\nmonitor = true\n")
            .unwrap();

        let cli = CliConfig::parse_from([
            "metaselect",
            "--port",
            "9100",
            "--config",
            file.path().to_str().unwrap(),
        ]);
        let settings = cli.resolve().unwrap();
        assert_eq!(settings.port, 9300);
        assert!(settings.monitor);
    }
}
