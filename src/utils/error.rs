use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("File must be an image, got declared media type '{media_type}'")]
    InvalidInputKind { media_type: String },

    #[error("Could not decode image: {message}")]
    DecodeError { message: String },

    #[error("Model not loaded: {reason}")]
    ModelUnavailable { reason: String },

    #[error("Prediction failed: {message}")]
    InferenceError { message: String },

    #[error("Failed to load model from '{path}': {message}")]
    ModelLoadError { path: String, message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Model,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ServiceError {
    /// Stable snake_case tag used in error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::InvalidInputKind { .. } => "invalid_input_kind",
            ServiceError::DecodeError { .. } => "decode_error",
            ServiceError::ModelUnavailable { .. } => "model_unavailable",
            ServiceError::InferenceError { .. } => "inference_error",
            ServiceError::ModelLoadError { .. } => "model_load_error",
            ServiceError::InvalidRequest { .. } => "invalid_request",
            ServiceError::ConfigError { .. }
            | ServiceError::InvalidConfigValueError { .. }
            | ServiceError::MissingConfigError { .. } => "config_error",
            ServiceError::IoError(_) => "io_error",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ServiceError::InvalidInputKind { .. }
            | ServiceError::DecodeError { .. }
            | ServiceError::InvalidRequest { .. } => ErrorCategory::Input,
            ServiceError::ModelUnavailable { .. }
            | ServiceError::InferenceError { .. }
            | ServiceError::ModelLoadError { .. } => ErrorCategory::Model,
            ServiceError::ConfigError { .. }
            | ServiceError::InvalidConfigValueError { .. }
            | ServiceError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ServiceError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Model => match self {
                ServiceError::InferenceError { .. } => ErrorSeverity::Medium,
                _ => ErrorSeverity::High,
            },
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// True when the caller, not the operator, is at fault.
    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Input
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ServiceError::InvalidInputKind { .. } => "File must be an image".to_string(),
            ServiceError::DecodeError { message } => {
                format!("The uploaded file could not be read as an image: {}", message)
            }
            ServiceError::ModelUnavailable { .. } => "Model not loaded".to_string(),
            ServiceError::InferenceError { message } => format!("Prediction failed: {}", message),
            ServiceError::ModelLoadError { path, .. } => {
                format!("The model file at '{}' could not be loaded", path)
            }
            ServiceError::InvalidRequest { message } => message.clone(),
            ServiceError::ConfigError { .. }
            | ServiceError::InvalidConfigValueError { .. }
            | ServiceError::MissingConfigError { .. } => {
                format!("The service configuration is invalid: {}", self)
            }
            ServiceError::IoError(e) => format!("A file system error occurred: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ServiceError::InvalidInputKind { .. } => {
                "Upload a file with an image/* content type (PNG, JPEG, ...)"
            }
            ServiceError::DecodeError { .. } => "Check that the file is a valid, uncorrupted image",
            ServiceError::ModelUnavailable { .. } | ServiceError::ModelLoadError { .. } => {
                "Check the --model-path setting and restart the service"
            }
            ServiceError::InferenceError { .. } => {
                "Check that the model expects a (1, 224, 224, 3) float input"
            }
            ServiceError::InvalidRequest { .. } => "Send the image as the 'file' multipart field",
            ServiceError::ConfigError { .. }
            | ServiceError::InvalidConfigValueError { .. }
            | ServiceError::MissingConfigError { .. } => {
                "Review the command line flags and the TOML configuration file"
            }
            ServiceError::IoError(_) => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
