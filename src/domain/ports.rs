use crate::domain::model::{ModelMetadata, NormalizedTensor, Probability};
use crate::utils::error::{Result, ServiceError};
use std::sync::Arc;

/// Scoring capability of a loaded binary classifier.
///
/// Implementations must be safe for concurrent read-only use: the same instance
/// serves every request and is never mutated after construction.
pub trait Classifier: Send + Sync {
    /// Runs the model on one tensor and returns the first element of the first output row.
    fn predict(&self, tensor: &NormalizedTensor) -> Result<Probability>;

    fn metadata(&self) -> ModelMetadata;
}

/// The process-wide model slot, filled once at startup and read-only afterwards.
#[derive(Clone)]
pub struct ModelHandle {
    state: HandleState,
}

#[derive(Clone)]
enum HandleState {
    Loaded(Arc<dyn Classifier>),
    Unavailable(String),
}

impl ModelHandle {
    pub fn loaded(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            state: HandleState::Loaded(classifier),
        }
    }

    pub fn from_classifier<C: Classifier + 'static>(classifier: C) -> Self {
        Self::loaded(Arc::new(classifier))
    }

    /// A handle with no model; `reason` is reported by every failed request.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: HandleState::Unavailable(reason.into()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, HandleState::Loaded(_))
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.state {
            HandleState::Loaded(_) => None,
            HandleState::Unavailable(reason) => Some(reason),
        }
    }

    pub fn classifier(&self) -> Result<&dyn Classifier> {
        match &self.state {
            HandleState::Loaded(classifier) => Ok(classifier.as_ref()),
            HandleState::Unavailable(reason) => Err(ServiceError::ModelUnavailable {
                reason: reason.clone(),
            }),
        }
    }

    pub fn metadata(&self) -> Result<ModelMetadata> {
        self.classifier().map(|c| c.metadata())
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.state {
            HandleState::Loaded(_) => f.write_str("ModelHandle(loaded)"),
            HandleState::Unavailable(reason) => write!(f, "ModelHandle(unavailable: {})", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f64);

    impl Classifier for Constant {
        fn predict(&self, _tensor: &NormalizedTensor) -> Result<Probability> {
            Ok(Probability::new(self.0))
        }

        fn metadata(&self) -> ModelMetadata {
            ModelMetadata {
                model_type: "constant".to_string(),
                input_shape: vec![Some(1), Some(224), Some(224), Some(3)],
                output_shape: vec![Some(1), Some(1)],
                total_parameters: 0,
            }
        }
    }

    #[test]
    fn test_unavailable_handle_fails_fast() {
        let handle = ModelHandle::unavailable("file not found");
        assert!(!handle.is_loaded());
        assert_eq!(handle.unavailable_reason(), Some("file not found"));
        match handle.classifier() {
            Err(ServiceError::ModelUnavailable { reason }) => assert_eq!(reason, "file not found"),
            other => panic!("expected ModelUnavailable, got {:?}", other.map(|_| ())),
        }
        assert!(handle.metadata().is_err());
    }

    #[test]
    fn test_loaded_handle_is_shared() {
        let handle = ModelHandle::from_classifier(Constant(0.25));
        let clone = handle.clone();
        assert!(clone.is_loaded());
        assert_eq!(clone.metadata().unwrap().model_type, "constant");
    }
}
