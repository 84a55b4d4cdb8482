//! ONNX-backed classifier built on tract.

use crate::domain::model::{ModelMetadata, NormalizedTensor, Probability, INPUT_SHAPE};
use crate::domain::ports::{Classifier, ModelHandle};
use crate::utils::error::{Result, ServiceError};
use std::path::Path;
use tract_onnx::prelude::*;
use tract_onnx::tract_hir::internal::DimLike;

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

pub struct OnnxClassifier {
    plan: Plan,
    metadata: ModelMetadata,
}

impl OnnxClassifier {
    /// Loads and optimizes a model whose single input is f32 (1, 224, 224, 3).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let load_error = |e: TractError| ServiceError::ModelLoadError {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        if !path.exists() {
            return Err(ServiceError::ModelLoadError {
                path: path.display().to_string(),
                message: "model file not found".to_string(),
            });
        }

        let model = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(load_error)?
            .with_input_fact(0, f32::fact(INPUT_SHAPE).into())
            .map_err(load_error)?
            .into_optimized()
            .map_err(load_error)?;

        let metadata = ModelMetadata {
            model_type: "Convolutional Neural Network".to_string(),
            input_shape: concrete_dims(&model.input_fact(0).map_err(load_error)?.shape),
            output_shape: concrete_dims(&model.output_fact(0).map_err(load_error)?.shape),
            total_parameters: count_parameters(&model),
        };

        let plan = model.into_runnable().map_err(load_error)?;

        tracing::info!(
            path = %path.display(),
            input_shape = ?metadata.input_shape,
            output_shape = ?metadata.output_shape,
            parameters = metadata.total_parameters,
            "Model loaded successfully"
        );

        Ok(Self { plan, metadata })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, tensor: &NormalizedTensor) -> Result<Probability> {
        let inference_error = |e: TractError| ServiceError::InferenceError {
            message: e.to_string(),
        };

        let values: Vec<f32> = tensor.values().collect();
        let input = Tensor::from_shape::<f32>(tensor.shape(), &values).map_err(inference_error)?;

        let outputs = self.plan.run(tvec!(input.into())).map_err(inference_error)?;
        let first_output = outputs.first().ok_or_else(|| ServiceError::InferenceError {
            message: "model produced no outputs".to_string(),
        })?;

        let scores = first_output.cast_to::<f32>().map_err(inference_error)?;
        let score = scores
            .as_slice::<f32>()
            .map_err(inference_error)?
            .first()
            .copied()
            .ok_or_else(|| ServiceError::InferenceError {
                message: "model output is empty".to_string(),
            })?;

        Ok(Probability::from(score))
    }

    fn metadata(&self) -> ModelMetadata {
        self.metadata.clone()
    }
}

fn concrete_dims(shape: &ShapeFact) -> Vec<Option<usize>> {
    shape.iter().map(|dim| dim.to_usize().ok()).collect()
}

/// Number of scalar values held in constant tensors (weights and biases).
fn count_parameters(model: &TypedModel) -> usize {
    model
        .nodes()
        .iter()
        .flat_map(|node| node.outputs.iter())
        .filter_map(|outlet| outlet.fact.konst.as_ref())
        .map(|tensor| tensor.len())
        .sum()
}

/// Loads the model once for the lifetime of the process.
///
/// A failed load is not fatal: the returned handle is empty and every request
/// reports the load error instead.
pub fn load_model_handle<P: AsRef<Path>>(path: P) -> ModelHandle {
    match OnnxClassifier::load(path) {
        Ok(classifier) => ModelHandle::from_classifier(classifier),
        Err(e) => {
            tracing::error!(error = %e, "Error loading model, predictions will be unavailable");
            ModelHandle::unavailable(e.to_string())
        }
    }
}
