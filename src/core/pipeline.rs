use crate::core::explanation::ExplanationGenerator;
use crate::core::normalizer::ImageNormalizer;
use crate::core::verdict::VerdictPolicy;
use crate::domain::model::{PredictionResponse, RawImage};
use crate::domain::ports::ModelHandle;
use crate::utils::error::Result;
use std::time::Instant;

/// Runs one upload through normalize → predict → classify → explain.
///
/// Stops at the first failing stage; a response is only built when every stage succeeded.
/// All work is synchronous and CPU-bound, so async callers should run it on a blocking thread.
#[derive(Debug, Clone)]
pub struct InferencePipeline {
    model: ModelHandle,
    normalizer: ImageNormalizer,
    policy: VerdictPolicy,
    explanations: ExplanationGenerator,
}

impl InferencePipeline {
    pub fn new(model: ModelHandle) -> Self {
        Self {
            model,
            normalizer: ImageNormalizer::default(),
            policy: VerdictPolicy,
            explanations: ExplanationGenerator,
        }
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    pub fn run(&self, image: &RawImage) -> Result<PredictionResponse> {
        let started = Instant::now();
        tracing::debug!(
            media_type = %image.media_type,
            bytes = image.bytes.len(),
            "Normalizing upload"
        );
        let tensor = self.normalizer.normalize(&image.bytes, &image.media_type)?;

        let classifier = self.model.classifier()?;
        let probability = classifier.predict(&tensor)?;

        let verdict = self.policy.classify(probability);
        let explanation = self.explanations.explain(verdict.diagnosis, verdict.confidence);

        tracing::info!(
            probability = probability.value(),
            diagnosis = %verdict.diagnosis,
            confidence = %verdict.confidence,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Prediction completed"
        );

        Ok(PredictionResponse::new(verdict, explanation))
    }
}
