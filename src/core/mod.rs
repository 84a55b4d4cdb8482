pub mod explanation;
pub mod normalizer;
pub mod pipeline;
pub mod verdict;

pub use crate::domain::model::{
    Confidence, Diagnosis, NormalizedTensor, PredictionResponse, Probability, RawImage, Verdict,
};
pub use crate::domain::ports::{Classifier, ModelHandle};
pub use crate::utils::error::Result;
