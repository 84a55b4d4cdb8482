use ndarray::Array4;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the square model input.
pub const INPUT_SIZE: usize = 224;
pub const INPUT_CHANNELS: usize = 3;
pub const INPUT_SHAPE: [usize; 4] = [1, INPUT_SIZE, INPUT_SIZE, INPUT_CHANNELS];

/// An uploaded file as handed over by the transport: bytes plus the declared content type.
#[derive(Debug, Clone)]
pub struct RawImage {
    pub bytes: Vec<u8>,
    pub media_type: String,
}

impl RawImage {
    pub fn new(bytes: impl Into<Vec<u8>>, media_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: media_type.into(),
        }
    }
}

/// Model input of shape (1, 224, 224, 3), channels-last, values in [0.0, 1.0].
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTensor(Array4<f32>);

impl NormalizedTensor {
    pub(crate) fn from_array(array: Array4<f32>) -> Self {
        debug_assert_eq!(array.shape(), &INPUT_SHAPE[..]);
        Self(array)
    }

    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }

    pub fn view(&self) -> &Array4<f32> {
        &self.0
    }

    /// Values in row-major (batch, y, x, channel) order.
    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.0.iter().copied()
    }
}

/// P(malignant) as reported by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Probability(f64);

impl Probability {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f32> for Probability {
    fn from(value: f32) -> Self {
        Self(f64::from(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diagnosis {
    Benign = 0,
    Malignant = 1,
}

impl Diagnosis {
    pub const ALL: [Diagnosis; 2] = [Diagnosis::Benign, Diagnosis::Malignant];

    pub fn as_str(self) -> &'static str {
        match self {
            Diagnosis::Benign => "Benign",
            Diagnosis::Malignant => "Malignant",
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl Confidence {
    pub const ALL: [Confidence; 3] = [Confidence::Low, Confidence::Medium, Confidence::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub diagnosis: Diagnosis,
    pub confidence: Confidence,
    pub benign_pct: f64,
    pub malignant_pct: f64,
}

/// Successful `/predict` body. Field names are part of the public contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub probability: f64,
    pub diagnosis: Diagnosis,
    pub confidence: Confidence,
    pub explanation: String,
    pub benign_probability: f64,
    pub malignant_probability: f64,
}

impl PredictionResponse {
    pub fn new(verdict: Verdict, explanation: &str) -> Self {
        Self {
            probability: verdict.malignant_pct,
            diagnosis: verdict.diagnosis,
            confidence: verdict.confidence,
            explanation: explanation.to_string(),
            benign_probability: verdict.benign_pct,
            malignant_probability: verdict.malignant_pct,
        }
    }
}

/// What the diagnostics endpoint reports about a loaded model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_type: String,
    pub input_shape: Vec<Option<usize>>,
    pub output_shape: Vec<Option<usize>>,
    pub total_parameters: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enums_serialize_as_labels() {
        assert_eq!(
            serde_json::to_string(&Diagnosis::Malignant).unwrap(),
            "\"Malignant\""
        );
        assert_eq!(serde_json::to_string(&Confidence::Low).unwrap(), "\"Low\"");
    }

    #[test]
    fn test_response_mirrors_malignant_percentage() {
        let verdict = Verdict {
            diagnosis: Diagnosis::Benign,
            confidence: Confidence::Medium,
            benign_pct: 72.5,
            malignant_pct: 27.5,
        };
        let response = PredictionResponse::new(verdict, "text");
        assert_eq!(response.probability, 27.5);
        assert_eq!(response.malignant_probability, 27.5);
        assert_eq!(response.benign_probability, 72.5);
    }
}
