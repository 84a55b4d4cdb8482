use crate::domain::model::{Confidence, Diagnosis};

/// Narratives indexed by `[diagnosis][confidence]`.
const EXPLANATIONS: [[&str; 3]; 2] = [
    // Benign
    [
        "The image shows mostly benign characteristics, but the low confidence level suggests the need for follow-up examination.",
        "The analysis suggests benign characteristics, though some features warrant attention. Regular monitoring is recommended.",
        "The analysis indicates benign tissue characteristics with high confidence. The image shows normal cellular patterns consistent with healthy breast tissue.",
    ],
    // Malignant
    [
        "Some features in the image suggest potential malignant characteristics, but the low confidence level indicates the need for additional diagnostic procedures.",
        "The analysis shows some characteristics that may indicate malignant tissue, though the confidence level suggests further examination may be warranted.",
        "Based on the analysis of the uploaded image, the system has identified strong characteristics consistent with malignant tissue patterns. Multiple indicators suggest cancerous growth.",
    ],
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ExplanationGenerator;

impl ExplanationGenerator {
    pub fn explain(&self, diagnosis: Diagnosis, confidence: Confidence) -> &'static str {
        EXPLANATIONS[diagnosis as usize][confidence as usize]
    }
}
