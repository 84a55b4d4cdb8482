use crate::domain::model::{Confidence, Diagnosis, Probability, Verdict};

const DECISION_BOUNDARY: f64 = 0.5;
const HIGH_CONFIDENCE_DISTANCE: f64 = 0.3;
const MEDIUM_CONFIDENCE_DISTANCE: f64 = 0.1;

/// Fixed-threshold mapping from P(malignant) to a verdict.
///
/// Out-of-range probabilities are not rejected; they flow through the same arithmetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerdictPolicy;

impl VerdictPolicy {
    pub fn classify(&self, probability: Probability) -> Verdict {
        let p = probability.value();

        let diagnosis = if p > DECISION_BOUNDARY {
            Diagnosis::Malignant
        } else {
            Diagnosis::Benign
        };

        let distance = (p - DECISION_BOUNDARY).abs();
        let confidence = if distance > HIGH_CONFIDENCE_DISTANCE {
            Confidence::High
        } else if distance > MEDIUM_CONFIDENCE_DISTANCE {
            Confidence::Medium
        } else {
            Confidence::Low
        };

        // each side is rounded on its own, so the pair may miss 100.00 by a hundredth
        Verdict {
            diagnosis,
            confidence,
            benign_pct: round_percent((1.0 - p) * 100.0),
            malignant_pct: round_percent(p * 100.0),
        }
    }
}

/// Rounds to two decimals on the exact binary value, so 0.015 (stored as
/// 0.01499...) becomes 0.01. Scaling by 100 first would round it up.
fn round_percent(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
