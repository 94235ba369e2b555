// Stand-in for the model inference logic.
//
// A pure, stateless rule: callers above the age threshold get a positive
// prediction. Exists so the API surface is complete; it carries no design
// content of its own.

use serde::{Deserialize, Serialize};

/// Age above which the stub model predicts positive.
pub const AGE_THRESHOLD: u32 = 30;

/// Possible prediction outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prediction {
    Positive,
    Negative,
}

/// Input features for a prediction.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionFeatures {
    pub age: u32,
    #[serde(default)]
    pub income: Option<f64>,
    #[serde(default)]
    pub occupation: Option<String>,
}

/// Evaluate the stub model on the given features.
pub fn predict_from_features(features: &PredictionFeatures) -> Prediction {
    if features.age > AGE_THRESHOLD {
        Prediction::Positive
    } else {
        Prediction::Negative
    }
}
