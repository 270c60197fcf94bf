use serde::Serialize;

use crate::domain::review::Sentiment;

/// The model's verdict on one piece of text.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub text:        String,
    /// Sigmoid output in [0, 1]; close to 1.0 means positive
    pub probability: f32,
    pub sentiment:   Sentiment,
}

impl Prediction {
    pub fn new(text: impl Into<String>, probability: f32) -> Self {
        Self {
            text: text.into(),
            probability,
            sentiment: Sentiment::from_probability(probability),
        }
    }
}
