// ============================================================
// Layer 2 — Predict Use Case
// ============================================================
// Loads the trained model once and scores arbitrary strings.
// The raw text goes through the same cleaning and
// vectorisation as the training reviews did.

use anyhow::Result;

use crate::domain::prediction::Prediction;
use crate::domain::traits::SentimentClassifier;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::inferencer::Inferencer;
use crate::ml::{default_device, InferBackend};

pub struct PredictUseCase {
    classifier: Box<dyn SentimentClassifier>,
}

impl PredictUseCase {
    pub fn new(checkpoint_dir: &str) -> Result<Self> {
        let ckpt       = CheckpointManager::new(checkpoint_dir);
        let inferencer = Inferencer::<InferBackend>::from_checkpoint(&ckpt, default_device())?;
        Ok(Self::with_classifier(Box::new(inferencer)))
    }

    pub fn with_classifier(classifier: Box<dyn SentimentClassifier>) -> Self {
        Self { classifier }
    }

    pub fn predict(&self, texts: &[String]) -> Result<Vec<Prediction>> {
        self.classifier.predict(texts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scores by counting a single keyword, enough to exercise the wiring
    struct KeywordClassifier;

    impl SentimentClassifier for KeywordClassifier {
        fn predict(&self, texts: &[String]) -> Result<Vec<Prediction>> {
            Ok(texts
                .iter()
                .map(|t| Prediction::new(t.clone(), if t.contains("great") { 0.9 } else { 0.1 }))
                .collect())
        }
    }

    #[test]
    fn test_predictions_keep_input_order() {
        let use_case = PredictUseCase::with_classifier(Box::new(KeywordClassifier));
        let texts    = vec!["a great film".to_string(), "a dull film".to_string()];
        let preds    = use_case.predict(&texts).unwrap();
        assert_eq!(preds[0].text, "a great film");
        assert_eq!(preds[0].sentiment.to_string(), "positive");
        assert_eq!(preds[1].sentiment.to_string(), "negative");
    }

    #[test]
    fn test_missing_checkpoint_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(PredictUseCase::new(dir.path().to_str().unwrap()).is_err());
    }
}
