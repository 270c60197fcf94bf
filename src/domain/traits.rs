// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer programs against these traits, not
// against the concrete loader or the Burn-backed model.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::prediction::Prediction;
use crate::domain::review::{Review, Split};

// ─── ReviewSource ─────────────────────────────────────────────────────────────
/// Any component that can load labelled reviews for a partition.
///
/// Implementations:
///   - ImdbLoader → reads <root>/<split>/{neg,pos}/*.txt
pub trait ReviewSource {
    fn load_split(&self, split: Split) -> Result<Vec<Review>>;
}

// ─── SentimentClassifier ──────────────────────────────────────────────────────
/// Any component that can score raw strings.
///
/// Implementations:
///   - Inferencer → the trained LSTM model
pub trait SentimentClassifier {
    /// Returns one prediction per input text, in input order.
    fn predict(&self, texts: &[String]) -> Result<Vec<Prediction>>;
}
