// ============================================================
// Layer 4 — Text Vectorizer
// ============================================================
// Turns a raw review into a fixed-length row of token ids:
//
//   "Loved it!<br />Great."
//     → standardize → "loved it great"
//     → tokenize    → [412, 9, 48]
//     → pad/trunc   → [412, 9, 48, 0, 0, ..., 0]   (max_seq_len)
//
// Truncation keeps the first max_seq_len tokens; padding is
// appended at the end. The model reads the LSTM output at the
// last non-padding position, so trailing padding never reaches
// the classifier head.

use anyhow::{Context, Result};
use tokenizers::Tokenizer;

use crate::data::dataset::ReviewSample;
use crate::data::preprocessor::Preprocessor;
use crate::domain::review::Review;
use crate::infra::tokenizer_store::PAD_ID;

pub struct TextVectorizer {
    tokenizer:    Tokenizer,
    preprocessor: Preprocessor,
    max_seq_len:  usize,
}

impl TextVectorizer {
    pub fn new(tokenizer: Tokenizer, max_seq_len: usize) -> Self {
        Self {
            tokenizer,
            preprocessor: Preprocessor::new(),
            max_seq_len,
        }
    }

    /// Number of ids in the WordLevel vocabulary, [PAD] and [UNK] included
    pub fn vocab_size(&self) -> usize {
        self.tokenizer.get_vocab_size(false)
    }

    /// Standardise, tokenise, truncate and pad one text.
    /// Always returns exactly `max_seq_len` ids.
    pub fn vectorize(&self, text: &str) -> Result<Vec<u32>> {
        let clean = self.preprocessor.standardize(text);

        let mut ids: Vec<u32> = if clean.is_empty() {
            Vec::new()
        } else {
            self.tokenizer
                .encode(clean.as_str(), false)
                .map_err(|e| anyhow::anyhow!("Tokenisation error: {e}"))?
                .get_ids()
                .to_vec()
        };

        ids.truncate(self.max_seq_len);
        ids.resize(self.max_seq_len, PAD_ID);
        Ok(ids)
    }

    /// Vectorise a labelled review into a training sample.
    pub fn to_sample(&self, review: &Review) -> Result<ReviewSample> {
        let token_ids = self.vectorize(&review.text)?;
        Ok(ReviewSample {
            length: Self::length(&token_ids),
            token_ids,
            label:  review.sentiment.label(),
        })
    }

    /// Vectorise many reviews, logging progress every 5000.
    pub fn to_samples(&self, reviews: &[Review]) -> Result<Vec<ReviewSample>> {
        let mut samples = Vec::with_capacity(reviews.len());
        for (i, review) in reviews.iter().enumerate() {
            samples.push(
                self.to_sample(review)
                    .with_context(|| format!("Cannot vectorise '{}'", review.source))?,
            );
            if (i + 1) % 5000 == 0 {
                tracing::debug!("Vectorised {}/{} reviews", i + 1, reviews.len());
            }
        }
        Ok(samples)
    }

    /// Count of real (non-padding) tokens at the front of `ids`
    pub fn length(ids: &[u32]) -> usize {
        ids.iter().take_while(|&&id| id != PAD_ID).count()
    }
}
