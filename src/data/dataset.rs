use burn::data::dataset::Dataset;
use crate::domain::review::Sentiment;

/// One vectorised, padded review.
#[derive(Debug, Clone)]
pub struct ReviewSample {
    /// Exactly max_seq_len ids, 0-padded at the end
    pub token_ids: Vec<u32>,
    /// Number of real tokens before the padding
    pub length:    usize,
    /// 0 = negative, 1 = positive
    pub label:     u8,
}

#[derive(Debug, Clone)]
pub struct ReviewDataset {
    samples: Vec<ReviewSample>,
}

impl ReviewDataset {
    pub fn new(samples: Vec<ReviewSample>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }

    pub fn positive_count(&self) -> usize {
        self.samples.iter().filter(|s| Sentiment::from_label(s.label) == Sentiment::Positive).count()
    }
}

impl Dataset<ReviewSample> for ReviewDataset {
    fn get(&self, index: usize) -> Option<ReviewSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
