// ============================================================
// Layer 4 — Review Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec<ReviewSample>
// into tensors.
//
//   Input:  N samples, each with S token ids (pre-padded)
//   Output: ReviewBatch
//             token_ids [N, S]
//             lengths   [N]
//             labels    [N]
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::ReviewSample;

/// A batch of reviews ready for the model forward pass.
#[derive(Debug, Clone)]
pub struct ReviewBatch<B: Backend> {
    /// Token id sequences — shape: [batch_size, seq_len]
    pub token_ids: Tensor<B, 2, Int>,

    /// Real (unpadded) length of each sequence — shape: [batch_size]
    pub lengths: Tensor<B, 1, Int>,

    /// Targets, 0 or 1 — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

/// Holds the target device so tensors are created where the
/// model lives.
#[derive(Clone, Debug)]
pub struct ReviewBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> ReviewBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<ReviewSample, ReviewBatch<B>> for ReviewBatcher<B> {
    fn batch(&self, items: Vec<ReviewSample>) -> ReviewBatch<B> {
        let batch_size = items.len();
        // All sequences have the same length (pre-padded)
        let seq_len    = items.first().map(|s| s.token_ids.len()).unwrap_or(0);

        // Burn uses i32 for Int tensor data
        let ids_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.token_ids.iter().map(|&x| x as i32))
            .collect();

        let lengths: Vec<i32> = items.iter().map(|s| s.length as i32).collect();
        let labels:  Vec<i32> = items.iter().map(|s| s.label as i32).collect();

        let token_ids = Tensor::<B, 1, Int>::from_ints(
            ids_flat.as_slice(), &self.device
        ).reshape([batch_size, seq_len]);

        let lengths = Tensor::<B, 1, Int>::from_ints(lengths.as_slice(), &self.device);
        let labels  = Tensor::<B, 1, Int>::from_ints(labels.as_slice(), &self.device);

        ReviewBatch { token_ids, lengths, labels }
    }
}
