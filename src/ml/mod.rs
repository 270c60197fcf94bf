// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn model code lives here.
//
//   model.rs      — The recurrent classifier
//                   • Token embedding
//                   • Single-layer LSTM
//                   • Hidden state at the last real token
//                   • Dense(ReLU) → Dense(1) → sigmoid
//
//   trainer.rs    — The training loop
//                   Forward pass, binary cross-entropy,
//                   backward pass, Adam step, validation,
//                   checkpoint and metrics per epoch.
//                   Also the test-set evaluator.
//
//   inferencer.rs — Loads config, vocabulary and weights,
//                   then scores raw strings.
//
// Backend selection: CPU (NdArray) by default, GPU (Wgpu) when
// the crate is built with `--features wgpu`.
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Hochreiter & Schmidhuber (1997) LSTM

/// Embedding + LSTM sentiment classifier
pub mod model;

/// Training loop with validation and checkpointing
pub mod trainer;

/// Inference engine — restores a checkpoint and scores text
pub mod inferencer;

use burn::prelude::Backend;

#[cfg(not(feature = "wgpu"))]
pub type InferBackend = burn::backend::NdArray;

#[cfg(feature = "wgpu")]
pub type InferBackend = burn::backend::Wgpu;

pub type TrainBackend = burn::backend::Autodiff<InferBackend>;

/// The default device of the selected backend
pub fn default_device() -> <InferBackend as Backend>::Device {
    Default::default()
}
