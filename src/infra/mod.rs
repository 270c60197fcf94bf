// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns:
//
//   checkpoint.rs      — Saving and loading model weights
//                        with Burn's CompactRecorder, plus the
//                        TrainConfig JSON needed to rebuild the
//                        model and the latest/best epoch pointers.
//
//   tokenizer_store.rs — Vocabulary persistence. Builds a
//                        WordLevel tokenizer.json from the
//                        training reviews or loads the saved
//                        one, so training and inference share
//                        the same ids.
//
//   metrics.rs         — Per-epoch loss and accuracy written to
//                        a CSV file.
//
// Reference: Rust Book §7 (Modules)
//            Burn Book §5 (Checkpointing)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Vocabulary building, saving, and loading
pub mod tokenizer_store;

/// Training metrics CSV logger
pub mod metrics;
