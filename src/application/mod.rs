// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only: each use case tells the data,
// ml and infra layers what to do, in which order.
//
//   - No model code here (that's Layer 5)
//   - No printing here (that's Layer 1)
//
// Reference: Clean Architecture pattern

// Load → vectorise → fit → checkpoint → test score
pub mod train_use_case;

// Restore a checkpoint and score the test partition
pub mod evaluate_use_case;

// Restore a checkpoint and score new strings
pub mod predict_use_case;
