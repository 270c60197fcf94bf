// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing the core
// concepts of the system: labelled reviews, sentiment classes
// and predictions.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

// A labelled movie review and the sentiment / split enums
pub mod review;

// The result of scoring one review
pub mod prediction;

// Core abstractions (traits) that other layers implement
pub mod traits;
