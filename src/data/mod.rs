// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from review files on disk to tensor batches.
//
//   <data-dir>/{train,test}/{neg,pos}/*.txt
//       │
//       ▼
//   ImdbLoader        → reads files, labels them by directory
//       │
//       ▼
//   Preprocessor      → strips <br /> markers, standardises text
//       │
//       ▼
//   TextVectorizer    → fixed-length token id rows
//       │
//       ▼
//   split_train_val   → seeded train / validation split
//       │
//       ▼
//   ReviewDataset     → implements Burn's Dataset trait
//       │
//       ▼
//   ReviewBatcher     → stacks samples into tensor batches
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads the labelled review corpus from disk
pub mod loader;

/// Strips HTML line breaks and standardises text
pub mod preprocessor;

/// Converts text to fixed-length token id sequences
pub mod vectorizer;

/// Implements Burn's Dataset trait for review samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Seeded shuffle and train/validation split
pub mod splitter;
