// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records training metrics to a CSV file after each epoch.
//
// Output file: checkpoints/metrics.csv
//
//   epoch,train_loss,train_acc,val_loss,val_acc
//   1,0.689123,0.534000,0.671002,0.588000
//   2,0.552310,0.731500,0.498871,0.774000
//   ...
//
// If val_loss starts rising while train_loss keeps falling the
// model is overfitting; the best_epoch.json pointer written by
// the CheckpointManager marks the epoch before that happened.
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};
use serde::{Deserialize, Serialize};

const HEADER: &str = "epoch,train_loss,train_acc,val_loss,val_acc";

/// One row of metrics for a single training epoch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    pub epoch: usize,

    /// Average binary cross-entropy over the training batches
    pub train_loss: f64,

    /// Fraction of training reviews classified correctly
    pub train_acc: f64,

    /// Average binary cross-entropy on the validation set
    pub val_loss: f64,

    /// Fraction of validation reviews classified correctly
    pub val_acc: f64,
}

impl EpochMetrics {
    pub fn new(
        epoch:      usize,
        train_loss: f64,
        train_acc:  f64,
        val_loss:   f64,
        val_acc:    f64,
    ) -> Self {
        Self { epoch, train_loss, train_acc, val_loss, val_acc }
    }

    /// Returns true if this epoch improved over the previous best val_loss.
    /// A NaN val_loss (no validation set) never counts as an improvement.
    pub fn is_improvement(&self, best_val_loss: f64) -> bool {
        self.val_loss < best_val_loss
    }
}

/// Appends epoch metrics to a CSV file.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger, starting a fresh CSV with its
    /// header row. Any previous run's file is replaced.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create '{}'", dir.display()))?;

        let csv_path = dir.join("metrics.csv");
        let mut f = fs::File::create(&csv_path)
            .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
        writeln!(f, "{HEADER}")?;
        tracing::debug!("Created metrics CSV: '{}'", csv_path.display());

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        writeln!(
            f,
            "{},{:.6},{:.6},{:.6},{:.6}",
            m.epoch,
            m.train_loss,
            m.train_acc,
            m.val_loss,
            m.val_acc,
        )?;

        tracing::debug!(
            "Logged epoch {} metrics: train_loss={:.4}, val_loss={:.4}",
            m.epoch,
            m.train_loss,
            m.val_loss,
        );

        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}
