// ============================================================
// Layer 2 — Evaluate Use Case
// ============================================================
// Restores the trained model and reports loss and accuracy on
// the held-out test partition (<data-dir>/test/{neg,pos}).

use anyhow::{bail, Result};

use crate::data::{dataset::ReviewDataset, loader::ImdbLoader};
use crate::domain::review::Split;
use crate::domain::traits::ReviewSource;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::inferencer::Inferencer;
use crate::ml::trainer::{evaluate, EvalReport};
use crate::ml::{default_device, InferBackend};

pub struct EvaluateUseCase {
    checkpoint_dir:  String,
    data_dir:        String,
    batch_size:      usize,
    limit_per_class: Option<usize>,
}

impl EvaluateUseCase {
    pub fn new(checkpoint_dir: String, data_dir: String, batch_size: usize) -> Self {
        Self { checkpoint_dir, data_dir, batch_size, limit_per_class: None }
    }

    pub fn with_limit_per_class(mut self, limit: Option<usize>) -> Self {
        self.limit_per_class = limit;
        self
    }

    pub fn execute(&self) -> Result<EvalReport> {
        if self.batch_size == 0 {
            bail!("--batch-size must be at least 1");
        }

        let ckpt       = CheckpointManager::new(&self.checkpoint_dir);
        let inferencer = Inferencer::<InferBackend>::from_checkpoint(&ckpt, default_device())?;

        let reviews = ImdbLoader::new(&self.data_dir)
            .with_limit_per_class(self.limit_per_class)
            .load_split(Split::Test)?;
        let samples = inferencer.vectorizer().to_samples(&reviews)?;

        let report = evaluate(
            inferencer.model(),
            ReviewDataset::new(samples),
            self.batch_size,
            inferencer.device(),
        );

        tracing::info!(
            "Test split: {} reviews, loss={:.4}, accuracy={:.2}%",
            report.samples, report.loss, report.accuracy * 100.0
        );
        Ok(report)
    }
}
