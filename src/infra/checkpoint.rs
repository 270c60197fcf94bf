// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores model weights using Burn's CompactRecorder.
//
// File layout:
//   checkpoints/
//     model_epoch_1.mpk.gz   ← weights after epoch 1
//     model_epoch_2.mpk.gz   ← weights after epoch 2
//     ...
//     latest_epoch.json      ← number of the last saved epoch
//     best_epoch.json        ← epoch with the lowest val_loss
//     train_config.json      ← hyperparameters and architecture
//     tokenizer.json         ← vocabulary (see TokenizerStore)
//     metrics.csv            ← per-epoch metrics (see MetricsLogger)
//
// The config is needed at load time: the model must be rebuilt
// with the exact architecture before its weights can be loaded.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::{fs, path::{Path, PathBuf}};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::SentimentRnn;

const LATEST_FILE: &str = "latest_epoch.json";
const BEST_FILE:   &str = "best_epoch.json";
const CONFIG_FILE: &str = "train_config.json";
const WEIGHTS_PREFIX: &str = "model_epoch_";

/// Manages saving and loading of model checkpoints.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new CheckpointManager rooted at `dir`.
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save model weights for `epoch` and move the latest pointer.
    /// When `is_best` is set the best pointer moves too.
    pub fn save_model<B: Backend>(
        &self,
        model:   &SentimentRnn<B>,
        epoch:   usize,
        is_best: bool,
    ) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        // Path without extension — the recorder appends .mpk.gz
        let path = self.weights_path(epoch);

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .map_err(|e| anyhow::anyhow!(
                "Failed to save checkpoint to '{}': {e:?}", path.display()
            ))?;

        self.write_pointer(LATEST_FILE, epoch)?;
        if is_best {
            self.write_pointer(BEST_FILE, epoch)?;
        }

        tracing::debug!("Saved checkpoint: epoch {} (best={})", epoch, is_best);
        Ok(())
    }

    /// Restore weights into `model`, preferring the best epoch and
    /// falling back to the latest one.
    pub fn load_model<B: Backend>(
        &self,
        model:  SentimentRnn<B>,
        device: &B::Device,
    ) -> Result<SentimentRnn<B>> {
        let epoch = match self.best_epoch()? {
            Some(epoch) => epoch,
            None        => self.latest_epoch()?,
        };
        self.load_epoch(model, epoch, device)
    }

    /// Restore the weights saved after a specific epoch.
    pub fn load_epoch<B: Backend>(
        &self,
        model:  SentimentRnn<B>,
        epoch:  usize,
        device: &B::Device,
    ) -> Result<SentimentRnn<B>> {
        let path = self.weights_path(epoch);
        tracing::info!("Loading checkpoint from epoch {}", epoch);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .map_err(|e| anyhow::anyhow!(
                "Cannot load checkpoint '{}': {e:?}. Have you trained the model first?",
                path.display()
            ))?;

        Ok(model.load_record(record))
    }

    /// Forget every checkpoint of a previous run: both epoch pointers and
    /// all `model_epoch_*` weight files. Config and vocabulary are kept.
    pub fn reset(&self) -> Result<()> {
        if !self.dir.exists() {
            return Ok(());
        }

        let mut removed = 0usize;
        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Cannot read '{}'", self.dir.display()))?
        {
            let path = entry?.path();
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            let stale = name == LATEST_FILE
                || name == BEST_FILE
                || (name.starts_with(WEIGHTS_PREFIX) && name.ends_with(".mpk.gz"));
            if stale && path.is_file() {
                fs::remove_file(&path)
                    .with_context(|| format!("Cannot remove '{}'", path.display()))?;
                removed += 1;
            }
        }

        if removed > 0 {
            tracing::info!("Removed {} files from a previous run in '{}'", removed, self.dir.display());
        }
        Ok(())
    }

    /// Save the training configuration to JSON.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let path = self.dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    /// Load the training configuration saved by `train`.
    pub fn load_config(&self) -> Result<TrainConfig> {
        let path = self.dir.join(CONFIG_FILE);

        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read config from '{}'. \
                     Make sure you have run 'train' first.",
                    path.display()
                )
            })?;

        serde_json::from_str(&json)
            .with_context(|| format!("Malformed config in '{}'", path.display()))
    }

    /// Number of the last saved epoch. Errors if training never ran.
    pub fn latest_epoch(&self) -> Result<usize> {
        let path = self.dir.join(LATEST_FILE);
        let s = fs::read_to_string(&path)
            .with_context(|| format!(
                "Cannot find '{}'. Have you run 'train' first?", path.display()
            ))?;
        Ok(serde_json::from_str::<usize>(&s)?)
    }

    /// Epoch with the lowest validation loss, if one was recorded.
    pub fn best_epoch(&self) -> Result<Option<usize>> {
        let path = self.dir.join(BEST_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let s = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read '{}'", path.display()))?;
        Ok(Some(serde_json::from_str::<usize>(&s)?))
    }

    fn weights_path(&self, epoch: usize) -> PathBuf {
        self.dir.join(format!("{WEIGHTS_PREFIX}{epoch}"))
    }

    fn write_pointer(&self, file: &str, epoch: usize) -> Result<()> {
        let path = self.dir.join(file);
        fs::write(&path, serde_json::to_string(&epoch)?)
            .with_context(|| format!("Failed to write '{}'", path.display()))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use crate::ml::model::SentimentRnnConfig;

    type TestBackend = NdArray;

    fn model() -> SentimentRnn<TestBackend> {
        SentimentRnnConfig::new(12, 4, 4, 3).init(&Default::default())
    }

    fn logits(model: &SentimentRnn<TestBackend>) -> Vec<f32> {
        let device  = Default::default();
        let ids     = Tensor::<TestBackend, 1, Int>::from_ints([3, 4, 5, 0].as_slice(), &device)
            .reshape([1, 4]);
        let lengths = Tensor::<TestBackend, 1, Int>::from_ints([3].as_slice(), &device);
        model.forward(ids, lengths).into_data().to_vec().unwrap()
    }

    #[test]
    fn test_weights_round_trip() {
        let dir   = tempfile::tempdir().unwrap();
        let ckpt  = CheckpointManager::new(dir.path());
        let saved = model();
        ckpt.save_model(&saved, 1, true).unwrap();

        // A freshly initialised model has different random weights
        let restored = ckpt.load_model(model(), &Default::default()).unwrap();

        let a = logits(&saved);
        let b = logits(&restored);
        // CompactRecorder stores half precision
        assert!((a[0] - b[0]).abs() < 1e-2);
    }

    #[test]
    fn test_best_pointer_preferred_over_latest() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path());
        let m    = model();
        ckpt.save_model(&m, 1, true).unwrap();
        ckpt.save_model(&m, 2, false).unwrap();

        assert_eq!(ckpt.latest_epoch().unwrap(), 2);
        assert_eq!(ckpt.best_epoch().unwrap(), Some(1));
    }

    #[test]
    fn test_reset_forgets_previous_run() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path());
        let m    = model();
        ckpt.save_model(&m, 1, true).unwrap();
        ckpt.save_model(&m, 2, false).unwrap();
        ckpt.save_config(&TrainConfig::default()).unwrap();
        std::fs::write(dir.path().join("tokenizer.json"), "{}").unwrap();

        ckpt.reset().unwrap();

        assert!(ckpt.best_epoch().unwrap().is_none());
        assert!(ckpt.latest_epoch().is_err());
        assert!(ckpt.load_epoch(model(), 1, &Default::default()).is_err());
        assert!(ckpt.load_config().is_ok());
        assert!(dir.path().join("tokenizer.json").exists());
    }

    #[test]
    fn test_reset_on_missing_directory_is_a_no_op() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path().join("never-created"));
        assert!(ckpt.reset().is_ok());
    }

    #[test]
    fn test_config_round_trip() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path());
        let cfg  = TrainConfig { epochs: 3, hidden_size: 32, ..TrainConfig::default() };
        ckpt.save_config(&cfg).unwrap();

        let loaded = ckpt.load_config().unwrap();
        assert_eq!(loaded.epochs, 3);
        assert_eq!(loaded.hidden_size, 32);
    }

    #[test]
    fn test_missing_checkpoint_is_an_error() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path());
        assert!(ckpt.latest_epoch().is_err());
        assert!(ckpt.best_epoch().unwrap().is_none());
        assert!(ckpt.load_config().is_err());
        assert!(ckpt.load_model(model(), &Default::default()).is_err());
    }
}
