// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load train/{neg,pos} reviews    (Layer 4 - data)
//   Step 2: Standardise text for vocab      (Layer 4 - data)
//   Step 3: Build / load vocabulary         (Layer 6 - infra)
//   Step 4: Vectorise reviews               (Layer 4 - data)
//   Step 5: Split train/validation          (Layer 4 - data)
//   Step 6: Save config                     (Layer 6 - infra)
//   Step 7: Run training loop               (Layer 5 - ml)
//   Step 8: Score the test split, if any    (Layer 2 - evaluate)
//
// Reference: Burn Book §5 (Training)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::application::evaluate_use_case::EvaluateUseCase;
use crate::data::{
    dataset::ReviewDataset,
    loader::ImdbLoader,
    preprocessor::Preprocessor,
    splitter::split_train_val,
    vectorizer::TextVectorizer,
};
use crate::domain::review::Split;
use crate::domain::traits::ReviewSource;
use crate::infra::{
    checkpoint::CheckpointManager,
    tokenizer_store::TokenizerStore,
};
use crate::ml::model::SentimentRnnConfig;
use crate::ml::trainer::{run_training, EvalReport, TrainingSummary};

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run. Saved as
// train_config.json so inference can rebuild the same model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_dir:        String,
    pub checkpoint_dir:  String,
    pub epochs:          usize,
    pub batch_size:      usize,
    pub lr:              f64,
    pub vocab_size:      usize,
    pub max_seq_len:     usize,
    pub embedding_dim:   usize,
    pub hidden_size:     usize,
    pub dense_size:      usize,
    pub dropout:         f64,
    pub val_fraction:    f64,
    pub seed:            u64,
    #[serde(default)]
    pub limit_per_class: Option<usize>,
    #[serde(default)]
    pub rebuild_vocab:   bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_dir:        "data/aclImdb".to_string(),
            checkpoint_dir:  "checkpoints".to_string(),
            epochs:          10,
            batch_size:      32,
            lr:              1e-3,
            vocab_size:      10_000,
            max_seq_len:     250,
            embedding_dim:   64,
            hidden_size:     64,
            dense_size:      64,
            dropout:         0.2,
            val_fraction:    0.2,
            seed:            42,
            limit_per_class: None,
            rebuild_vocab:   false,
        }
    }
}

impl TrainConfig {
    /// Architecture part of the config, in Burn's Config form
    pub fn model_config(&self) -> SentimentRnnConfig {
        SentimentRnnConfig::new(
            self.vocab_size,
            self.embedding_dim,
            self.hidden_size,
            self.dense_size,
        )
        .with_dropout(self.dropout)
    }

    /// Reject settings that would panic deep inside the pipeline.
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            bail!("--epochs must be at least 1");
        }
        if self.batch_size == 0 {
            bail!("--batch-size must be at least 1");
        }
        if self.max_seq_len == 0 {
            bail!("--max-seq-len must be at least 1");
        }
        // [PAD], [UNK] and at least one word
        if self.vocab_size < 3 {
            bail!("--vocab-size must be at least 3");
        }
        if !(0.0..1.0).contains(&self.val_fraction) {
            bail!("--val-fraction must be in [0, 1), got {}", self.val_fraction);
        }
        if !(0.0..1.0).contains(&self.dropout) {
            bail!("--dropout must be in [0, 1), got {}", self.dropout);
        }
        Ok(())
    }
}

/// Outcome of a full training run
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub summary: TrainingSummary,
    /// Present when the corpus has a test split
    pub test:    Option<EvalReport>,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<TrainOutcome> {
        let cfg = &self.config;
        cfg.validate()?;

        // ── Step 1: Load the training partition ──────────────────────────────
        let loader  = ImdbLoader::new(&cfg.data_dir).with_limit_per_class(cfg.limit_per_class);
        let reviews = loader.load_split(Split::Train)?;
        if reviews.is_empty() {
            bail!("No reviews found under '{}/train'", cfg.data_dir);
        }

        // ── Step 2: Standardise for the vocabulary builder ───────────────────
        let preprocessor = Preprocessor::new();
        let standardized: Vec<String> = reviews
            .iter()
            .map(|r| preprocessor.standardize(&r.text))
            .collect();

        // ── Step 3: Build / load vocabulary ───────────────────────────────────
        let tok_store = TokenizerStore::new(&cfg.checkpoint_dir);
        let tokenizer = tok_store.load_or_build(&standardized, cfg.vocab_size, cfg.rebuild_vocab)?;
        let vectorizer = TextVectorizer::new(tokenizer, cfg.max_seq_len);

        if vectorizer.vocab_size() > cfg.vocab_size {
            bail!(
                "Saved vocabulary has {} ids, more than --vocab-size {}. \
                 Pass --rebuild-vocab to rebuild it.",
                vectorizer.vocab_size(), cfg.vocab_size
            );
        }

        // ── Step 4: Vectorise ─────────────────────────────────────────────────
        let samples = vectorizer.to_samples(&reviews)?;
        tracing::info!("Vectorised {} reviews to length {}", samples.len(), cfg.max_seq_len);

        // ── Step 5: Train / validation split ──────────────────────────────────
        let (train_samples, val_samples) =
            split_train_val(samples, 1.0 - cfg.val_fraction, cfg.seed);
        let train_dataset = ReviewDataset::new(train_samples);
        let val_dataset   = ReviewDataset::new(val_samples);
        tracing::info!(
            "Split: {} train ({} positive), {} validation ({} positive)",
            train_dataset.sample_count(),
            train_dataset.positive_count(),
            val_dataset.sample_count(),
            val_dataset.positive_count(),
        );

        // ── Step 6: Save config for inference ─────────────────────────────────
        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir);
        ckpt_manager.save_config(cfg)?;

        // ── Step 7: Run training loop (Layer 5) ───────────────────────────────
        let summary = run_training(cfg, train_dataset, val_dataset, &ckpt_manager)?;

        // ── Step 8: Held-out test score ──────────────────────────────────────
        let test = if loader.has_split(Split::Test) {
            let evaluator = EvaluateUseCase::new(
                cfg.checkpoint_dir.clone(),
                cfg.data_dir.clone(),
                cfg.batch_size,
            )
            .with_limit_per_class(cfg.limit_per_class);
            Some(evaluator.execute()?)
        } else {
            tracing::info!("No test split under '{}', skipping evaluation", cfg.data_dir);
            None
        };

        Ok(TrainOutcome { summary, test })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::Path};

    fn write(root: &Path, rel: &str, text: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    fn corpus(root: &Path) {
        let pos = ["A wonderful, moving film.", "Brilliant acting and a wonderful story.", "Loved it, wonderful!"];
        let neg = ["A dreadful, boring film.", "Boring story and dreadful acting.", "Hated it.<br />Dreadful."];
        for split in ["train", "test"] {
            for (i, text) in pos.iter().enumerate() {
                write(root, &format!("{split}/pos/{i}_9.txt"), text);
            }
            for (i, text) in neg.iter().enumerate() {
                write(root, &format!("{split}/neg/{i}_1.txt"), text);
            }
        }
    }

    fn tiny_config(data: &Path, ckpt: &Path) -> TrainConfig {
        TrainConfig {
            data_dir:       data.display().to_string(),
            checkpoint_dir: ckpt.display().to_string(),
            epochs:         2,
            batch_size:     4,
            vocab_size:     50,
            max_seq_len:    8,
            embedding_dim:  4,
            hidden_size:    4,
            dense_size:     3,
            val_fraction:   0.34,
            ..TrainConfig::default()
        }
    }

    #[test]
    fn test_end_to_end_training_run() {
        let data = tempfile::tempdir().unwrap();
        let ckpt = tempfile::tempdir().unwrap();
        corpus(data.path());

        let outcome = TrainUseCase::new(tiny_config(data.path(), ckpt.path()))
            .execute()
            .unwrap();

        assert_eq!(outcome.summary.history.len(), 2);
        let test = outcome.test.unwrap();
        assert_eq!(test.samples, 6);

        for file in ["tokenizer.json", "train_config.json", "latest_epoch.json", "metrics.csv"] {
            assert!(ckpt.path().join(file).exists(), "missing {file}");
        }
        // "br" must never make it into the vocabulary
        let vocab = fs::read_to_string(ckpt.path().join("tokenizer.json")).unwrap();
        assert!(!vocab.contains("\"br\""));
    }

    #[test]
    fn test_retraining_without_validation_ignores_old_best_epoch() {
        let data = tempfile::tempdir().unwrap();
        let ckpt = tempfile::tempdir().unwrap();
        corpus(data.path());

        let first = TrainUseCase::new(TrainConfig {
            epochs: 3,
            ..tiny_config(data.path(), ckpt.path())
        })
        .execute()
        .unwrap();
        assert!(first.summary.best_epoch.is_some());

        // Different architecture and no validation set in the same directory
        let second = TrainUseCase::new(TrainConfig {
            epochs:       1,
            hidden_size:  8,
            val_fraction: 0.0,
            ..tiny_config(data.path(), ckpt.path())
        })
        .execute()
        .unwrap();

        assert!(second.summary.best_epoch.is_none());
        assert_eq!(second.test.unwrap().samples, 6);
        let manager = CheckpointManager::new(ckpt.path());
        assert!(manager.best_epoch().unwrap().is_none());
        assert_eq!(manager.latest_epoch().unwrap(), 1);
        assert!(!ckpt.path().join("model_epoch_3.mpk.gz").exists());
    }

    #[test]
    fn test_trained_model_separates_clear_reviews() {
        use crate::domain::review::Sentiment;
        use crate::domain::traits::SentimentClassifier;
        use crate::ml::{inferencer::Inferencer, InferBackend};

        let data = tempfile::tempdir().unwrap();
        let ckpt = tempfile::tempdir().unwrap();
        let pos = ["wonderful", "a film wonderful", "the cast wonderful", "wonderful wonderful"];
        let neg = ["dreadful", "a film dreadful", "the cast dreadful", "dreadful dreadful"];
        for (i, text) in pos.iter().enumerate() {
            write(data.path(), &format!("train/pos/{i}_9.txt"), text);
        }
        for (i, text) in neg.iter().enumerate() {
            write(data.path(), &format!("train/neg/{i}_1.txt"), text);
        }

        TrainUseCase::new(TrainConfig {
            data_dir:       data.path().display().to_string(),
            checkpoint_dir: ckpt.path().display().to_string(),
            epochs:         40,
            batch_size:     4,
            lr:             1e-2,
            vocab_size:     20,
            max_seq_len:    4,
            embedding_dim:  8,
            hidden_size:    8,
            dense_size:     4,
            dropout:        0.0,
            val_fraction:   0.0,
            ..TrainConfig::default()
        })
        .execute()
        .unwrap();

        let inferencer = Inferencer::<InferBackend>::from_checkpoint(
            &CheckpointManager::new(ckpt.path()),
            Default::default(),
        ).unwrap();
        let preds = inferencer
            .predict(&["The cast was wonderful!".to_string(), "Dreadful.".to_string()])
            .unwrap();

        assert!(preds[0].probability > 0.5, "positive scored {}", preds[0].probability);
        assert!(preds[1].probability < 0.5, "negative scored {}", preds[1].probability);
        assert_eq!(preds[0].sentiment, Sentiment::Positive);
        assert_eq!(preds[1].sentiment, Sentiment::Negative);
    }

    #[test]
    fn test_missing_train_split_is_an_error() {
        let data = tempfile::tempdir().unwrap();
        let ckpt = tempfile::tempdir().unwrap();
        let result = TrainUseCase::new(tiny_config(data.path(), ckpt.path())).execute();
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        assert!(TrainConfig::default().validate().is_ok());
        assert!(TrainConfig { epochs: 0, ..TrainConfig::default() }.validate().is_err());
        assert!(TrainConfig { val_fraction: 1.0, ..TrainConfig::default() }.validate().is_err());
        assert!(TrainConfig { vocab_size: 2, ..TrainConfig::default() }.validate().is_err());
    }

    #[test]
    fn test_model_config_carries_architecture() {
        let cfg   = TrainConfig { hidden_size: 32, dropout: 0.1, ..TrainConfig::default() };
        let model = cfg.model_config();
        assert_eq!(model.hidden_size, 32);
        assert_eq!(model.vocab_size, 10_000);
        assert!((model.dropout - 0.1).abs() < f64::EPSILON);
    }
}
