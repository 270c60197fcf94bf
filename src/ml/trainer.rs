// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Train + validation loop using Burn's DataLoader and Adam.
//
//   - Training runs on TrainBackend (Autodiff<..>) for gradients
//   - model.valid() drops autodiff and disables dropout, so the
//     validation pass runs on the inner backend
//   - Loss is binary cross-entropy on logits, the metric is
//     accuracy at the 0.5 probability threshold
//
// Every epoch writes a checkpoint, a metrics.csv row and, when
// validation loss improved, moves the best-epoch pointer.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::{bail, Result};
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::ReviewBatcher, dataset::ReviewDataset};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{correct_predictions, SentimentRnn};
use crate::ml::{default_device, TrainBackend};

/// Loss and accuracy over one dataset.
#[derive(Debug, Clone, Copy)]
pub struct EvalReport {
    pub loss:     f64,
    pub accuracy: f64,
    pub samples:  usize,
}

/// What a finished training run leaves behind.
#[derive(Debug, Clone)]
pub struct TrainingSummary {
    pub history:    Vec<EpochMetrics>,
    pub best_epoch: Option<usize>,
}

pub fn run_training(
    cfg:           &TrainConfig,
    train_dataset: ReviewDataset,
    val_dataset:   ReviewDataset,
    ckpt_manager:  &CheckpointManager,
) -> Result<TrainingSummary> {
    let device = default_device();
    tracing::info!("Using device: {:?}", device);
    train_loop::<TrainBackend>(cfg, train_dataset, val_dataset, ckpt_manager, &device)
}

pub fn train_loop<B: AutodiffBackend>(
    cfg:           &TrainConfig,
    train_dataset: ReviewDataset,
    val_dataset:   ReviewDataset,
    ckpt_manager:  &CheckpointManager,
    device:        &B::Device,
) -> Result<TrainingSummary> {
    if train_dataset.sample_count() == 0 {
        bail!("Training set is empty, nothing to fit");
    }

    B::seed(cfg.seed);

    // Pointers left by an earlier run would outlive this one
    ckpt_manager.reset()?;

    // ── Build model ───────────────────────────────────────────────────────────
    let mut model: SentimentRnn<B> = cfg.model_config().init(device);
    tracing::info!(
        "Model ready: vocab={}, embedding={}, lstm_hidden={}, dense={}",
        cfg.vocab_size, cfg.embedding_dim, cfg.hidden_size, cfg.dense_size
    );

    let mut optim = AdamConfig::new().init();

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_batcher = ReviewBatcher::<B>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train_dataset);

    let metrics_logger = MetricsLogger::new(ckpt_manager.dir())?;
    let mut history       = Vec::with_capacity(cfg.epochs);
    let mut best_val_loss = f64::INFINITY;
    let mut best_epoch    = None;

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;
        let mut correct  = 0usize;
        let mut seen     = 0usize;

        for batch in train_loader.iter() {
            seen += batch.labels.dims()[0];
            let (loss, logits) = model.forward_loss(
                batch.token_ids,
                batch.lengths,
                batch.labels.clone(),
            );

            loss_sum += loss.clone().into_scalar().elem::<f64>();
            batches  += 1;
            correct  += correct_predictions(logits, batch.labels);

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let train_loss = if batches > 0 { loss_sum / batches as f64 } else { f64::NAN };
        let train_acc  = if seen    > 0 { correct as f64 / seen as f64 } else { 0.0 };

        // ── Validation phase ──────────────────────────────────────────────────
        let val = evaluate(
            &model.valid(),
            val_dataset.clone(),
            cfg.batch_size,
            device,
        );

        let metrics = EpochMetrics::new(epoch, train_loss, train_acc, val.loss, val.accuracy);

        println!(
            "Epoch {:>3}/{} | loss={:.4} | accuracy={:.1}% | val_loss={:.4} | val_accuracy={:.1}%",
            epoch, cfg.epochs, train_loss, train_acc * 100.0,
            val.loss, val.accuracy * 100.0,
        );

        let is_best = metrics.is_improvement(best_val_loss);
        if is_best {
            best_val_loss = metrics.val_loss;
            best_epoch    = Some(epoch);
        }

        ckpt_manager.save_model(&model, epoch, is_best)?;
        metrics_logger.log(&metrics)?;
        history.push(metrics);
    }

    tracing::info!("Metrics written to '{}'", metrics_logger.csv_path().display());
    match best_epoch {
        Some(epoch) => tracing::info!("Training complete; best epoch {} (val_loss={:.4})", epoch, best_val_loss),
        None        => tracing::info!("Training complete; no validation set, keeping last epoch"),
    }

    Ok(TrainingSummary { history, best_epoch })
}

/// Average loss and accuracy of `model` over `dataset`.
/// An empty dataset reports NaN loss and zero accuracy.
pub fn evaluate<B: Backend>(
    model:      &SentimentRnn<B>,
    dataset:    ReviewDataset,
    batch_size: usize,
    device:     &B::Device,
) -> EvalReport {
    if dataset.sample_count() == 0 {
        return EvalReport { loss: f64::NAN, accuracy: 0.0, samples: 0 };
    }

    let batcher = ReviewBatcher::<B>::new(device.clone());
    let loader  = DataLoaderBuilder::new(batcher)
        .batch_size(batch_size)
        .num_workers(1)
        .build(dataset);

    let mut loss_sum = 0.0f64;
    let mut batches  = 0usize;
    let mut correct  = 0usize;
    let mut samples  = 0usize;

    for batch in loader.iter() {
        samples += batch.labels.dims()[0];
        let (loss, logits) = model.forward_loss(
            batch.token_ids,
            batch.lengths,
            batch.labels.clone(),
        );
        loss_sum += loss.into_scalar().elem::<f64>();
        batches  += 1;
        correct  += correct_predictions(logits, batch.labels);
    }

    EvalReport {
        loss:     if batches > 0 { loss_sum / batches as f64 } else { f64::NAN },
        accuracy: if samples > 0 { correct as f64 / samples as f64 } else { 0.0 },
        samples,
    }
}
