// ============================================================
// Layer 5 — Inferencer
// ============================================================
use anyhow::{bail, Result};
use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::data::{batcher::ReviewBatcher, dataset::ReviewSample, vectorizer::TextVectorizer};
use crate::domain::{prediction::Prediction, traits::SentimentClassifier};
use crate::infra::{checkpoint::CheckpointManager, tokenizer_store::TokenizerStore};
use crate::ml::model::SentimentRnn;

// Texts are scored in chunks of this many rows
const PREDICT_BATCH: usize = 64;

pub struct Inferencer<B: Backend> {
    model:      SentimentRnn<B>,
    vectorizer: TextVectorizer,
    device:     B::Device,
}

impl<B: Backend> Inferencer<B> {
    pub fn new(model: SentimentRnn<B>, vectorizer: TextVectorizer, device: B::Device) -> Self {
        Self { model, vectorizer, device }
    }

    /// Rebuild the model saved by `train`: config, vocabulary, then weights.
    pub fn from_checkpoint(ckpt_manager: &CheckpointManager, device: B::Device) -> Result<Self> {
        let cfg       = ckpt_manager.load_config()?;
        let tokenizer = TokenizerStore::new(ckpt_manager.dir()).load()?;
        let vectorizer = TextVectorizer::new(tokenizer, cfg.max_seq_len);

        if vectorizer.vocab_size() > cfg.vocab_size {
            bail!(
                "Vocabulary has {} ids but the model was built for {}; \
                 the checkpoint directory is inconsistent",
                vectorizer.vocab_size(), cfg.vocab_size
            );
        }

        let model: SentimentRnn<B> = cfg.model_config().init(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        tracing::info!("Model loaded from checkpoint '{}'", ckpt_manager.dir().display());

        Ok(Self::new(model, vectorizer, device))
    }

    pub fn model(&self) -> &SentimentRnn<B> {
        &self.model
    }

    pub fn vectorizer(&self) -> &TextVectorizer {
        &self.vectorizer
    }

    pub fn device(&self) -> &B::Device {
        &self.device
    }

    /// Sigmoid output for each text, in input order.
    pub fn probabilities(&self, texts: &[String]) -> Result<Vec<f32>> {
        let batcher = ReviewBatcher::<B>::new(self.device.clone());
        let mut out = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(PREDICT_BATCH) {
            let mut samples = Vec::with_capacity(chunk.len());
            for text in chunk {
                let token_ids = self.vectorizer.vectorize(text)?;
                samples.push(ReviewSample {
                    length: TextVectorizer::length(&token_ids),
                    token_ids,
                    label:  0,
                });
            }

            let batch = batcher.batch(samples);
            let probs = self.model
                .forward_probabilities(batch.token_ids, batch.lengths)
                .into_data()
                .convert::<f32>()
                .to_vec::<f32>()
                .map_err(|e| anyhow::anyhow!("Cannot read model output: {e:?}"))?;
            out.extend(probs);
        }

        Ok(out)
    }
}

impl<B: Backend> SentimentClassifier for Inferencer<B> {
    fn predict(&self, texts: &[String]) -> Result<Vec<Prediction>> {
        let probs = self.probabilities(texts)?;
        let predictions: Vec<Prediction> = texts
            .iter()
            .zip(probs)
            .map(|(text, p)| Prediction::new(text.clone(), p))
            .collect();

        for p in &predictions {
            tracing::debug!("p={:.4} ({}) for {:?}", p.probability, p.sentiment, p.text);
        }
        Ok(predictions)
    }
}
