use burn::{
    nn::{
        loss::BinaryCrossEntropyLossConfig,
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
        Lstm, LstmConfig,
    },
    prelude::*,
    tensor::activation::{relu, sigmoid},
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct SentimentRnnConfig {
    pub vocab_size:    usize,
    pub embedding_dim: usize,
    pub hidden_size:   usize,
    pub dense_size:    usize,
    #[config(default = 0.2)]
    pub dropout:       f64,
}

impl SentimentRnnConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> SentimentRnn<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.embedding_dim).init(device);
        let lstm      = LstmConfig::new(self.embedding_dim, self.hidden_size, true).init(device);
        let dense     = LinearConfig::new(self.hidden_size, self.dense_size).init(device);
        let output    = LinearConfig::new(self.dense_size, 1).init(device);
        let dropout   = DropoutConfig::new(self.dropout).init();
        SentimentRnn { embedding, lstm, dense, output, dropout }
    }
}

/// Embedding → LSTM → last real step → Dropout → Dense(ReLU) → Dense(1).
#[derive(Module, Debug)]
pub struct SentimentRnn<B: Backend> {
    pub embedding: Embedding<B>,
    pub lstm:      Lstm<B>,
    pub dense:     Linear<B>,
    pub output:    Linear<B>,
    pub dropout:   Dropout,
}

impl<B: Backend> SentimentRnn<B> {
    /// token_ids: [batch, seq_len], lengths: [batch] → logits: [batch]
    pub fn forward(&self, token_ids: Tensor<B, 2, Int>, lengths: Tensor<B, 1, Int>) -> Tensor<B, 1> {
        let [batch_size, _seq_len] = token_ids.dims();

        let embedded = self.embedding.forward(token_ids); // [batch, seq_len, embedding_dim]
        let (outputs, _state) = self.lstm.forward(embedded, None); // [batch, seq_len, hidden]
        let [_, _, hidden_size] = outputs.dims();

        // Padding sits at the end of each row, so the state worth keeping is
        // the output at position length-1. Empty rows fall back to step 0.
        let last_step = lengths
            .sub_scalar(1)
            .clamp_min(0)
            .reshape([batch_size, 1, 1])
            .expand([batch_size, 1, hidden_size]);
        let pooled = outputs
            .gather(1, last_step)
            .reshape([batch_size, hidden_size]);

        let x = self.dropout.forward(pooled);
        let x = relu(self.dense.forward(x));
        self.output.forward(x).reshape([batch_size])
    }

    /// Logistic output in [0, 1]; values near 1.0 mean positive.
    pub fn forward_probabilities(
        &self,
        token_ids: Tensor<B, 2, Int>,
        lengths:   Tensor<B, 1, Int>,
    ) -> Tensor<B, 1> {
        sigmoid(self.forward(token_ids, lengths))
    }

    /// Binary cross-entropy computed on logits.
    pub fn forward_loss(
        &self,
        token_ids: Tensor<B, 2, Int>,
        lengths:   Tensor<B, 1, Int>,
        labels:    Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 1>) {
        let logits = self.forward(token_ids, lengths);
        let bce = BinaryCrossEntropyLossConfig::new()
            .with_logits(true)
            .init(&logits.device());
        let loss = bce.forward(logits.clone(), labels);
        (loss, logits)
    }
}

/// Number of rows whose thresholded logit matches the label.
pub fn correct_predictions<B: Backend>(logits: Tensor<B, 1>, labels: Tensor<B, 1, Int>) -> usize {
    // sigmoid(x) >= 0.5  ⇔  x >= 0
    let predicted = logits.greater_equal_elem(0.0).int();
    let correct: i64 = predicted.equal(labels).int().sum().into_scalar().elem::<i64>();
    correct.max(0) as usize
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn tiny_model() -> SentimentRnn<TestBackend> {
        let device = Default::default();
        SentimentRnnConfig::new(20, 8, 6, 4).init(&device)
    }

    fn batch() -> (Tensor<TestBackend, 2, Int>, Tensor<TestBackend, 1, Int>) {
        let device  = Default::default();
        let ids     = Tensor::<TestBackend, 1, Int>::from_ints([5, 6, 7, 0, 3, 0, 0, 0, 0, 0, 0, 0].as_slice(), &device)
            .reshape([3, 4]);
        let lengths = Tensor::<TestBackend, 1, Int>::from_ints([3, 1, 0].as_slice(), &device);
        (ids, lengths)
    }

    #[test]
    fn test_forward_returns_one_logit_per_row() {
        let model          = tiny_model();
        let (ids, lengths) = batch();
        assert_eq!(model.forward(ids, lengths).dims(), [3]);
    }

    #[test]
    fn test_probabilities_are_in_unit_interval() {
        let model          = tiny_model();
        let (ids, lengths) = batch();
        let probs: Vec<f32> = model
            .forward_probabilities(ids, lengths)
            .into_data()
            .to_vec()
            .unwrap();
        assert_eq!(probs.len(), 3);
        assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_padding_after_length_does_not_change_output() {
        let model  = tiny_model();
        let device = Default::default();
        let lengths = Tensor::<TestBackend, 1, Int>::from_ints([2].as_slice(), &device);

        let a = Tensor::<TestBackend, 1, Int>::from_ints([5, 6, 0, 0].as_slice(), &device)
            .reshape([1, 4]);
        let b = Tensor::<TestBackend, 1, Int>::from_ints([5, 6, 9, 9].as_slice(), &device)
            .reshape([1, 4]);

        let la: f32 = model.forward(a, lengths.clone()).into_scalar().elem();
        let lb: f32 = model.forward(b, lengths).into_scalar().elem();
        assert!((la - lb).abs() < 1e-5);
    }

    #[test]
    fn test_loss_is_a_positive_scalar() {
        let model          = tiny_model();
        let (ids, lengths) = batch();
        let labels = Tensor::<TestBackend, 1, Int>::from_ints([1, 0, 1].as_slice(), &Default::default());
        let (loss, logits) = model.forward_loss(ids, lengths, labels);
        let loss: f32 = loss.into_scalar().elem();
        assert!(loss > 0.0 && loss.is_finite());
        assert_eq!(logits.dims(), [3]);
    }

    #[test]
    fn test_correct_predictions_thresholds_at_zero() {
        let device = Default::default();
        let logits = Tensor::<TestBackend, 1>::from_floats([2.0, -1.0, 0.5, -3.0].as_slice(), &device);
        let labels = Tensor::<TestBackend, 1, Int>::from_ints([1, 0, 0, 1].as_slice(), &device);
        assert_eq!(correct_predictions(logits, labels), 2);
    }

    #[test]
    fn test_dropout_only_touches_the_lstm_output() {
        use burn::backend::Autodiff;
        type AdBackend = Autodiff<NdArray>;

        // Dropout is live on an autodiff backend. With p ≈ 1 the pooled LSTM
        // state is zeroed, so the dense layer alone decides the logit.
        let device = Default::default();
        let model: SentimentRnn<AdBackend> = SentimentRnnConfig::new(20, 8, 6, 4)
            .with_dropout(0.999_999)
            .init(&device);
        let ids     = Tensor::<AdBackend, 1, Int>::from_ints([5, 6, 7, 3, 4, 0].as_slice(), &device)
            .reshape([2, 3]);
        let lengths = Tensor::<AdBackend, 1, Int>::from_ints([3, 2].as_slice(), &device);

        let logits: Vec<f32> = model.forward(ids, lengths).into_data().to_vec().unwrap();
        let expected: Vec<f32> = model
            .output
            .forward(relu(model.dense.forward(Tensor::<AdBackend, 2>::zeros([2, 6], &device))))
            .reshape([2])
            .into_data()
            .to_vec()
            .unwrap();

        for (got, want) in logits.iter().zip(&expected) {
            assert!((got - want).abs() < 1e-5, "{got} != {want}");
        }
    }
}
