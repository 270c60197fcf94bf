// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands: `train`, `evaluate` and `predict`.
//
// clap's derive macros generate --help text, error messages for
// missing args and string → number conversion.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::train_use_case::TrainConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the LSTM classifier on <data-dir>/train
    Train(TrainArgs),

    /// Score a trained checkpoint on <data-dir>/test
    Evaluate(EvaluateArgs),

    /// Classify one or more review texts
    Predict(PredictArgs),
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Corpus root holding train/{neg,pos} and optionally test/{neg,pos}
    #[arg(long, default_value = "data/aclImdb")]
    pub data_dir: String,

    /// Directory for weights, vocabulary, config and metrics
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    /// Number of reviews per optimiser step
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Vocabulary cap, including the [PAD] and [UNK] ids
    #[arg(long, default_value_t = 10_000)]
    pub vocab_size: usize,

    /// Reviews are truncated / padded to this many tokens
    #[arg(long, default_value_t = 250)]
    pub max_seq_len: usize,

    /// Width of each token's embedding vector
    #[arg(long, default_value_t = 64)]
    pub embedding_dim: usize,

    /// LSTM hidden state size
    #[arg(long, default_value_t = 64)]
    pub hidden_size: usize,

    /// Width of the fully-connected layer after the LSTM
    #[arg(long, default_value_t = 64)]
    pub dense_size: usize,

    /// Dropout probability applied to the LSTM output
    #[arg(long, default_value_t = 0.2)]
    pub dropout: f64,

    /// Share of the training partition held out for validation
    #[arg(long, default_value_t = 0.2)]
    pub val_fraction: f64,

    /// Seed for weight init, the validation split and batch shuffling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Read at most this many files per class (quick experiments)
    #[arg(long)]
    pub limit_per_class: Option<usize>,

    /// Rebuild tokenizer.json even if one already exists
    #[arg(long)]
    pub rebuild_vocab: bool,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_dir:        a.data_dir,
            checkpoint_dir:  a.checkpoint_dir,
            epochs:          a.epochs,
            batch_size:      a.batch_size,
            lr:              a.lr,
            vocab_size:      a.vocab_size,
            max_seq_len:     a.max_seq_len,
            embedding_dim:   a.embedding_dim,
            hidden_size:     a.hidden_size,
            dense_size:      a.dense_size,
            dropout:         a.dropout,
            val_fraction:    a.val_fraction,
            seed:            a.seed,
            limit_per_class: a.limit_per_class,
            rebuild_vocab:   a.rebuild_vocab,
        }
    }
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Corpus root holding test/{neg,pos}
    #[arg(long, default_value = "data/aclImdb")]
    pub data_dir: String,

    /// Directory where `train` saved its checkpoints
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    #[arg(long, default_value_t = 64)]
    pub batch_size: usize,

    /// Read at most this many files per class
    #[arg(long)]
    pub limit_per_class: Option<usize>,
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Directory where `train` saved its checkpoints
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Print predictions as a JSON array instead of a table
    #[arg(long)]
    pub json: bool,

    /// Review texts to classify
    #[arg(required = true)]
    pub texts: Vec<String>,
}
