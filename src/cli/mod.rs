// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and hands off to Layer 2.
//
//   1. `train`    — fits the model and saves checkpoints
//   2. `evaluate` — scores a checkpoint on the test split
//   3. `predict`  — scores review strings given on the command line
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, EvaluateArgs, PredictArgs, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "imdb-sentiment",
    version,
    about = "Train an LSTM sentiment classifier on IMDB reviews, then score new text."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Route to the matching use case. No computation happens here.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)    => run_train(args),
            Commands::Evaluate(args) => run_evaluate(args),
            Commands::Predict(args)  => run_predict(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Starting training on reviews in: {}", args.data_dir);

    let outcome = TrainUseCase::new(args.into()).execute()?;

    match outcome.summary.best_epoch {
        Some(epoch) => println!("Training complete. Best epoch: {epoch}."),
        None        => println!("Training complete. Checkpoint saved."),
    }
    if let Some(test) = outcome.test {
        println!(
            "Test: loss={:.4} | accuracy={:.2}% ({} reviews)",
            test.loss, test.accuracy * 100.0, test.samples
        );
    }
    Ok(())
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    use crate::application::evaluate_use_case::EvaluateUseCase;

    let report = EvaluateUseCase::new(args.checkpoint_dir, args.data_dir, args.batch_size)
        .with_limit_per_class(args.limit_per_class)
        .execute()?;

    println!(
        "Test: loss={:.4} | accuracy={:.2}% ({} reviews)",
        report.loss, report.accuracy * 100.0, report.samples
    );
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    use crate::application::predict_use_case::PredictUseCase;

    let use_case    = PredictUseCase::new(&args.checkpoint_dir)?;
    let predictions = use_case.predict(&args.texts)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&predictions)?);
        return Ok(());
    }
    for p in predictions {
        println!("{:.4}  {:<8}  {}", p.probability, p.sentiment, p.text);
    }
    Ok(())
}
