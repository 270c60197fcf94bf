// ============================================================
// Layer 4 — Review Loader
// ============================================================
// Loads the IMDB review corpus from its directory layout:
//
//   <root>/
//     train/
//       neg/ 0_3.txt 1_1.txt ...
//       pos/ 0_9.txt 1_7.txt ...
//       unsup/ ...              ← ignored, has no label
//     test/
//       neg/ ...
//       pos/ ...
//
// Each file is one review; its label is the name of the class
// directory it sits in. Files are visited in sorted path order
// so two runs over the same corpus see the same sequence.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (Reading a File)

use anyhow::{bail, Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::review::{Review, Sentiment, Split};
use crate::domain::traits::ReviewSource;

/// Loads labelled reviews from a corpus root directory.
/// Implements the ReviewSource trait from Layer 3.
pub struct ImdbLoader {
    /// Path to the corpus root (the directory holding train/ and test/)
    root: PathBuf,

    /// Optional cap on files read per class, for quick runs
    limit_per_class: Option<usize>,
}

impl ImdbLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), limit_per_class: None }
    }

    /// Read at most `limit` files from each class directory
    pub fn with_limit_per_class(mut self, limit: Option<usize>) -> Self {
        self.limit_per_class = limit;
        self
    }

    /// True when `<root>/<split>` exists on disk
    pub fn has_split(&self, split: Split) -> bool {
        self.root.join(split.dir_name()).is_dir()
    }
}

impl ReviewSource for ImdbLoader {
    fn load_split(&self, split: Split) -> Result<Vec<Review>> {
        let split_dir = self.root.join(split.dir_name());

        if !split_dir.is_dir() {
            bail!(
                "Split directory '{}' does not exist. Expected <data-dir>/{}/{{neg,pos}}/*.txt",
                split_dir.display(),
                split.dir_name()
            );
        }

        let mut reviews = Vec::new();

        for sentiment in Sentiment::ALL {
            let class_dir = split_dir.join(sentiment.dir_name());

            // A missing class is suspicious but not fatal: the caller
            // will see a one-sided dataset in the logged counts.
            if !class_dir.is_dir() {
                tracing::warn!(
                    "Class directory '{}' is missing — no {} reviews in {} split",
                    class_dir.display(),
                    sentiment,
                    split
                );
                continue;
            }

            let before = reviews.len();
            load_class_dir(&class_dir, sentiment, self.limit_per_class, &mut reviews)?;
            tracing::debug!(
                "{} split: {} {} reviews from '{}'",
                split,
                reviews.len() - before,
                sentiment,
                class_dir.display()
            );
        }

        tracing::info!(
            "Loaded {} reviews from {} split ({} positive)",
            reviews.len(),
            split,
            reviews.iter().filter(|r| r.sentiment == Sentiment::Positive).count()
        );
        Ok(reviews)
    }
}

/// Read every `.txt` file in one class directory into `out`.
fn load_class_dir(
    dir:       &Path,
    sentiment: Sentiment,
    limit:     Option<usize>,
    out:       &mut Vec<Review>,
) -> Result<()> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Cannot read directory '{}'", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("txt"))
        .collect();

    // read_dir order is platform dependent
    paths.sort();

    if let Some(limit) = limit {
        paths.truncate(limit);
    }

    for path in paths {
        match fs::read_to_string(&path) {
            Ok(text) => {
                let source = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("unknown")
                    .to_string();
                out.push(Review::new(source, text, sentiment));
            }
            // Log a warning but continue — don't fail on one bad file
            Err(e) => {
                tracing::warn!("Skipping '{}': {}", path.display(), e);
            }
        }
    }

    Ok(())
}
