// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Builds, saves and loads the review vocabulary.
//
// The vocabulary is written as a HuggingFace tokenizer.json
// with a WordLevel model, so the same file drives training and
// inference through the `tokenizers` crate.
//
// Id layout:
//   0          [PAD]  — padding, never produced by the tokenizer
//   1          [UNK]  — any word outside the vocabulary
//   2..        words by descending corpus frequency,
//              ties broken alphabetically
//
// Texts must already be standardised (see Preprocessor) before
// they reach either the builder or the tokenizer, which only
// splits on whitespace.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use tokenizers::Tokenizer;

pub const PAD_TOKEN: &str = "[PAD]";
pub const UNK_TOKEN: &str = "[UNK]";
pub const PAD_ID:    u32  = 0;
pub const UNK_ID:    u32  = 1;

/// Number of ids reserved ahead of the corpus words
const RESERVED_IDS: usize = 2;

const TOKENIZER_FILE: &str = "tokenizer.json";

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load the saved tokenizer, or build one from `texts` when none
    /// exists yet or `rebuild` is set.
    pub fn load_or_build(
        &self,
        texts:      &[String],
        vocab_size: usize,
        rebuild:    bool,
    ) -> Result<Tokenizer> {
        let tok_path = self.dir.join(TOKENIZER_FILE);
        if tok_path.exists() && !rebuild {
            tracing::info!("Loading existing vocabulary from '{}'", tok_path.display());
            self.load()
        } else {
            tracing::info!("Building new vocabulary (vocab_size={})", vocab_size);
            self.build_and_save(texts, vocab_size)
        }
    }

    /// Load a previously saved tokenizer from JSON file
    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.dir.join(TOKENIZER_FILE);
        Tokenizer::from_file(&path)
            .map_err(|e| anyhow::anyhow!(
                "Cannot load tokenizer from '{}': {}. Have you run 'train' first?",
                path.display(), e
            ))
    }

    fn build_and_save(&self, texts: &[String], vocab_size: usize) -> Result<Tokenizer> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let words = build_vocabulary(texts, vocab_size);

        let mut vocab = serde_json::Map::new();
        vocab.insert(PAD_TOKEN.to_string(), serde_json::json!(PAD_ID));
        vocab.insert(UNK_TOKEN.to_string(), serde_json::json!(UNK_ID));
        for (i, word) in words.iter().enumerate() {
            vocab.insert(word.clone(), serde_json::json!(i + RESERVED_IDS));
        }

        let tokenizer_json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [
                {"id": PAD_ID, "content": PAD_TOKEN, "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": UNK_ID, "content": UNK_TOKEN, "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
            ],
            "normalizer": null,
            "pre_tokenizer": {
                "type": "WhitespaceSplit"
            },
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": vocab,
                "unk_token": UNK_TOKEN
            }
        });

        let tok_path = self.dir.join(TOKENIZER_FILE);
        std::fs::write(
            &tok_path,
            serde_json::to_string_pretty(&tokenizer_json)?
        ).with_context(|| format!("Cannot write '{}'", tok_path.display()))?;

        tracing::info!(
            "Vocabulary built with {} ids, saved to '{}'",
            words.len() + RESERVED_IDS,
            tok_path.display()
        );

        Tokenizer::from_file(&tok_path)
            .map_err(|e| anyhow::anyhow!("Cannot reload tokenizer: {e}"))
    }
}

/// Rank the words of standardised `texts` for the vocabulary.
/// Returns at most `vocab_size - 2` words; the two reserved ids
/// count against the cap.
pub fn build_vocabulary(texts: &[String], vocab_size: usize) -> Vec<String> {
    let mut freq: HashMap<&str, usize> = HashMap::new();
    for text in texts {
        for word in text.split_whitespace() {
            *freq.entry(word).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = freq
        .into_iter()
        .filter(|(w, _)| *w != PAD_TOKEN && *w != UNK_TOKEN)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(vocab_size.saturating_sub(RESERVED_IDS));

    ranked.into_iter().map(|(w, _)| w.to_string()).collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_vocabulary_ranked_by_frequency_then_alphabet() {
        let words = build_vocabulary(&texts(&["b a c a", "c a b d"]), 100);
        // a=3, b=2, c=2, d=1
        assert_eq!(words, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_vocabulary_cap_counts_reserved_ids() {
        let words = build_vocabulary(&texts(&["a a a b b c"]), 4);
        assert_eq!(words, vec!["a", "b"]);
    }

    #[test]
    fn test_built_tokenizer_maps_unknown_words() {
        let dir   = tempfile::tempdir().unwrap();
        let store = TokenizerStore::new(dir.path());
        let tok   = store
            .load_or_build(&texts(&["good good film", "bad film"]), 10, false)
            .unwrap();

        let enc = tok.encode("good plot film", false).unwrap();
        // film=2 (freq 2, alphabetically before good), good=3, plot=[UNK]
        assert_eq!(enc.get_ids(), &[3, UNK_ID, 2]);
        assert_eq!(tok.token_to_id(PAD_TOKEN), Some(PAD_ID));
    }

    #[test]
    fn test_existing_vocabulary_is_reused_unless_rebuilt() {
        let dir   = tempfile::tempdir().unwrap();
        let store = TokenizerStore::new(dir.path());
        store.load_or_build(&texts(&["alpha"]), 10, false).unwrap();

        let reused = store.load_or_build(&texts(&["beta"]), 10, false).unwrap();
        assert!(reused.token_to_id("alpha").is_some());
        assert!(reused.token_to_id("beta").is_none());

        let rebuilt = store.load_or_build(&texts(&["beta"]), 10, true).unwrap();
        assert!(rebuilt.token_to_id("beta").is_some());
    }

    #[test]
    fn test_load_without_training_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TokenizerStore::new(dir.path()).load().is_err());
    }
}
