// ============================================================
// Layer 3 — Review Domain Types
// ============================================================
// A review is a piece of free text plus the sentiment class
// it was filed under on disk.
//
// The corpus layout is:
//   <root>/train/neg/*.txt   <root>/train/pos/*.txt
//   <root>/test/neg/*.txt    <root>/test/pos/*.txt
//
// Class labels follow the alphabetical order of the class
// directories, so "neg" is 0 and "pos" is 1.

use serde::Serialize;

/// The two sentiment classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Positive,
}

impl Sentiment {
    /// Both classes, in label order
    pub const ALL: [Sentiment; 2] = [Sentiment::Negative, Sentiment::Positive];

    /// Numeric training target: 0 = negative, 1 = positive
    pub fn label(self) -> u8 {
        match self {
            Sentiment::Negative => 0,
            Sentiment::Positive => 1,
        }
    }

    /// Inverse of `label()`. Any non-zero label is treated as positive.
    pub fn from_label(label: u8) -> Self {
        if label == 0 { Sentiment::Negative } else { Sentiment::Positive }
    }

    /// Name of the class subdirectory inside a split directory
    pub fn dir_name(self) -> &'static str {
        match self {
            Sentiment::Negative => "neg",
            Sentiment::Positive => "pos",
        }
    }

    /// Threshold a sigmoid output at 0.5
    pub fn from_probability(probability: f32) -> Self {
        if probability >= 0.5 { Sentiment::Positive } else { Sentiment::Negative }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Sentiment::Negative => "negative",
            Sentiment::Positive => "positive",
        })
    }
}

/// The two on-disk partitions of the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    Train,
    Test,
}

impl Split {
    pub fn dir_name(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test  => "test",
        }
    }
}

impl std::fmt::Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// One labelled review loaded from disk.
#[derive(Debug, Clone)]
pub struct Review {
    /// File name the review came from, kept for traceability
    pub source: String,

    /// Raw review text, before any cleaning
    pub text: String,

    /// The class directory the file was found in
    pub sentiment: Sentiment,
}

impl Review {
    pub fn new(
        source:    impl Into<String>,
        text:      impl Into<String>,
        sentiment: Sentiment,
    ) -> Self {
        Self {
            source: source.into(),
            text:   text.into(),
            sentiment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_follow_directory_order() {
        assert_eq!(Sentiment::Negative.label(), 0);
        assert_eq!(Sentiment::Positive.label(), 1);
        assert_eq!(Sentiment::from_label(0), Sentiment::Negative);
        assert_eq!(Sentiment::from_label(1), Sentiment::Positive);
    }

    #[test]
    fn test_threshold_is_inclusive_at_half() {
        assert_eq!(Sentiment::from_probability(0.5),  Sentiment::Positive);
        assert_eq!(Sentiment::from_probability(0.49), Sentiment::Negative);
        assert_eq!(Sentiment::from_probability(0.97), Sentiment::Positive);
    }

    #[test]
    fn test_dir_names() {
        assert_eq!(Sentiment::Negative.dir_name(), "neg");
        assert_eq!(Sentiment::Positive.dir_name(), "pos");
        assert_eq!(Split::Train.dir_name(), "train");
        assert_eq!(Split::Test.to_string(), "test");
    }
}
