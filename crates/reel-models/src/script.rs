//! Narration script produced by the text generation engine.

use serde::{Deserialize, Serialize};

/// A generated narration script.
///
/// Immutable once produced; both caption timing and content segmentation
/// tokenize it on whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    text: String,
}

impl Script {
    /// Create a script from raw generated text, trimming surrounding whitespace.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into().trim().to_string(),
        }
    }

    /// The full script text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whitespace-separated words.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace()
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.words().count()
    }

    /// True if the script contains no words.
    pub fn is_empty(&self) -> bool {
        self.text.split_whitespace().next().is_none()
    }
}

impl std::fmt::Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        let script = Script::new("Hello world. This is a test.");
        assert_eq!(script.word_count(), 6);
    }

    #[test]
    fn test_trims_input() {
        let script = Script::new("  padded text \n");
        assert_eq!(script.text(), "padded text");
    }

    #[test]
    fn test_empty() {
        assert!(Script::new("").is_empty());
        assert!(Script::new("   \n\t").is_empty());
        assert!(!Script::new("word").is_empty());
    }
}
