//! The spelling capability consulted by the candidate filter.
//!
//! The engine never bundles a natural-language dictionary of its own; it asks
//! an injected [`Dictionary`] whether a candidate string is a real word.
//! [`WordList`] is the bundled implementation, backed by a plain word file,
//! and doubles as the test stand-in everywhere.

use std::collections::HashSet;
use std::io::BufRead;

/// Answers "is this string a valid word?". Case-insensitive.
///
/// Implementations must be shareable across search workers.
pub trait Dictionary: Send + Sync {
    fn is_valid_word(&self, word: &str) -> bool;
}

/// A dictionary backed by a set of known words.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    /// Build a word list from any collection of words.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Read a word list with one word per line. Blank lines and `#` comment
    /// lines are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut words = HashSet::new();
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            words.insert(word.to_lowercase());
        }
        Ok(Self { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for WordList {
    fn is_valid_word(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }
}
