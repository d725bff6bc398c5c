//! Data carried between the search, the cache, and the caller.

use serde::{Deserialize, Serialize};

use crate::grid::Position;

/// One letter of a found word and the cell it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedLetter {
    pub letter: char,
    pub pos: Position,
}

/// A complete search path: the word it spells plus the cells it used,
/// ordered first letter to last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundWord {
    pub word: String,
    pub letters: Vec<PlacedLetter>,
}

impl FoundWord {
    /// The cell positions of the word, in traversal order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.letters.iter().map(|p| p.pos)
    }
}

/// Which filters the candidate filter applies. Both default to on, as in
/// a fresh solving session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Require at least one of A/E/I/O/U/Y in the word.
    pub vowel_check: bool,
    /// Require the injected dictionary to know the word.
    pub dictionary_check: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            vowel_check: true,
            dictionary_check: true,
        }
    }
}

/// Which word the cache should hand out next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The next word not yet returned in this flush epoch.
    Unique,
    /// The next path spelling the same word as the one returned last.
    SameVariant,
    /// Forget previously returned words, then behave like `Unique`.
    FlushAndRestart,
}

/// What one search pass produced.
#[derive(Debug, Clone, Default)]
pub struct SearchReport {
    /// Words that survived the candidate filter, grouped by starting cell.
    pub words: Vec<FoundWord>,
    /// Starting cells whose enumeration ran to completion.
    pub starts_searched: usize,
    /// Complete paths examined before filtering.
    pub candidates_found: usize,
}
