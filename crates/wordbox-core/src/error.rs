//! Error taxonomy for the engine.
//!
//! Everything here is a fatal configuration problem, rejected before any
//! state is touched. Running out of words or search branches is normal
//! control flow (`Option`/empty results), never an error.

use std::fmt;

/// A configuration problem that makes the request unservable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The letter string does not fill a `side` x `side` box.
    LetterCountMismatch { side: usize, letters: usize },
    /// A letter position lies outside the grid.
    InvalidPosition { row: usize, col: usize, side: usize },
    /// A removal position no longer holds the letter recorded for it.
    LetterMismatch {
        row: usize,
        col: usize,
        expected: char,
        found: char,
    },
    /// A search was requested for a zero-length word.
    ZeroWordLength,
    /// The requested word length exceeds the supported maximum.
    WordTooLong { length: usize },
    /// The dictionary check is on but no dictionary capability was supplied.
    DictionaryUnavailable,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LetterCountMismatch { side, letters } => write!(
                f,
                "incorrect number of letters ({}) for a box that is {} letters on a side",
                letters, side
            ),
            ConfigError::InvalidPosition { row, col, side } => write!(
                f,
                "position ({}, {}) is outside a box of side {}",
                row, col, side
            ),
            ConfigError::LetterMismatch {
                row,
                col,
                expected,
                found,
            } => write!(
                f,
                "cell ({}, {}) holds '{}' but the accepted word recorded '{}'",
                row, col, found, expected
            ),
            ConfigError::ZeroWordLength => write!(f, "cannot search for a zero-length word"),
            ConfigError::WordTooLong { length } => write!(
                f,
                "word length {} exceeds the supported maximum of {}",
                length,
                crate::grid::MAX_WORD_LENGTH
            ),
            ConfigError::DictionaryUnavailable => write!(
                f,
                "dictionary check is enabled but no dictionary was supplied"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
