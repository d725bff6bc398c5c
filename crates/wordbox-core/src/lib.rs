//! Core engine for solving word-search puzzle boxes.
//!
//! A puzzle box is an N x N grid of letters. Given a target word length and
//! an optional hint prefix, the engine enumerates every path of adjacent
//! cells that could spell an answer, filters the candidates by vowel and
//! dictionary checks, and serves them one at a time for the player to accept
//! or reject. Accepting an answer consumes its cells and collapses the
//! remaining letters downward, shrinking the box for the next answer.
//!
//! The crate is pure engine: persistence, rendering, and user interaction
//! belong to the caller. The dictionary is an injected capability, so any
//! word source (or a fixed test list) plugs in through the
//! [`Dictionary`] trait.
//!
//! ```
//! use wordbox_core::{Selection, Session, SessionConfig, SearchOptions};
//!
//! let config = SessionConfig {
//!     side: 2,
//!     letters: "ABCD",
//!     word_length: 4,
//!     hint: "A",
//!     options: SearchOptions { vowel_check: true, dictionary_check: false },
//!     solved: &[],
//!     parallel: false,
//! };
//! let mut session = Session::start(config, None).unwrap();
//! let word = session.next_word(Selection::Unique).unwrap();
//! assert!(word.word.starts_with('A'));
//! ```

pub mod dictionary;
pub mod error;
pub mod grid;
pub mod search;
pub mod session;

pub use dictionary::{Dictionary, WordList};
pub use error::ConfigError;
pub use grid::{Grid, Position, MAX_WORD_LENGTH, VACANT};
pub use search::{
    practical_core_limit, FoundWord, PlacedLetter, SearchOptions, SearchReport, Selection,
};
pub use session::{
    CancelHandle, OptionToggle, SearchStats, Session, SessionConfig, WordCache,
};
