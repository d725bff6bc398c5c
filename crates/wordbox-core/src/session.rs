//! A solving session: one puzzle box, one target answer, served word by word.
//!
//! The session owns the grid, runs the search, and hands out candidates
//! through the [`WordCache`] until the caller accepts one. Accepting a word
//! consumes its cells and collapses the box, permanently shrinking the search
//! space for the next answer. Switching puzzles or answers means dropping the
//! session and starting a fresh one; that is the "full reset".

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;

use crate::dictionary::Dictionary;
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::search::{self, FoundWord, SearchOptions, Selection};

/// A toggle for one of the session's filter options (the caller-facing
/// "reset options" of the solving screen).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionToggle {
    FlipVowelCheck,
    FlipDictionaryCheck,
    ForceDictionaryOn,
}

/// Shared cancellation flag for a session's outstanding searches. Clone it
/// out of the session and trip it from any thread; cancelled tasks contribute
/// nothing, and results that already completed are unaffected.
#[derive(Debug, Clone)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Counters from the most recent search pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    pub starts_searched: usize,
    pub candidates_found: usize,
    pub words_kept: usize,
}

/// Serves enumerated candidates one at a time.
///
/// The queue is consumed destructively, like the original word pipeline:
/// words skipped while looking for a match are discarded, not reordered.
#[derive(Debug, Default)]
pub struct WordCache {
    queue: VecDeque<FoundWord>,
    seen: HashSet<String>,
    last_returned: Option<FoundWord>,
}

impl WordCache {
    /// Replace the queued candidates and forget all selection state.
    pub fn reload(&mut self, words: Vec<FoundWord>) {
        self.queue = words.into();
        self.seen.clear();
        self.last_returned = None;
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Hand out the next word for `selection`. `None` is the end-of-results
    /// sentinel; producing it also clears the seen-word set so a reloaded or
    /// refilled queue starts a fresh epoch.
    pub fn next(&mut self, selection: Selection) -> Option<FoundWord> {
        match selection {
            Selection::FlushAndRestart => {
                self.seen.clear();
                self.next_unique()
            }
            Selection::Unique => self.next_unique(),
            Selection::SameVariant => match self.last_returned.take() {
                // No word has been returned yet; fall back to unique.
                None => self.next_unique(),
                Some(previous) => self.next_variant(previous),
            },
        }
    }

    fn next_unique(&mut self) -> Option<FoundWord> {
        loop {
            let Some(word) = self.queue.pop_front() else {
                return self.exhausted();
            };
            if self.seen.contains(&word.word) {
                continue;
            }
            self.seen.insert(word.word.clone());
            self.last_returned = Some(word.clone());
            return Some(word);
        }
    }

    /// Skip forward to the next path spelling the same word as `previous`.
    fn next_variant(&mut self, previous: FoundWord) -> Option<FoundWord> {
        loop {
            let Some(word) = self.queue.pop_front() else {
                return self.exhausted();
            };
            if word.word == previous.word {
                self.last_returned = Some(word.clone());
                return Some(word);
            }
        }
    }

    fn exhausted(&mut self) -> Option<FoundWord> {
        self.seen.clear();
        self.last_returned = None;
        None
    }
}

/// Everything needed to open a session.
#[derive(Debug, Clone)]
pub struct SessionConfig<'a> {
    /// Length of one side of the puzzle box.
    pub side: usize,
    /// Puzzle letters, row by row, top-left to bottom-right.
    pub letters: &'a str,
    /// Length of the answer being hunted.
    pub word_length: usize,
    /// Known prefix of the answer; empty for none. Upper-cased internally.
    pub hint: &'a str,
    pub options: SearchOptions,
    /// Answers already accepted for this puzzle, replayed into the fresh box
    /// before the search runs.
    pub solved: &'a [FoundWord],
    /// Use the parallel work distributor; off means the single-threaded
    /// fallback.
    pub parallel: bool,
}

/// One puzzle/answer solving session.
pub struct Session {
    grid: Grid,
    cache: WordCache,
    options: SearchOptions,
    word_length: usize,
    hint: String,
    dictionary: Option<Arc<dyn Dictionary>>,
    cancel: Arc<AtomicBool>,
    parallel: bool,
    stats: SearchStats,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("grid", &self.grid)
            .field("cache", &self.cache)
            .field("options", &self.options)
            .field("word_length", &self.word_length)
            .field("hint", &self.hint)
            .field("dictionary", &self.dictionary.as_ref().map(|_| "<dyn Dictionary>"))
            .field("cancel", &self.cancel)
            .field("parallel", &self.parallel)
            .field("stats", &self.stats)
            .finish()
    }
}

impl Session {
    /// Build the box, replay previously accepted answers, run the search,
    /// and load the word cache.
    ///
    /// A missing dictionary is rejected here, at session start, when the
    /// dictionary check is on; it would otherwise be consulted for every
    /// candidate.
    pub fn start(
        config: SessionConfig<'_>,
        dictionary: Option<Arc<dyn Dictionary>>,
    ) -> Result<Self, ConfigError> {
        let mut grid = Grid::new(config.side, config.letters)?;
        for answer in config.solved {
            grid.remove_word(answer)?;
        }

        let mut session = Self {
            grid,
            cache: WordCache::default(),
            options: config.options,
            word_length: config.word_length,
            hint: config.hint.trim().to_uppercase(),
            dictionary,
            cancel: Arc::new(AtomicBool::new(false)),
            parallel: config.parallel,
            stats: SearchStats::default(),
        };
        session.refresh_words()?;
        Ok(session)
    }

    /// Re-run the work distributor over the current grid with the current
    /// options and reload the cache. Called at session start and after
    /// option toggles or accepted answers change what is findable.
    pub fn refresh_words(&mut self) -> Result<SearchStats, ConfigError> {
        let dictionary = self.dictionary.as_deref();
        let report = if self.parallel {
            search::search_parallel(
                &self.grid,
                self.word_length,
                &self.hint,
                self.options,
                dictionary,
                &self.cancel,
            )?
        } else {
            search::search_sequential(
                &self.grid,
                self.word_length,
                &self.hint,
                self.options,
                dictionary,
                &self.cancel,
            )?
        };

        self.stats = SearchStats {
            starts_searched: report.starts_searched,
            candidates_found: report.candidates_found,
            words_kept: report.words.len(),
        };
        debug!(
            "{} usable words found out of {} candidate paths",
            self.stats.words_kept, self.stats.candidates_found
        );
        self.cache.reload(report.words);
        Ok(self.stats)
    }

    /// The next candidate for `selection`, or `None` when the current pass
    /// is exhausted.
    pub fn next_word(&mut self, selection: Selection) -> Option<FoundWord> {
        self.cache.next(selection)
    }

    /// Accept `word` as the answer: consume its cells and collapse the box.
    /// The queued candidates are not re-searched automatically; the caller
    /// decides when to move on to the next answer.
    pub fn accept_word(&mut self, word: &FoundWord) -> Result<(), ConfigError> {
        self.grid.remove_word(word)
    }

    /// Current letters, row by row; vacant cells carry the sentinel glyph.
    pub fn grid_letters(&self) -> Vec<Vec<char>> {
        self.grid.letters()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Flip or force one filter option. Takes effect at the next
    /// [`refresh_words`](Self::refresh_words) pass.
    pub fn set_option(&mut self, toggle: OptionToggle) {
        match toggle {
            OptionToggle::FlipVowelCheck => {
                self.options.vowel_check = !self.options.vowel_check;
            }
            OptionToggle::FlipDictionaryCheck => {
                self.options.dictionary_check = !self.options.dictionary_check;
            }
            OptionToggle::ForceDictionaryOn => {
                self.options.dictionary_check = true;
            }
        }
    }

    /// Request cancellation of outstanding search work. The flag stays
    /// tripped for the rest of this session; a full reset means starting a
    /// new one.
    pub fn cancel_outstanding(&self) {
        debug!("cancelling outstanding word searches");
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// A cancellation handle that can outlive borrows of the session, for
    /// tripping [`cancel_outstanding`](Self::cancel_outstanding) from
    /// another thread while a search is in flight.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(Arc::clone(&self.cancel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordList;
    use crate::grid::{Position, VACANT};
    use crate::search::PlacedLetter;

    const NO_CHECKS: SearchOptions = SearchOptions {
        vowel_check: false,
        dictionary_check: false,
    };

    fn config<'a>(
        side: usize,
        letters: &'a str,
        word_length: usize,
        hint: &'a str,
    ) -> SessionConfig<'a> {
        SessionConfig {
            side,
            letters,
            word_length,
            hint,
            options: NO_CHECKS,
            solved: &[],
            parallel: false,
        }
    }

    fn placed(letter: char, row: usize, col: usize) -> PlacedLetter {
        PlacedLetter {
            letter,
            pos: Position::new(row, col),
        }
    }

    #[test]
    fn test_unique_never_repeats_within_an_epoch() {
        // A B
        // A B
        // Two-letter searches produce the same texts from several paths.
        let mut session = Session::start(config(2, "ABAB", 2, ""), None).unwrap();
        let mut texts = Vec::new();
        while let Some(word) = session.next_word(Selection::Unique) {
            texts.push(word.word);
        }
        let unique: HashSet<&String> = texts.iter().collect();
        assert_eq!(unique.len(), texts.len(), "a text was repeated: {:?}", texts);
        assert!(texts.contains(&"AB".to_string()));
        assert!(texts.contains(&"BA".to_string()));
    }

    #[test]
    fn test_same_variant_returns_only_matching_texts() {
        // A B
        // C B
        // The single A reaches both Bs: exactly two paths spell AB.
        let mut session = Session::start(config(2, "ABCB", 2, "AB"), None).unwrap();
        let first = session.next_word(Selection::Unique).unwrap();
        assert_eq!(first.word, "AB");
        let variant = session.next_word(Selection::SameVariant).unwrap();
        assert_eq!(variant.word, "AB");
        assert_ne!(variant.letters, first.letters);
        assert!(session.next_word(Selection::SameVariant).is_none());
    }

    #[test]
    fn test_unique_skips_duplicate_texts() {
        let mut session = Session::start(config(2, "ABCB", 2, "AB"), None).unwrap();
        assert!(session.next_word(Selection::Unique).is_some());
        // The second AB path is a duplicate text, so the pass is exhausted.
        assert!(session.next_word(Selection::Unique).is_none());
    }

    #[test]
    fn test_same_variant_on_first_call_acts_as_unique() {
        let mut session = Session::start(config(2, "ABAB", 2, ""), None).unwrap();
        assert!(session.next_word(Selection::SameVariant).is_some());
    }

    #[test]
    fn test_flush_clears_the_seen_set() {
        let mut session = Session::start(config(2, "ABCB", 2, "AB"), None).unwrap();
        let first = session.next_word(Selection::Unique).unwrap();
        // The queue still holds the other AB path; a plain unique request
        // would skip it, but a flush forgets the text was returned.
        let flushed = session.next_word(Selection::FlushAndRestart).unwrap();
        assert_eq!(flushed.word, first.word);
        assert_ne!(flushed.letters, first.letters);
    }

    #[test]
    fn test_exhaustion_yields_sentinel_then_fresh_epoch() {
        let mut session = Session::start(config(2, "ABCD", 2, "AB"), None).unwrap();
        assert!(session.next_word(Selection::Unique).is_some());
        assert!(session.next_word(Selection::Unique).is_none());
        // Still exhausted on a repeat call; no panic, no stale state.
        assert!(session.next_word(Selection::Unique).is_none());
        // A refresh starts a fresh pass over the same grid.
        session.refresh_words().unwrap();
        assert!(session.next_word(Selection::Unique).is_some());
    }

    #[test]
    fn test_two_by_two_hinted_full_traversals() {
        // Hamiltonian searches from the hinted corner; every cell is adjacent
        // to every other in a 2x2 box, so all six orderings come back.
        let mut session = Session::start(config(2, "ABCD", 4, "A"), None).unwrap();
        let mut texts = Vec::new();
        while let Some(word) = session.next_word(Selection::Unique) {
            assert!(word.word.starts_with('A'));
            assert_eq!(word.letters.len(), 4);
            texts.push(word.word);
        }
        assert_eq!(texts.len(), 6);
    }

    #[test]
    fn test_accept_word_collapses_the_box() {
        let mut session = Session::start(config(2, "ABCD", 2, ""), None).unwrap();
        session
            .accept_word(&FoundWord {
                word: "AB".to_string(),
                letters: vec![placed('A', 0, 0), placed('B', 0, 1)],
            })
            .unwrap();
        assert_eq!(
            session.grid_letters(),
            vec![vec![VACANT, VACANT], vec!['C', 'D']]
        );
        // The next pass only sees the two surviving letters.
        let stats = session.refresh_words().unwrap();
        assert_eq!(stats.starts_searched, 2);
        let mut texts = Vec::new();
        while let Some(word) = session.next_word(Selection::Unique) {
            texts.push(word.word);
        }
        texts.sort();
        assert_eq!(texts, vec!["CD".to_string(), "DC".to_string()]);
    }

    #[test]
    fn test_solved_answers_are_replayed_at_start() {
        let solved = [FoundWord {
            word: "AB".to_string(),
            letters: vec![placed('A', 0, 0), placed('B', 0, 1)],
        }];
        let mut cfg = config(2, "ABCD", 2, "");
        cfg.solved = &solved;
        let session = Session::start(cfg, None).unwrap();
        assert_eq!(session.grid_letters()[0], vec![VACANT, VACANT]);
    }

    #[test]
    fn test_dictionary_required_at_session_start() {
        let mut cfg = config(2, "ABCD", 2, "");
        cfg.options = SearchOptions::default();
        let err = Session::start(cfg, None).unwrap_err();
        assert_eq!(err, ConfigError::DictionaryUnavailable);
    }

    #[test]
    fn test_dictionary_filtering_end_to_end() {
        let dict: Arc<dyn Dictionary> = Arc::new(WordList::new(["cad", "bad"]));
        let mut cfg = config(2, "ABCD", 3, "");
        cfg.options = SearchOptions::default();
        let mut session = Session::start(cfg, Some(dict)).unwrap();
        let mut texts = Vec::new();
        while let Some(word) = session.next_word(Selection::Unique) {
            texts.push(word.word);
        }
        texts.sort();
        assert_eq!(texts, vec!["BAD".to_string(), "CAD".to_string()]);
    }

    #[test]
    fn test_option_toggles() {
        let mut session = Session::start(config(2, "ABCD", 2, ""), None).unwrap();
        assert!(!session.options().vowel_check);
        session.set_option(OptionToggle::FlipVowelCheck);
        assert!(session.options().vowel_check);
        session.set_option(OptionToggle::ForceDictionaryOn);
        assert!(session.options().dictionary_check);
        // Now refreshing without a dictionary is a configuration error.
        assert_eq!(
            session.refresh_words().unwrap_err(),
            ConfigError::DictionaryUnavailable
        );
    }

    #[test]
    fn test_cancel_outstanding_empties_later_passes() {
        let mut session = Session::start(config(3, "CARBTESUD", 3, ""), None).unwrap();
        assert!(session.stats().words_kept > 0);
        session.cancel_outstanding();
        let stats = session.refresh_words().unwrap();
        assert_eq!(stats.words_kept, 0);
        assert!(session.next_word(Selection::Unique).is_none());
    }

    #[test]
    fn test_cancel_handle_is_shared() {
        let session = Session::start(config(2, "ABCD", 2, ""), None).unwrap();
        let handle = session.cancel_handle();
        assert!(!handle.is_cancelled());
        session.cancel_outstanding();
        assert!(handle.is_cancelled());
    }

    #[test]
    fn test_invalid_grid_is_rejected() {
        let err = Session::start(config(3, "ABCD", 2, ""), None).unwrap_err();
        assert!(matches!(err, ConfigError::LetterCountMismatch { .. }));
    }

    #[test]
    fn test_parallel_session_matches_sequential_session() {
        let mut cfg = config(3, "CARBTESUD", 3, "");
        let mut sequential = Session::start(cfg.clone(), None).unwrap();
        cfg.parallel = true;
        let mut parallel = Session::start(cfg, None).unwrap();

        let mut drain = |session: &mut Session| {
            let mut texts = Vec::new();
            while let Some(word) = session.next_word(Selection::Unique) {
                texts.push(word.word);
            }
            texts.sort();
            texts
        };
        assert_eq!(drain(&mut sequential), drain(&mut parallel));
    }
}
