//! Word search over the puzzle box.
//!
//! One search request fans the grid's eligible starting cells out to
//! independent path enumerations, in parallel through [`search_parallel`] or
//! on the calling thread through [`search_sequential`], and merges their
//! candidate lists into one [`SearchReport`]. Both entry points honor the
//! same contract and find the same set of words for the same input.

mod backtrack;
pub mod filter;
mod parallel;
pub mod types;

use std::sync::atomic::AtomicBool;

use log::debug;

use crate::dictionary::Dictionary;
use crate::error::ConfigError;
use crate::grid::{Grid, Position, MAX_WORD_LENGTH};

use filter::CandidateFilter;

pub use parallel::practical_core_limit;
pub use types::{FoundWord, PlacedLetter, SearchOptions, SearchReport, Selection};

/// Starting cells worth dispatching: every available cell, or only those
/// matching the hint's first letter when a hint is active. Kept in the
/// grid's fixed enumeration order.
fn eligible_starts(grid: &Grid, hint: &str) -> Vec<Position> {
    let first = hint.chars().next();
    grid.starting_points()
        .filter(|cell| first.map_or(true, |h| cell.letter == h))
        .map(|cell| cell.pos)
        .collect()
}

fn validate(
    word_length: usize,
    options: SearchOptions,
    dictionary: Option<&dyn Dictionary>,
) -> Result<(), ConfigError> {
    if word_length == 0 {
        return Err(ConfigError::ZeroWordLength);
    }
    if word_length > MAX_WORD_LENGTH {
        return Err(ConfigError::WordTooLong {
            length: word_length,
        });
    }
    if options.dictionary_check && dictionary.is_none() {
        return Err(ConfigError::DictionaryUnavailable);
    }
    Ok(())
}

/// Search the grid on a bounded worker pool sized by
/// [`practical_core_limit`]. `hint` must already be upper-cased.
pub fn search_parallel(
    grid: &Grid,
    word_length: usize,
    hint: &str,
    options: SearchOptions,
    dictionary: Option<&dyn Dictionary>,
    cancel: &AtomicBool,
) -> Result<SearchReport, ConfigError> {
    validate(word_length, options, dictionary)?;
    let starts = eligible_starts(grid, hint);
    Ok(parallel::run(
        grid,
        &starts,
        word_length,
        hint,
        options,
        dictionary,
        cancel,
    ))
}

/// Single-threaded fallback with the same contract as [`search_parallel`].
/// Produces the same word set; within-start order is identical and starts
/// are visited in the grid's fixed enumeration order.
pub fn search_sequential(
    grid: &Grid,
    word_length: usize,
    hint: &str,
    options: SearchOptions,
    dictionary: Option<&dyn Dictionary>,
    cancel: &AtomicBool,
) -> Result<SearchReport, ConfigError> {
    validate(word_length, options, dictionary)?;
    let starts = eligible_starts(grid, hint);
    debug!(
        "searching {} starting cells for a word of length {} sequentially",
        starts.len(),
        word_length
    );

    let filter = CandidateFilter::new(options, dictionary);
    let mut report = SearchReport::default();
    for pos in starts {
        let start = grid.cell(pos);
        match backtrack::find_words_from(grid, start, word_length, hint, &filter, cancel) {
            Some(result) => {
                report.starts_searched += 1;
                report.candidates_found += result.candidates;
                report.words.extend(result.words);
            }
            None => {
                debug!("search for cell {}/{} cancelled", pos.row, pos.col);
                break;
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordList;
    use std::collections::BTreeSet;

    const NO_CHECKS: SearchOptions = SearchOptions {
        vowel_check: false,
        dictionary_check: false,
    };

    const VOWELS_ONLY: SearchOptions = SearchOptions {
        vowel_check: true,
        dictionary_check: false,
    };

    fn word_set(report: &SearchReport) -> BTreeSet<String> {
        report.words.iter().map(|w| w.word.clone()).collect()
    }

    #[test]
    fn test_three_by_three_finds_car_and_tab() {
        // C A R
        // B T E
        // S U D
        let grid = Grid::new(3, "CARBTESUD").unwrap();
        let cancel = AtomicBool::new(false);
        let report =
            search_sequential(&grid, 3, "", VOWELS_ONLY, None, &cancel).unwrap();
        let words = word_set(&report);
        assert!(words.contains("CAR"));
        assert!(words.contains("TAB"));

        // Every returned path must replay cell by cell against the grid.
        let car = report.words.iter().find(|w| w.word == "CAR").unwrap();
        for placed in &car.letters {
            assert_eq!(grid.cell(placed.pos).letter, placed.letter);
        }
    }

    #[test]
    fn test_parallel_and_sequential_agree_on_the_word_set() {
        let grid = Grid::new(3, "CRAEUBTAS").unwrap();
        let cancel = AtomicBool::new(false);
        let sequential =
            search_sequential(&grid, 4, "", NO_CHECKS, None, &cancel).unwrap();
        let parallel =
            search_parallel(&grid, 4, "", NO_CHECKS, None, &cancel).unwrap();
        assert_eq!(word_set(&sequential), word_set(&parallel));
        assert_eq!(sequential.candidates_found, parallel.candidates_found);
        assert_eq!(sequential.starts_searched, parallel.starts_searched);
    }

    #[test]
    fn test_hint_restricts_starting_cells() {
        let grid = Grid::new(3, "CRAEUBTAS").unwrap();
        let cancel = AtomicBool::new(false);
        let report = search_sequential(&grid, 3, "A", NO_CHECKS, None, &cancel).unwrap();
        // Two As in the box, so exactly two starting cells are searched.
        assert_eq!(report.starts_searched, 2);
        for word in &report.words {
            assert!(word.word.starts_with('A'));
        }
    }

    #[test]
    fn test_dictionary_filter_applies() {
        let grid = Grid::new(3, "CARBTESUD").unwrap();
        let dict = WordList::new(["car", "tab"]);
        let cancel = AtomicBool::new(false);
        let report = search_sequential(
            &grid,
            3,
            "",
            SearchOptions::default(),
            Some(&dict),
            &cancel,
        )
        .unwrap();
        let words = word_set(&report);
        assert_eq!(words, BTreeSet::from(["CAR".to_string(), "TAB".to_string()]));
        assert!(report.candidates_found > report.words.len());
    }

    #[test]
    fn test_dictionary_check_without_dictionary_is_rejected() {
        let grid = Grid::new(2, "ABCD").unwrap();
        let cancel = AtomicBool::new(false);
        let err = search_sequential(&grid, 2, "", SearchOptions::default(), None, &cancel)
            .unwrap_err();
        assert_eq!(err, ConfigError::DictionaryUnavailable);
    }

    #[test]
    fn test_word_length_bounds() {
        let grid = Grid::new(2, "ABCD").unwrap();
        let cancel = AtomicBool::new(false);
        assert_eq!(
            search_sequential(&grid, 0, "", NO_CHECKS, None, &cancel).unwrap_err(),
            ConfigError::ZeroWordLength
        );
        assert_eq!(
            search_sequential(&grid, 16, "", NO_CHECKS, None, &cancel).unwrap_err(),
            ConfigError::WordTooLong { length: 16 }
        );
    }

    #[test]
    fn test_cancelled_search_is_empty_not_an_error() {
        let grid = Grid::new(3, "CRAEUBTAS").unwrap();
        let cancel = AtomicBool::new(true);
        let sequential =
            search_sequential(&grid, 3, "", NO_CHECKS, None, &cancel).unwrap();
        assert!(sequential.words.is_empty());
        let parallel = search_parallel(&grid, 3, "", NO_CHECKS, None, &cancel).unwrap();
        assert!(parallel.words.is_empty());
    }
}
