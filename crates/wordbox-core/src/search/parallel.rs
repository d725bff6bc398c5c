//! Fan-out of starting cells across a bounded worker pool.
//!
//! Shared-nothing: workers read the grid and write only to their own local
//! results, which are aggregated on the collecting side after each task has
//! fully returned. A worker that panics or observes cancellation contributes
//! nothing and never disturbs its siblings.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

use log::{debug, warn};

use crate::dictionary::Dictionary;
use crate::grid::{Grid, Position};

use super::backtrack::{self, StartResult};
use super::filter::CandidateFilter;
use super::types::{SearchOptions, SearchReport};

/// Hard ceiling on workers: leave one core for the rest of the process.
pub(crate) fn max_core_limit() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(2)
        .saturating_sub(1)
        .max(1)
}

/// Worker budget for one search request.
///
/// The branching factor makes exhaustive search expensive for long words, and
/// every hint letter pins one level of the recursion, so the budget is driven
/// by how many letters remain undetermined: full parallelism below eight,
/// degrading to a single worker at ten and beyond.
pub fn practical_core_limit(word_length: usize, hint_len: usize) -> usize {
    budget_for(max_core_limit(), word_length, hint_len)
}

fn budget_for(max_cores: usize, word_length: usize, hint_len: usize) -> usize {
    let letters_to_search = word_length.saturating_sub(hint_len);
    let budget = match letters_to_search {
        0..=7 => max_cores,
        8 => max_cores / 2,
        9 => max_cores / 3,
        _ => 1,
    };
    budget.max(1)
}

/// Run one enumeration task per starting cell across the computed worker
/// budget and merge the results. Word order within one starting cell is
/// preserved; order across starting cells follows task completion.
pub(crate) fn run(
    grid: &Grid,
    starts: &[Position],
    word_length: usize,
    hint: &str,
    options: SearchOptions,
    dictionary: Option<&dyn Dictionary>,
    cancel: &AtomicBool,
) -> SearchReport {
    let workers = practical_core_limit(word_length, hint.chars().count())
        .min(starts.len())
        .max(1);
    debug!(
        "searching {} starting cells for a word of length {} on {} workers",
        starts.len(),
        word_length,
        workers
    );

    let next_start = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<StartResult>();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let next_start = &next_start;
            scope.spawn(move || {
                let filter = CandidateFilter::new(options, dictionary);
                loop {
                    if cancel.load(Ordering::Relaxed) {
                        break;
                    }
                    let index = next_start.fetch_add(1, Ordering::Relaxed);
                    let Some(&start_pos) = starts.get(index) else {
                        break;
                    };
                    let start = grid.cell(start_pos);
                    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                        backtrack::find_words_from(
                            grid,
                            start,
                            word_length,
                            hint,
                            &filter,
                            cancel,
                        )
                    }));
                    match outcome {
                        Ok(Some(result)) => {
                            debug!(
                                "search for cell {}/{} ({}) finished, {} candidate paths, {} kept",
                                start_pos.row,
                                start_pos.col,
                                start.letter,
                                result.candidates,
                                result.words.len()
                            );
                            if tx.send(result).is_err() {
                                break;
                            }
                        }
                        Ok(None) => {
                            debug!(
                                "search for cell {}/{} cancelled",
                                start_pos.row, start_pos.col
                            );
                        }
                        Err(_) => {
                            warn!(
                                "search task for cell {}/{} panicked; dropping its results",
                                start_pos.row, start_pos.col
                            );
                        }
                    }
                }
            });
        }
        drop(tx);
    });

    // All workers have joined; drain whatever completed.
    let mut report = SearchReport::default();
    for result in rx.iter() {
        report.starts_searched += 1;
        report.candidates_found += result.candidates;
        report.words.extend(result.words);
    }
    report
}
