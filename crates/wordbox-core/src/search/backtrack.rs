//! Recursive path enumeration from a single starting cell.
//!
//! Search state is carried in value-copied snapshots: every branch clones the
//! availability map and the partial path before mutating them, so sibling
//! branches can never observe each other's marks. The cost is bounded: the
//! map is `side * side` bytes and paths never exceed the word length.

use std::sync::atomic::{AtomicBool, Ordering};

use log::trace;

use crate::grid::{Cell, CellStatus, Direction, Grid, Position};

use super::filter::CandidateFilter;
use super::types::{FoundWord, PlacedLetter};

/// Per-branch overlay marking which cells the word in progress has consumed.
///
/// Distinct from the grid's own cell statuses: the grid records letters
/// consumed by *accepted answers*, this records letters consumed by the
/// *current partial path* only.
#[derive(Clone)]
pub(crate) struct AvailabilityMap {
    side: usize,
    used: Vec<bool>,
}

impl AvailabilityMap {
    /// Seed from the grid, so cells vacated by earlier answers start out
    /// unavailable.
    pub(crate) fn from_grid(grid: &Grid) -> Self {
        let side = grid.side();
        let mut used = vec![false; side * side];
        for row in 0..side {
            for col in 0..side {
                let pos = Position::new(row, col);
                used[row * side + col] = grid.cell(pos).status != CellStatus::Available;
            }
        }
        Self { side, used }
    }

    fn is_available(&self, pos: Position) -> bool {
        !self.used[pos.row * self.side + pos.col]
    }

    fn mark_used(&mut self, pos: Position) {
        self.used[pos.row * self.side + pos.col] = true;
    }
}

/// What enumerating one starting cell produced.
#[derive(Debug, Default)]
pub(crate) struct StartResult {
    pub words: Vec<FoundWord>,
    /// Complete paths examined, before filtering.
    pub candidates: usize,
}

/// Enumerate every full-length path out of `start`, feeding each complete
/// path through the filter. Returns `None` when the search was cancelled
/// part-way; the partial result must be discarded.
///
/// When a hint is active the caller has already checked the starting letter
/// against its first character.
pub(crate) fn find_words_from(
    grid: &Grid,
    start: &Cell,
    word_length: usize,
    hint: &str,
    filter: &CandidateFilter<'_>,
    cancel: &AtomicBool,
) -> Option<StartResult> {
    trace!(
        "starting point row {} col {} letter {}",
        start.pos.row,
        start.pos.col,
        start.letter
    );

    let mut map = AvailabilityMap::from_grid(grid);
    map.mark_used(start.pos);

    let path = vec![PlacedLetter {
        letter: start.letter,
        pos: start.pos,
    }];
    let mut word = String::with_capacity(word_length);
    word.push(start.letter);

    let mut result = StartResult::default();
    let finished = extend(
        grid,
        start.pos,
        word_length - 1,
        &map,
        &word,
        &path,
        hint,
        filter,
        cancel,
        &mut result,
    );
    if finished {
        Some(result)
    } else {
        None
    }
}

/// Add one more letter to the path, or emit the word when none are needed.
/// Returns false when cancellation was observed.
#[allow(clippy::too_many_arguments)]
fn extend(
    grid: &Grid,
    at: Position,
    needed: usize,
    map: &AvailabilityMap,
    word: &str,
    path: &[PlacedLetter],
    hint: &str,
    filter: &CandidateFilter<'_>,
    cancel: &AtomicBool,
    out: &mut StartResult,
) -> bool {
    if cancel.load(Ordering::Relaxed) {
        return false;
    }

    if needed == 0 {
        out.candidates += 1;
        if filter.accept(word) {
            out.words.push(FoundWord {
                word: word.to_string(),
                letters: path.to_vec(),
            });
        }
        return true;
    }

    // The accumulated letters match the hint so far, so their count indexes
    // the next constrained hint character, if the hint reaches this deep.
    let next_hint_letter = hint.chars().nth(word.chars().count());

    let cell = grid.cell(at);
    for dir in Direction::ALL {
        if cell.neighbor_status(dir) != CellStatus::Available {
            continue;
        }
        let next_pos = dir.step(at);
        if !map.is_available(next_pos) {
            continue;
        }
        let next_cell = grid.cell(next_pos);
        if let Some(constrained) = next_hint_letter {
            // Pruning: reject the branch before exploring it.
            if next_cell.letter != constrained {
                continue;
            }
        }

        // Fresh copies for the child branch; `map`, `word`, and `path` stay
        // untouched for the remaining siblings.
        let mut branch_map = map.clone();
        branch_map.mark_used(next_pos);
        let mut branch_word = word.to_owned();
        branch_word.push(next_cell.letter);
        let mut branch_path = path.to_vec();
        branch_path.push(PlacedLetter {
            letter: next_cell.letter,
            pos: next_pos,
        });

        let finished = extend(
            grid,
            next_pos,
            needed - 1,
            &branch_map,
            &branch_word,
            &branch_path,
            hint,
            filter,
            cancel,
            out,
        );
        if !finished {
            return false;
        }
    }

    // All eight neighbors exhausted: normal end of this branch.
    true
}
